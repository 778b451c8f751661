use std::io::{BufRead, Write};

use clap::Parser;

use recipe_scout::api::Client;
use recipe_scout::{BookmarkStore, Config, SearchState, gateway, view};

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load configuration: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    // CLI flags override the configuration file
    if let Some(bookmarks) = args.bookmarks {
        config.bookmarks_path = bookmarks;
    }
    if let Some(gateway_url) = args.gateway {
        config.gateway_url = gateway_url;
    }

    match args.command {
        Some(Command::Serve { port }) => {
            if let Some(port) = port {
                config.gateway_port = port;
            }
            if let Err(e) = gateway::serve(&config).await {
                ::log::error!("Gateway failed: {}", e);
                std::process::exit(1);
            }
        }
        None => run_session(config).await,
    }
}

/// Interactive browse loop: plain input searches, `:commands` do the rest.
async fn run_session(config: Config) {
    let client = match Client::new(&config) {
        Ok(client) => client,
        Err(e) => {
            ::log::error!("Failed to set up the provider client: {}", e);
            std::process::exit(1);
        }
    };

    let mut bookmarks = BookmarkStore::load(&config.bookmarks_path);
    let mut state = SearchState::new();

    // Category selector options; tolerated to empty when the fetch fails
    let categories = match client.list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            ::log::warn!("Could not load categories: {}", e);
            Vec::new()
        }
    };

    println!("recipe-scout: type a query to search, :help for commands");
    render(&state, &bookmarks);

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                ::log::error!("Failed to read input: {}", e);
                break;
            }
        }

        let input = line.trim();
        let Some(command) = input.strip_prefix(':') else {
            // Anything that is not a command is a search submission, the
            // empty query included
            run_search(&client, &mut state, input).await;
            render(&state, &bookmarks);
            continue;
        };

        let (name, arg) = match command.split_once(' ') {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "quit" | "q" => break,
            "help" => print_help(),
            "saved" => {
                state.toggle_saved_view();
                render(&state, &bookmarks);
            }
            "category" => {
                state.set_category(parse_selection(arg));
                render(&state, &bookmarks);
            }
            "region" => {
                state.set_region(parse_selection(arg));
                render(&state, &bookmarks);
            }
            "categories" => println!("{}", view::category_options(&categories)),
            "regions" => println!("{}", view::region_options(&state.regions(&bookmarks))),
            "open" => {
                if let Some(recipe) = selected_visible(&state, &bookmarks, arg) {
                    print!("{}", view::detail(&recipe, bookmarks.contains(&recipe.id)));
                }
            }
            "save" => {
                if let Some(recipe) = selected_visible(&state, &bookmarks, arg) {
                    toggle_bookmark(&mut bookmarks, &recipe);
                }
            }
            _ => println!("Unknown command \":{name}\", try :help"),
        }
    }
}

async fn run_search(client: &Client, state: &mut SearchState, raw_query: &str) {
    let tag = state.begin_search(raw_query);
    let query = state.query().to_string();
    println!("Searching \"{}\"...", query);

    let outcome = client.search_recipes(&query).await;
    state.finish_search(tag, outcome);
}

fn toggle_bookmark(bookmarks: &mut BookmarkStore, recipe: &recipe_scout::Recipe) {
    match bookmarks.toggle(recipe) {
        Ok(true) => println!("Saved \"{}\" ({} saved)", recipe.name, bookmarks.len()),
        Ok(false) => println!("Removed \"{}\" ({} saved)", recipe.name, bookmarks.len()),
        Err(e) => {
            ::log::error!("Failed to persist bookmarks: {}", e);
            println!("Could not write bookmarks to disk.");
        }
    }
}

/// Print the saved/filter header and the visible recipe list, or the reason
/// it is empty.
fn render(state: &SearchState, bookmarks: &BookmarkStore) {
    println!(
        "{} | {}",
        view::saved_label(state.show_saved(), bookmarks.len()),
        view::filter_summary(state.selected_category(), state.selected_region())
    );

    if let Some(empty) = state.empty_state(bookmarks) {
        println!("{}", view::empty_state_message(empty));
        return;
    }
    if let Some(error) = state.error() {
        println!("{}", error);
        return;
    }

    let visible = state.visible(bookmarks);
    if visible.is_empty() {
        println!("No recipes match the current filters.");
        return;
    }
    for (index, recipe) in visible.iter().enumerate() {
        println!(
            "{}",
            view::card_line(index + 1, recipe, bookmarks.contains(&recipe.id))
        );
    }
}

/// "all" (or nothing) clears the selection
fn parse_selection(arg: &str) -> Option<String> {
    if arg.is_empty() || arg.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(arg.to_string())
    }
}

/// Resolve a 1-based position in the currently visible list, cloning the
/// recipe so the caller can mutate the store.
fn selected_visible(
    state: &SearchState,
    bookmarks: &BookmarkStore,
    arg: &str,
) -> Option<recipe_scout::Recipe> {
    let position = match arg.parse::<usize>() {
        Ok(position) if position >= 1 => position,
        _ => {
            println!("Expected a result number, e.g. :open 2");
            return None;
        }
    };

    let visible = state.visible(bookmarks);
    match visible.get(position - 1) {
        Some(recipe) => Some((*recipe).clone()),
        None => {
            println!("No result #{position} on screen");
            None
        }
    }
}

fn print_help() {
    println!(
        "Commands:\n\
         \x20 <text>            search recipes (empty input fetches the default set)\n\
         \x20 :saved            toggle between live results and saved recipes\n\
         \x20 :category <name>  filter by category (:category all to clear)\n\
         \x20 :region <name>    filter by region (:region all to clear)\n\
         \x20 :categories       list the provider's categories\n\
         \x20 :regions          list regions present in the current view\n\
         \x20 :open <n>         show full detail for result n\n\
         \x20 :save <n>         bookmark or un-bookmark result n\n\
         \x20 :quit             exit"
    );
}
