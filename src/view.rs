//! Pure text renderers for the interactive session. No I/O happens here;
//! `main` decides what to print and when.

use std::fmt::Write;

use crate::model::{Category, Recipe};
use crate::state::EmptyState;

/// One result-grid card, collapsed to a line: position, bookmark marker,
/// name, region and category, plus any tags.
pub fn card_line(position: usize, recipe: &Recipe, bookmarked: bool) -> String {
    let marker = if bookmarked { "*" } else { " " };
    let mut line = format!(
        "{position:>3}. [{marker}] {} ({} / {})",
        recipe.name, recipe.area, recipe.category
    );

    let tags = recipe.tag_list();
    if !tags.is_empty() {
        let _ = write!(line, "  #{}", tags.join(" #"));
    }
    line
}

/// The full detail view: header, external links, ingredient list, and
/// numbered instruction steps.
pub fn detail(recipe: &Recipe, bookmarked: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", recipe.name);
    let _ = writeln!(out, "{} / {}", recipe.area, recipe.category);
    if bookmarked {
        let _ = writeln!(out, "Saved to your cookbook");
    }

    if let Some(source) = &recipe.source {
        let _ = writeln!(out, "Source: {}", source);
    }
    if let Some(youtube) = &recipe.youtube {
        let _ = writeln!(out, "Video: {}", youtube);
    }

    let _ = writeln!(out, "\nIngredients:");
    for entry in recipe.ingredients() {
        if entry.measure.is_empty() {
            let _ = writeln!(out, "  - {}", entry.name);
        } else {
            let _ = writeln!(out, "  - {}: {}", entry.name, entry.measure);
        }
    }

    let _ = writeln!(out, "\nInstructions:");
    for (index, step) in recipe.instruction_steps().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, step);
    }

    out
}

pub fn empty_state_message(state: EmptyState) -> &'static str {
    match state {
        EmptyState::Loading => "Loading recipes...",
        EmptyState::NoMatches => "No recipes found. Try another ingredient or cuisine.",
        EmptyState::Onboarding => {
            "Search for a recipe to begin. Try an ingredient like \"chicken\", \
             a cuisine like \"Italian\", or a meal name."
        }
        EmptyState::NothingSaved => {
            "No saved recipes yet. Toggle the bookmark on any recipe to collect \
             your go-to meals."
        }
    }
}

/// Label for the saved-recipes toggle, with a live count.
pub fn saved_label(show_saved: bool, count: usize) -> String {
    if show_saved {
        format!("Viewing saved recipes ({count})")
    } else {
        format!("Saved recipes ({count})")
    }
}

/// Current filter selections, "all" when nothing is selected.
pub fn filter_summary(category: Option<&str>, region: Option<&str>) -> String {
    format!(
        "Category: {} | Region: {}",
        category.unwrap_or("all"),
        region.unwrap_or("all")
    )
}

pub fn category_options(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories available".to_string();
    }
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    format!("Categories: {}", names.join(", "))
}

pub fn region_options(regions: &[String]) -> String {
    if regions.is_empty() {
        return "No regions in the current results".to_string();
    }
    format!("Regions: {}", regions.join(", "))
}
