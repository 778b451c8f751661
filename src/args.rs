use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recipe-scout")]
#[command(about = "Search TheMealDB, filter the results, and save favorites")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bookmarks file (overrides the configured path)
    #[arg(short, long)]
    pub bookmarks: Option<PathBuf>,

    /// Gateway base URL the client talks to (overrides the configured URL)
    #[arg(short, long)]
    pub gateway: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the relay between clients and the upstream recipe provider
    Serve {
        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },
}
