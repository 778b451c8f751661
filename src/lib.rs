// Re-export modules
pub mod api;
pub mod bookmarks;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod state;
pub mod view;

// Re-export commonly used types for convenience
pub use bookmarks::BookmarkStore;
pub use config::Config;
pub use error::Error;
pub use model::{Category, Recipe};
pub use state::SearchState;
