use thiserror::Error;

/// Errors surfaced by the library.
///
/// Every upstream problem, whether a transport failure, a non-success status,
/// or an undecodable body, collapses into [`Error::Fetch`] so callers can show
/// one generic retry message without branching on cause.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to fetch data from the recipe provider")]
    Fetch(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode bookmarks: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
