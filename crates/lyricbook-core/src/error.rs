use thiserror::Error;

#[derive(Debug, Error)]
pub enum LyricbookError {
    #[error("config error: {0}")]
    Config(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

/// Errors from fetching remote text content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid source URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
