//! Error types for regbot-github

use thiserror::Error;

/// Result type alias using regbot-github's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// GitHub API error types
#[derive(Error, Debug)]
pub enum Error {
    /// API returned a non-success status
    #[error("GitHub API request to {url} failed with status {status}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },

    /// Transport or decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create an API error
    pub fn api(url: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            url: url.into(),
            status,
            message: message.into(),
        }
    }
}
