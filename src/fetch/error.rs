//! Per-entry download errors.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single texture could not be stored.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("HTTP Error {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("IO error when writing `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// One-line description including the source chain.
    pub fn describe(self) -> String {
        format!("{:#}", anyhow::Error::new(self))
    }
}
