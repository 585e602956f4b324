use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the support backend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid server URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The server answered with `success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("Failed to read image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Text suitable for the inline error line or an alert.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}
