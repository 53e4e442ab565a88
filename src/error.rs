// Error types for the cheatsheet viewer.
// Covers content loading, clipboard access, and terminal IO.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheatsheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid content in {origin}: {reason}")]
    InvalidContent { origin: String, reason: String },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("{0}")]
    Other(String),
}

impl CheatsheetError {
    pub fn invalid_content(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        CheatsheetError::InvalidContent {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheatsheetError>;
