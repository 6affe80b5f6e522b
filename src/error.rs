//! Structured error types for pageflow.
//!
//! Layout itself only fails on contract violations (a measurement that is not
//! a usable height, a page with no room). The remaining variants cover input
//! parsing, font loading and edits to resume lists.

use thiserror::Error;

use crate::model::BlockId;

/// The unified error type returned by all public pageflow functions.
#[derive(Debug, Error)]
pub enum Error {
    /// The measurement primitive returned a negative, NaN or infinite height.
    #[error("block {block_id} measured to an invalid height ({height})")]
    InvalidMeasurement { block_id: BlockId, height: f64 },

    /// The content area is empty or not finite (margins larger than the page, etc.).
    #[error("invalid content area {width} x {height}: both sides must be positive and finite")]
    InvalidPage { width: f64, height: f64 },

    /// JSON input failed to parse.
    #[error("failed to parse input: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// A font could not be decoded or parsed.
    #[error("font error: {0}")]
    Font(String),

    /// A list edit referred to a position that does not exist.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the expected schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        Error::Parse { source: e, hint }
    }
}
