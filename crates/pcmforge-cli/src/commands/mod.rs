//! CLI command implementations.

pub mod demo;
pub mod inspect;
pub mod render;

use pcmforge::StreamError;
use serde::Serialize;

/// Error entry in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct JsonError {
    /// Stable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl From<&StreamError> for JsonError {
    fn from(e: &StreamError) -> Self {
        Self {
            code: e.code().to_string(),
            message: e.to_string(),
        }
    }
}
