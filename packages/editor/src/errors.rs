//! Error types for the editor

use thiserror::Error;

/// Failures outside the mutation path
///
/// Commands never fail; they report [`crate::NoopReason`] instead.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid action script: {0}")]
    Script(#[from] serde_json::Error),
}
