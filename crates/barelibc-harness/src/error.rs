//! Harness error type.

use barelibc_core::FormatError;

/// Anything that can stop a fixture from being loaded or executed.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported function '{0}'")]
    UnknownFunction(String),
    #[error("bad input '{field}': {reason}")]
    BadInput { field: String, reason: String },
    #[error("format rejected arguments: {0}")]
    Format(#[from] FormatError),
    #[error("function '{function}' cannot run in {mode} mode")]
    ModeUnsupported {
        function: String,
        mode: &'static str,
    },
}

impl HarnessError {
    pub(crate) fn bad_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
