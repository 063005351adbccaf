//! All fatal error types for the langtable crate.
//!
//! Structural header failures and resource-access failures abort the
//! in-progress build; everything else is a warning-class
//! [`Diagnostic`](crate::diagnostics::Diagnostic).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed header: {0}")]
    Header(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new structural header error.
    pub fn header_error(message: impl Into<String>) -> Self {
        Error::Header(message.into())
    }
}
