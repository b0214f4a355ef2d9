//! Rally client errors.

use thiserror::Error;

/// Errors raised by [`RallyClient`](crate::RallyClient).
///
/// Only transport and decode failures are errors. A reply whose `status`
/// or `error` field reports a failure is still returned as a value.
#[derive(Error, Debug)]
pub enum RallyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RallyError {
    /// The HTTP exchange itself could not be completed.
    pub fn is_transport(&self) -> bool {
        matches!(self, RallyError::Http(_))
    }

    /// The server answered but the body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, RallyError::Json(_))
    }
}
