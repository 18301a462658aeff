//! Errors from user sources.

use thiserror::Error;

/// Failure to load user records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Http(String),

    /// The response body was not a list of user records
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// The server answered with a non-success status
    #[error("Source unavailable (status {status}): {message}")]
    Unavailable {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },
}
