//! Errors raised by the checkout gateway.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of an async checkout step
///
/// Caught at the action boundary: the reducer turns it into the `error` field
/// and a rolled-back phase, it never reaches the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowError {
    /// The operation failed; carries a human-readable message
    #[error("{0}")]
    OperationFailed(String),
}

impl WorkflowError {
    /// Builds an [`WorkflowError::OperationFailed`]
    #[must_use]
    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_message() {
        let err = WorkflowError::operation_failed("card declined");
        assert_eq!(err.to_string(), "card declined");
    }
}
