//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Maps directly onto the failure modes the ledger can hit: a persistence
/// write that did not land, a mutation target that no longer exists, invalid
/// form/quick-entry input, and an unusable classifier oracle. Classification
/// errors never escape the gateway; they exist so adapters can report what
/// went wrong before the fallback kicks in.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a classification error
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification(msg.into())
    }

    /// True for the benign mutation-target-missing case
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::persistence("disk full");
        assert!(err.to_string().contains("Persistence error"));

        let err = Error::not_found("tx 42");
        assert!(err.is_not_found());

        let err = Error::validation("bad amount");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("Validation error"));
    }
}
