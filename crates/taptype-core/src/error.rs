//! Error types for core domain validation.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing core domain types.
#[derive(Debug, Error)]
pub enum Error {
    /// The candidate UID failed validation.
    #[error("Invalid UID: {message}")]
    InvalidUid { message: String },
}

impl Error {
    /// Create a new invalid-UID error.
    pub fn invalid_uid(message: impl Into<String>) -> Self {
        Self::InvalidUid {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_uid_display() {
        let error = Error::invalid_uid("odd number of hex digits");
        assert_eq!(error.to_string(), "Invalid UID: odd number of hex digits");
    }
}
