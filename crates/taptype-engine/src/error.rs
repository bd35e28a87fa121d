//! Error types for the scan loop.

use taptype_reader::TransportError;
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that terminate the scan loop.
///
/// Only unrecoverable conditions surface here; transient transport
/// failures, extraction misses, and emission failures are logged inside
/// the loop and retried or skipped.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The transport failed in a way no future poll can recover from.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_wraps() {
        let error = EngineError::from(TransportError::device_not_found("/dev/ttyACM0"));
        assert_eq!(
            error.to_string(),
            "Transport failure: Device not found: /dev/ttyACM0"
        );
    }
}
