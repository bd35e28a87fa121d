//! Error types for reader transport operations.
//!
//! Transport failures fall into two classes the poll loop treats
//! differently: transient errors are logged and retried on the next cycle,
//! fatal errors propagate up and terminate the loop. The classification
//! lives on the error itself via [`TransportError::is_fatal`]. A poll that
//! merely finds no tag is not an error at all.

use thiserror::Error;

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur while polling a reader transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Device or executable path does not exist. Fatal.
    #[error("Device not found: {path}")]
    DeviceNotFound { path: String },

    /// The card service (PC/SC) is unreachable or has no readers. Fatal.
    #[error("Card service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// The listener channel closed; the backend can produce no more events. Fatal.
    #[error("Transport event channel closed")]
    ChannelClosed,

    /// The reader-control process failed to start. Transient.
    #[error("Failed to spawn reader command: {message}")]
    SpawnFailed { message: String },

    /// Card connection did not come up within the bounded attempts. Transient.
    #[error("Card connection failed after {attempts} attempts: {message}")]
    ConnectFailed { attempts: u32, message: String },

    /// The card was reached but the read itself failed. Transient.
    #[error("Card read error: {message}")]
    CardRead { message: String },

    /// Generic I/O error. Transient.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// Create a new device-not-found error.
    pub fn device_not_found(path: impl Into<String>) -> Self {
        Self::DeviceNotFound { path: path.into() }
    }

    /// Create a new service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Create a new spawn-failed error.
    pub fn spawn_failed(message: impl Into<String>) -> Self {
        Self::SpawnFailed {
            message: message.into(),
        }
    }

    /// Create a new connect-failed error.
    pub fn connect_failed(attempts: u32, message: impl Into<String>) -> Self {
        Self::ConnectFailed {
            attempts,
            message: message.into(),
        }
    }

    /// Create a new card-read error.
    pub fn card_read(message: impl Into<String>) -> Self {
        Self::CardRead {
            message: message.into(),
        }
    }

    /// Whether this error should terminate the poll loop.
    ///
    /// Transient errors are retried on the next poll cycle; fatal ones mean
    /// the transport can never succeed again (invalid device path, dead
    /// service, closed listener channel).
    ///
    /// # Examples
    ///
    /// ```
    /// use taptype_reader::TransportError;
    ///
    /// assert!(TransportError::device_not_found("/dev/ttyACM9").is_fatal());
    /// assert!(!TransportError::card_read("transmit failed").is_fatal());
    /// ```
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotFound { .. } | Self::ServiceUnavailable { .. } | Self::ChannelClosed
        )
    }
}
