//! Error types for keystroke emission.

use thiserror::Error;

/// Result type alias for emission operations.
pub type Result<T> = std::result::Result<T, EmitError>;

/// Errors that can occur while injecting keystrokes.
///
/// Emission failures are reported to the caller and never retried; the
/// scan loop logs them and proceeds to the next poll cycle.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The injection tool could not be started.
    #[error("Failed to spawn injection tool '{program}': {message}")]
    SpawnFailed { program: String, message: String },

    /// The injection tool ran but reported failure.
    #[error("Injection tool '{program}' exited with {status}")]
    ToolFailed { program: String, status: String },

    /// The native injection call failed.
    #[error("Input injection failed: {message}")]
    Injection { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EmitError {
    /// Create a new spawn-failed error.
    pub fn spawn_failed(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SpawnFailed {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Create a new tool-failed error.
    pub fn tool_failed(program: impl Into<String>, status: impl Into<String>) -> Self {
        Self::ToolFailed {
            program: program.into(),
            status: status.into(),
        }
    }

    /// Create a new injection error.
    pub fn injection(message: impl Into<String>) -> Self {
        Self::Injection {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EmitError::tool_failed("xdotool", "exit status: 1");
        assert_eq!(
            error.to_string(),
            "Injection tool 'xdotool' exited with exit status: 1"
        );

        let error = EmitError::injection("no display");
        assert_eq!(error.to_string(), "Input injection failed: no display");
    }
}
