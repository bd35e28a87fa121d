//! Command-backed reader transport.
//!
//! Each poll invokes an external reader-control tool (proxmark3 and
//! compatibles), pipes a short command script to its stdin, and captures the
//! combined stdout/stderr as text. The tool's exit status is not consulted
//! for tag presence: the reference tools print a `UID:` line when a tag is
//! in the field and unhelpful statuses otherwise, so the captured output is
//! the only authoritative signal.
//!
//! This backend has no notion of tag removal; it never yields
//! [`PollEvent::Removed`].

use crate::{
    error::{Result, TransportError},
    traits::{PollEvent, RawCapture, TagTransport, TransportInfo},
};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Configuration for the command-backed transport.
#[derive(Debug, Clone)]
pub struct CommandConfig {
    /// Reader-control executable.
    pub program: PathBuf,

    /// Device port passed as the first argument (e.g. `/dev/ttyACM0`).
    pub device: Option<String>,

    /// Command script piped to the tool's stdin.
    pub script: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("proxmark3"),
            device: Some("/dev/ttyACM0".to_string()),
            script: "hf 14a reader\nquit\n".to_string(),
        }
    }
}

/// Reader transport that shells out to a reader-control tool per poll.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use taptype_reader::{CommandConfig, CommandTransport, TagTransport};
///
/// # async fn example() -> taptype_reader::Result<()> {
/// let mut transport = CommandTransport::new(CommandConfig::default())?;
/// let event = transport.poll(Duration::from_millis(1400)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CommandTransport {
    config: CommandConfig,
}

impl CommandTransport {
    /// Create a new command-backed transport.
    ///
    /// # Errors
    ///
    /// Returns a fatal `TransportError::DeviceNotFound` if the configured
    /// device is an absolute path that does not exist. Non-path device
    /// identifiers (e.g. `COM3`) are passed through unchecked; the tool
    /// itself is resolved at spawn time.
    pub fn new(config: CommandConfig) -> Result<Self> {
        if let Some(device) = &config.device {
            let path = Path::new(device);
            if path.is_absolute() && !path.exists() {
                return Err(TransportError::device_not_found(device.clone()));
            }
        }
        Ok(Self { config })
    }

    /// Get the configuration in use.
    pub fn config(&self) -> &CommandConfig {
        &self.config
    }
}

impl TagTransport for CommandTransport {
    async fn poll(&mut self, timeout: Duration) -> Result<PollEvent> {
        let mut command = Command::new(&self.config.program);
        if let Some(device) = &self.config.device {
            command.arg(device);
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                TransportError::device_not_found(self.config.program.display().to_string())
            } else {
                TransportError::spawn_failed(error.to_string())
            }
        })?;

        let script = self.config.script.clone();
        let run = async move {
            if let Some(mut stdin) = child.stdin.take() {
                // Tools may exit without draining stdin; their output still decides.
                if let Err(error) = stdin.write_all(script.as_bytes()).await {
                    debug!(%error, "reader tool closed stdin early");
                }
            }
            child.wait_with_output().await.map_err(TransportError::from)
        };

        // Dropping the in-flight future on timeout kills the child (kill_on_drop).
        let output = match tokio::time::timeout(timeout, run).await {
            Err(_elapsed) => return Ok(PollEvent::Timeout),
            Ok(result) => result?,
        };

        if !output.status.success() {
            debug!(status = %output.status, "reader tool exited non-zero");
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(PollEvent::Capture(RawCapture::Text(text)))
    }

    async fn describe(&self) -> Result<TransportInfo> {
        Ok(TransportInfo::new(
            self.config.program.display().to_string(),
            "command",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;

    fn cat_config(script: &str) -> CommandConfig {
        CommandConfig {
            program: PathBuf::from("cat"),
            device: None,
            script: script.to_string(),
        }
    }

    #[test]
    fn test_new_rejects_missing_device_path() {
        let config = CommandConfig {
            device: Some("/dev/definitely-not-a-reader-port".to_string()),
            ..CommandConfig::default()
        };
        let error = CommandTransport::new(config).unwrap_err();
        assert!(error.is_fatal());
        assert!(matches!(error, TransportError::DeviceNotFound { .. }));
    }

    #[test]
    fn test_new_accepts_non_path_device() {
        let config = CommandConfig {
            device: Some("COM3".to_string()),
            ..CommandConfig::default()
        };
        assert!(CommandTransport::new(config).is_ok());
    }

    #[tokio::test]
    async fn test_poll_captures_combined_output() {
        // `cat` echoes the script back, standing in for tool output.
        let mut transport =
            CommandTransport::new(cat_config("[+]  UID: 04 A3 FF 21\n")).unwrap();

        let event = transport.poll(Duration::from_secs(5)).await.unwrap();
        let PollEvent::Capture(raw) = event else {
            panic!("expected a capture, got {event:?}");
        };
        assert_eq!(extract(&raw).unwrap().as_str(), "04A3FF21");
    }

    #[tokio::test]
    async fn test_poll_without_marker_extracts_nothing() {
        let mut transport = CommandTransport::new(cat_config("no tag in field\n")).unwrap();

        let event = transport.poll(Duration::from_secs(5)).await.unwrap();
        let PollEvent::Capture(raw) = event else {
            panic!("expected a capture, got {event:?}");
        };
        assert!(extract(&raw).is_none());
    }

    #[tokio::test]
    async fn test_poll_times_out_on_hung_tool() {
        let config = CommandConfig {
            program: PathBuf::from("sleep"),
            device: Some("5".to_string()),
            script: String::new(),
        };
        let mut transport = CommandTransport::new(config).unwrap();

        let event = transport.poll(Duration::from_millis(50)).await.unwrap();
        assert_eq!(event, PollEvent::Timeout);
    }

    #[tokio::test]
    async fn test_poll_missing_program_is_fatal() {
        let config = CommandConfig {
            program: PathBuf::from("definitely-not-a-reader-tool"),
            device: None,
            script: String::new(),
        };
        let mut transport = CommandTransport::new(config).unwrap();

        let error = transport.poll(Duration::from_secs(1)).await.unwrap_err();
        assert!(error.is_fatal());
    }

    #[tokio::test]
    async fn test_describe() {
        let transport = CommandTransport::new(cat_config("")).unwrap();
        let info = transport.describe().await.unwrap();
        assert_eq!(info.backend, "command");
        assert_eq!(info.name, "cat");
    }
}
