//! Key sink that drives an external injection tool.
//!
//! Works with any tool exposing xdotool-style `keydown`/`keyup`
//! subcommands taking a keysym. Spawning one short-lived process per key
//! action is slow by injection-library standards but well within the
//! typing cadence this crate emits at.

use crate::{
    error::{EmitError, Result},
    traits::{Key, KeySink},
};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::trace;

/// Configuration for the tool-backed key sink.
#[derive(Debug, Clone)]
pub struct CommandSinkConfig {
    /// Injection executable.
    pub program: PathBuf,

    /// Subcommand simulating a key press.
    pub press_subcommand: String,

    /// Subcommand simulating a key release.
    pub release_subcommand: String,
}

impl Default for CommandSinkConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("xdotool"),
            press_subcommand: "keydown".to_string(),
            release_subcommand: "keyup".to_string(),
        }
    }
}

/// Key sink that shells out to an injection tool per key action.
///
/// # Examples
///
/// ```no_run
/// use taptype_input::{CommandSink, CommandSinkConfig, Key, KeySink};
///
/// # async fn example() -> taptype_input::Result<()> {
/// let mut sink = CommandSink::new(CommandSinkConfig::default());
/// sink.press(Key::Char('A')).await?;
/// sink.release(Key::Char('A')).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CommandSink {
    config: CommandSinkConfig,
}

impl CommandSink {
    /// Create a new tool-backed sink.
    pub fn new(config: CommandSinkConfig) -> Self {
        Self { config }
    }

    async fn run(&self, subcommand: &str, key: Key) -> Result<()> {
        let program = self.config.program.display().to_string();
        trace!(%program, subcommand, key = %key.keysym(), "injection tool call");

        let output = Command::new(&self.config.program)
            .arg(subcommand)
            .arg(key.keysym())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|error| EmitError::spawn_failed(program.clone(), error.to_string()))?;

        if !output.status.success() {
            return Err(EmitError::tool_failed(program, output.status.to_string()));
        }
        Ok(())
    }
}

impl KeySink for CommandSink {
    async fn press(&mut self, key: Key) -> Result<()> {
        let subcommand = self.config.press_subcommand.clone();
        self.run(&subcommand, key).await
    }

    async fn release(&mut self, key: Key) -> Result<()> {
        let subcommand = self.config.release_subcommand.clone();
        self.run(&subcommand, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(program: &str) -> CommandSinkConfig {
        CommandSinkConfig {
            program: PathBuf::from(program),
            // `true`/`false` ignore their arguments; only the exit status matters here.
            press_subcommand: "keydown".to_string(),
            release_subcommand: "keyup".to_string(),
        }
    }

    #[tokio::test]
    async fn test_successful_tool_run() {
        let mut sink = CommandSink::new(config_for("true"));
        sink.press(Key::Char('A')).await.unwrap();
        sink.release(Key::Char('A')).await.unwrap();
    }

    #[tokio::test]
    async fn test_tool_failure_is_reported() {
        let mut sink = CommandSink::new(config_for("false"));
        let error = sink.press(Key::Enter).await.unwrap_err();
        assert!(matches!(error, EmitError::ToolFailed { .. }));
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported() {
        let mut sink = CommandSink::new(config_for("definitely-not-an-injection-tool"));
        let error = sink.press(Key::Char('0')).await.unwrap_err();
        assert!(matches!(error, EmitError::SpawnFailed { .. }));
    }
}
