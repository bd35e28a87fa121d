//! TapType binary: bridge a contactless tag reader to keyboard input.
//!
//! Wires a reader backend to an injection sink and runs the scan loop
//! until Ctrl-C. Every option has an environment-variable fallback so the
//! tool can run unattended (e.g. from a udev rule or a session autostart).

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use taptype_core::constants::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_KEY_DELAY_MS, DEFAULT_POLL_TIMEOUT_MS, DEFAULT_SETTLE_MS,
};
use taptype_engine::{ScanLoop, ScanLoopConfig};
use taptype_input::{AnyKeySink, CommandSink, CommandSinkConfig, EmitterConfig, KeystrokeEmitter};
use taptype_reader::{AnyTransport, CommandConfig, CommandTransport};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Reader backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Poll a reader-control tool subprocess (proxmark3 and compatibles).
    Command,

    /// Subscribe to PC/SC card insertion/removal events.
    Pcsc,
}

/// Keystroke injection mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Typer {
    /// Drive an external injection tool (xdotool-style keydown/keyup).
    Tool,

    /// Inject through the platform input API.
    Native,
}

/// Read a contactless tag UID and type it into the focused application.
#[derive(Debug, Parser)]
#[command(name = "taptype", version, about)]
struct Args {
    /// Reader backend.
    #[arg(long, value_enum, default_value = "command", env = "TAPTYPE_BACKEND")]
    backend: Backend,

    /// Reader-control executable (command backend).
    #[arg(long, default_value = "proxmark3", env = "TAPTYPE_PROGRAM")]
    program: PathBuf,

    /// Reader device port (command backend).
    #[arg(long, default_value = "/dev/ttyACM0", env = "TAPTYPE_DEVICE")]
    device: String,

    /// Command script piped to the tool; `quit` is appended.
    #[arg(long, default_value = "hf 14a reader", env = "TAPTYPE_SCRIPT")]
    script: String,

    /// PC/SC reader name substring (pcsc backend; first reader if omitted).
    #[arg(long, env = "TAPTYPE_READER")]
    reader: Option<String>,

    /// Hard bound on a single poll, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_POLL_TIMEOUT_MS, env = "TAPTYPE_POLL_TIMEOUT_MS")]
    poll_timeout_ms: u64,

    /// Fixed delay between poll cycles, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS, env = "TAPTYPE_DEBOUNCE_MS")]
    debounce_ms: u64,

    /// Delay between typed characters, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_KEY_DELAY_MS, env = "TAPTYPE_KEY_DELAY_MS")]
    key_delay_ms: u64,

    /// Pause before the terminating Enter, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_SETTLE_MS, env = "TAPTYPE_SETTLE_MS")]
    settle_ms: u64,

    /// Keystroke injection mechanism.
    #[arg(long, value_enum, default_value = "tool", env = "TAPTYPE_TYPER")]
    typer: Typer,

    /// Injection tool executable (tool typer).
    #[arg(long, default_value = "xdotool", env = "TAPTYPE_TYPER_PROGRAM")]
    typer_program: PathBuf,
}

fn build_transport(args: &Args) -> Result<AnyTransport> {
    match args.backend {
        Backend::Command => {
            let config = CommandConfig {
                program: args.program.clone(),
                device: Some(args.device.clone()),
                script: format!("{}\nquit\n", args.script.trim_end()),
            };
            let transport =
                CommandTransport::new(config).context("command backend initialization failed")?;
            Ok(AnyTransport::Command(transport))
        }
        Backend::Pcsc => build_pcsc(args),
    }
}

#[cfg(feature = "pcsc")]
fn build_pcsc(args: &Args) -> Result<AnyTransport> {
    use taptype_reader::{PcscConfig, PcscTransport};

    let config = PcscConfig {
        reader_name: args.reader.clone(),
        ..PcscConfig::default()
    };
    let transport = PcscTransport::new(config).context("pcsc backend initialization failed")?;
    Ok(AnyTransport::Pcsc(transport))
}

#[cfg(not(feature = "pcsc"))]
fn build_pcsc(_args: &Args) -> Result<AnyTransport> {
    anyhow::bail!("this build does not include the pcsc backend; rebuild with `--features pcsc`")
}

fn build_sink(args: &Args) -> Result<AnyKeySink> {
    match args.typer {
        Typer::Tool => Ok(AnyKeySink::Command(CommandSink::new(CommandSinkConfig {
            program: args.typer_program.clone(),
            ..CommandSinkConfig::default()
        }))),
        Typer::Native => build_native_sink(),
    }
}

#[cfg(feature = "enigo")]
fn build_native_sink() -> Result<AnyKeySink> {
    use taptype_input::EnigoSink;

    let sink = EnigoSink::new().context("native injection initialization failed")?;
    Ok(AnyKeySink::Native(sink))
}

#[cfg(not(feature = "enigo"))]
fn build_native_sink() -> Result<AnyKeySink> {
    anyhow::bail!("this build does not include native injection; rebuild with `--features enigo`")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let transport = build_transport(&args)?;
    let emitter = KeystrokeEmitter::new(
        build_sink(&args)?,
        EmitterConfig {
            key_delay: Duration::from_millis(args.key_delay_ms),
            settle_delay: Duration::from_millis(args.settle_ms),
        },
    );
    let config = ScanLoopConfig {
        poll_timeout: Duration::from_millis(args.poll_timeout_ms),
        debounce: Duration::from_millis(args.debounce_ms),
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            let _ = shutdown_tx.send(true);
        }
    });

    let mut scan_loop = ScanLoop::new(transport, emitter, config);
    scan_loop
        .run(shutdown_rx)
        .await
        .context("scan loop terminated")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["taptype"]);
        assert_eq!(args.backend, Backend::Command);
        assert_eq!(args.typer, Typer::Tool);
        assert_eq!(args.poll_timeout_ms, 1400);
        assert_eq!(args.debounce_ms, 300);
    }

    #[test]
    fn test_backend_selection() {
        let args = Args::parse_from(["taptype", "--backend", "pcsc", "--reader", "ACR122"]);
        assert_eq!(args.backend, Backend::Pcsc);
        assert_eq!(args.reader.as_deref(), Some("ACR122"));
    }
}
