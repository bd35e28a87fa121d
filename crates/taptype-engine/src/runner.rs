//! The scan loop: poll, extract, dedup, emit, sleep, repeat.

use crate::{error::Result, state::DedupState};
use std::time::Duration;
use taptype_core::constants::{DEFAULT_DEBOUNCE_MS, DEFAULT_POLL_TIMEOUT_MS};
use taptype_input::{KeySink, KeystrokeEmitter};
use taptype_reader::{PollEvent, RawCapture, TagTransport, extract};
use tokio::sync::watch;
use tracing::{debug, error, info, trace, warn};

/// Timing configuration for the scan loop.
#[derive(Debug, Clone)]
pub struct ScanLoopConfig {
    /// Hard bound on a single transport poll.
    pub poll_timeout: Duration,

    /// Fixed delay between poll cycles.
    ///
    /// A polling cadence, not a backoff: the same delay applies after
    /// captures, timeouts, and transient failures alike.
    pub debounce: Duration,
}

impl Default for ScanLoopConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

/// Drives one transport and one emitter until shutdown.
///
/// The loop owns its [`DedupState`]; every transition runs on the task
/// calling [`run`](ScanLoop::run), so there is a single writer by
/// construction.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taptype_engine::{ScanLoop, ScanLoopConfig};
/// use taptype_input::{CapturingSink, KeystrokeEmitter};
/// use taptype_reader::MockTransport;
/// use tokio::sync::watch;
///
/// #[tokio::main]
/// async fn main() -> taptype_engine::Result<()> {
///     let (transport, reader) = MockTransport::new();
///     let (sink, _keys) = CapturingSink::new();
///     let emitter = KeystrokeEmitter::with_defaults(sink);
///
///     let config = ScanLoopConfig {
///         poll_timeout: Duration::from_millis(50),
///         debounce: Duration::from_millis(5),
///     };
///     let mut scan_loop = ScanLoop::new(transport, emitter, config);
///
///     let (shutdown_tx, shutdown_rx) = watch::channel(false);
///     reader.present_text("[+]  UID: 04 A3 FF 21").await.unwrap();
///     shutdown_tx.send(true).unwrap();
///
///     scan_loop.run(shutdown_rx).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ScanLoop<T: TagTransport, S: KeySink> {
    transport: T,
    emitter: KeystrokeEmitter<S>,
    state: DedupState,
    config: ScanLoopConfig,
    events_emitted: u64,
}

impl<T: TagTransport, S: KeySink> ScanLoop<T, S> {
    /// Create a scan loop over `transport` and `emitter`.
    pub fn new(transport: T, emitter: KeystrokeEmitter<S>, config: ScanLoopConfig) -> Self {
        Self {
            transport,
            emitter,
            state: DedupState::new(),
            config,
            events_emitted: 0,
        }
    }

    /// Number of scan events accepted so far.
    #[must_use]
    pub fn events_emitted(&self) -> u64 {
        self.events_emitted
    }

    /// The dedup state, for inspection.
    #[must_use]
    pub fn state(&self) -> &DedupState {
        &self.state
    }

    /// Run until `shutdown` flips to `true` or a fatal transport failure.
    ///
    /// Per cycle: one bounded poll, then extraction, dedup, and (for a new
    /// UID) emission, then the fixed debounce sleep. Shutdown is observed
    /// at the top of the cycle and during the sleep; an in-flight poll is
    /// bounded by the poll timeout.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Transport` on a fatal transport failure.
    /// Transient failures, extraction misses, and emission failures are
    /// logged and the loop continues.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let info = self.transport.describe().await.map_err(|error| {
            error!(%error, "transport unavailable");
            error
        })?;
        info!(name = %info.name, backend = info.backend, "scan loop started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            match self.transport.poll(self.config.poll_timeout).await {
                Ok(PollEvent::Capture(raw)) => self.handle_capture(raw).await,
                Ok(PollEvent::Removed) => {
                    debug!("tag left the field");
                    self.state.card_removed();
                }
                Ok(PollEvent::Timeout) => trace!("poll timed out"),
                Err(e) if e.is_fatal() => {
                    error!(error = %e, "fatal transport failure, stopping");
                    return Err(e.into());
                }
                Err(e) => warn!(error = %e, "transient transport failure, will retry"),
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.debounce) => {}
                changed = shutdown.changed() => {
                    // A dropped sender counts as shutdown.
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!(events = self.events_emitted, "scan loop stopped");
        Ok(())
    }

    async fn handle_capture(&mut self, raw: RawCapture) {
        let Some(uid) = extract(&raw) else {
            trace!("no tag in capture");
            return;
        };

        let Some(event) = self.state.observe(uid) else {
            trace!("duplicate read suppressed");
            return;
        };

        info!(uid = %event.uid, event_id = %event.id, "new tag observed");
        self.events_emitted += 1;

        // Never retried and never fatal: the next presentation gets a
        // fresh attempt.
        if let Err(error) = self.emitter.emit(&event.uid).await {
            warn!(%error, uid = %event.uid, "keystroke emission failed");
        }
    }
}
