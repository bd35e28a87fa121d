//! Event-backed reader transport over PC/SC.
//!
//! A dedicated listener thread watches the card service for state changes
//! on one reader. On insertion it connects to the card (bounded attempts —
//! a freshly inserted card that is not ready resolves within a retry or
//! two, or not at all), transmits the get-UID APDU, and forwards the
//! response. On removal it forwards an explicit removal notification,
//! which the dedup loop uses to allow identical re-presentation to
//! re-trigger.
//!
//! The thread hands everything off through a bounded channel to the single
//! polling consumer, so concurrent insertions cannot race on loop state.
//! [`TagTransport::poll`] awaits the next event under the caller's timeout,
//! honoring the same contract as the command-backed variant.

use crate::{
    error::{Result, TransportError},
    traits::{ApduResponse, PollEvent, RawCapture, TagTransport, TransportInfo},
};
use pcsc::{Context, Protocols, ReaderState, Scope, ShareMode, State};
use std::ffi::{CStr, CString};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use taptype_core::constants::{
    CONNECT_ATTEMPTS, CONNECT_RETRY_DELAY_MS, GET_UID_APDU,
};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Configuration for the PC/SC event-backed transport.
#[derive(Debug, Clone)]
pub struct PcscConfig {
    /// Substring of the reader name to attach to; first reader when `None`.
    pub reader_name: Option<String>,

    /// Card-connection attempts per insertion before giving up.
    pub connect_attempts: u32,

    /// Delay between card-connection attempts.
    pub connect_retry_delay: Duration,

    /// Granularity of the listener's status-change wait.
    ///
    /// Also bounds how long the listener takes to observe shutdown.
    pub status_interval: Duration,
}

impl Default for PcscConfig {
    fn default() -> Self {
        Self {
            reader_name: None,
            connect_attempts: CONNECT_ATTEMPTS,
            connect_retry_delay: Duration::from_millis(CONNECT_RETRY_DELAY_MS),
            status_interval: Duration::from_millis(500),
        }
    }
}

/// Event forwarded from the listener thread to the polling consumer.
#[derive(Debug)]
enum ListenerEvent {
    Inserted(ApduResponse),
    Removed,
    Fault(TransportError),
}

/// Reader transport backed by PC/SC card-presence notifications.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use taptype_reader::{PcscConfig, PcscTransport, TagTransport};
///
/// # async fn example() -> taptype_reader::Result<()> {
/// let mut transport = PcscTransport::new(PcscConfig::default())?;
/// let event = transport.poll(Duration::from_millis(1400)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PcscTransport {
    event_rx: mpsc::Receiver<ListenerEvent>,
    reader_name: String,
    stop: Arc<AtomicBool>,
}

impl PcscTransport {
    /// Create a new PC/SC transport and start its listener thread.
    ///
    /// # Errors
    ///
    /// Returns a fatal `TransportError::ServiceUnavailable` if the card
    /// service cannot be reached, no reader is attached, or no attached
    /// reader matches the configured name.
    pub fn new(config: PcscConfig) -> Result<Self> {
        let context = Context::establish(Scope::User)
            .map_err(|error| TransportError::service_unavailable(error.to_string()))?;

        // Resolve the reader up front so a bad setup fails at startup,
        // not on the first poll.
        let mut buffer = vec![0u8; 2048];
        let names: Vec<CString> = context
            .list_readers(&mut buffer)
            .map_err(|error| TransportError::service_unavailable(error.to_string()))?
            .map(CString::from)
            .collect();

        let reader = match &config.reader_name {
            Some(wanted) => names
                .iter()
                .find(|name| name.to_string_lossy().contains(wanted.as_str()))
                .cloned()
                .ok_or_else(|| {
                    TransportError::service_unavailable(format!(
                        "no attached reader matches '{wanted}'"
                    ))
                })?,
            None => names.first().cloned().ok_or_else(|| {
                TransportError::service_unavailable("no readers attached")
            })?,
        };

        let reader_name = reader.to_string_lossy().into_owned();
        let (event_tx, event_rx) = mpsc::channel(32);
        let stop = Arc::new(AtomicBool::new(false));

        std::thread::Builder::new()
            .name("pcsc-listener".to_string())
            .spawn({
                let stop = Arc::clone(&stop);
                move || listen(context, reader, config, stop, event_tx)
            })?;

        Ok(Self {
            event_rx,
            reader_name,
            stop,
        })
    }

    /// Name of the reader being watched.
    pub fn reader_name(&self) -> &str {
        &self.reader_name
    }
}

impl Drop for PcscTransport {
    fn drop(&mut self) {
        // The listener observes the flag within one status interval.
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl TagTransport for PcscTransport {
    async fn poll(&mut self, timeout: Duration) -> Result<PollEvent> {
        match tokio::time::timeout(timeout, self.event_rx.recv()).await {
            Err(_elapsed) => Ok(PollEvent::Timeout),
            Ok(None) => Err(TransportError::ChannelClosed),
            Ok(Some(ListenerEvent::Inserted(response))) => {
                Ok(PollEvent::Capture(RawCapture::Apdu(response)))
            }
            Ok(Some(ListenerEvent::Removed)) => Ok(PollEvent::Removed),
            Ok(Some(ListenerEvent::Fault(error))) => Err(error),
        }
    }

    async fn describe(&self) -> Result<TransportInfo> {
        Ok(TransportInfo::new(self.reader_name.clone(), "pcsc"))
    }
}

/// Listener thread body: watch one reader, forward insertions and removals.
fn listen(
    context: Context,
    reader: CString,
    config: PcscConfig,
    stop: Arc<AtomicBool>,
    events: mpsc::Sender<ListenerEvent>,
) {
    let mut states = [ReaderState::new(reader.clone(), State::UNAWARE)];
    let mut was_present = false;

    while !stop.load(Ordering::Relaxed) {
        match context.get_status_change(config.status_interval, &mut states) {
            Ok(()) => {}
            Err(pcsc::Error::Timeout) => continue,
            Err(error) => {
                warn!(%error, "card service status wait failed");
                let fault = TransportError::service_unavailable(error.to_string());
                let _ = events.blocking_send(ListenerEvent::Fault(fault));
                return;
            }
        }

        let present = states[0].event_state().contains(State::PRESENT);
        if present && !was_present {
            debug!(reader = %reader.to_string_lossy(), "card inserted");
            let event = match read_uid(&context, &reader, &config) {
                Ok(response) => ListenerEvent::Inserted(response),
                Err(error) => ListenerEvent::Fault(error),
            };
            if events.blocking_send(event).is_err() {
                return; // consumer gone
            }
        } else if !present && was_present {
            debug!(reader = %reader.to_string_lossy(), "card removed");
            if events.blocking_send(ListenerEvent::Removed).is_err() {
                return;
            }
        }
        was_present = present;
        states[0].sync_current_state();
    }
}

/// Connect to the inserted card and transmit the get-UID APDU.
fn read_uid(context: &Context, reader: &CStr, config: &PcscConfig) -> Result<ApduResponse> {
    let mut last_error = String::new();

    for attempt in 1..=config.connect_attempts {
        match context.connect(reader, ShareMode::Shared, Protocols::ANY) {
            Ok(card) => {
                let mut buffer = [0u8; pcsc::MAX_BUFFER_SIZE];
                let response = card
                    .transmit(&GET_UID_APDU, &mut buffer)
                    .map_err(|error| TransportError::card_read(error.to_string()))?;

                if response.len() < 2 {
                    return Err(TransportError::card_read(format!(
                        "short APDU response ({} bytes)",
                        response.len()
                    )));
                }

                let (data, status) = response.split_at(response.len() - 2);
                return Ok(ApduResponse::new(data.to_vec(), status[0], status[1]));
            }
            Err(error) => {
                trace!(attempt, %error, "card not ready");
                last_error = error.to_string();
                std::thread::sleep(config.connect_retry_delay);
            }
        }
    }

    Err(TransportError::connect_failed(
        config.connect_attempts,
        last_error,
    ))
}
