//! Mock reader transport for testing and development.
//!
//! The mock is controlled through a handle that presents captures,
//! removals, and injected faults programmatically, so the extractor and
//! the dedup loop can be exercised without hardware.

use crate::{
    error::{Result, TransportError},
    traits::{ApduResponse, PollEvent, RawCapture, TagTransport, TransportInfo},
};
use std::time::Duration;
use tokio::sync::mpsc;

/// Event queued by a [`MockTransportHandle`].
#[derive(Debug)]
enum MockEvent {
    Capture(RawCapture),
    Removed,
    Fault(TransportError),
}

/// Mock reader transport.
///
/// Created together with its controlling handle; a poll yields whatever the
/// handle queued, or [`PollEvent::Timeout`] once the queue stays empty for
/// the poll bound.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taptype_reader::{MockTransport, PollEvent, TagTransport, extract};
///
/// #[tokio::main]
/// async fn main() -> taptype_reader::Result<()> {
///     let (mut transport, handle) = MockTransport::new();
///
///     handle.present_text("[+]  UID: 04 A3 FF 21").await?;
///
///     let PollEvent::Capture(raw) = transport.poll(Duration::from_secs(1)).await? else {
///         panic!("expected capture");
///     };
///     assert_eq!(extract(&raw).unwrap().as_str(), "04A3FF21");
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockTransport {
    event_rx: mpsc::Receiver<MockEvent>,
    name: String,
}

impl MockTransport {
    /// Create a mock transport with the default name.
    pub fn new() -> (Self, MockTransportHandle) {
        Self::with_name("Mock Reader".to_string())
    }

    /// Create a mock transport with a custom name.
    pub fn with_name(name: String) -> (Self, MockTransportHandle) {
        let (event_tx, event_rx) = mpsc::channel(32);

        let transport = Self {
            event_rx,
            name: name.clone(),
        };
        let handle = MockTransportHandle { event_tx, name };

        (transport, handle)
    }
}

impl TagTransport for MockTransport {
    async fn poll(&mut self, timeout: Duration) -> Result<PollEvent> {
        match tokio::time::timeout(timeout, self.event_rx.recv()).await {
            Err(_elapsed) => Ok(PollEvent::Timeout),
            Ok(None) => Err(TransportError::ChannelClosed),
            Ok(Some(MockEvent::Capture(raw))) => Ok(PollEvent::Capture(raw)),
            Ok(Some(MockEvent::Removed)) => Ok(PollEvent::Removed),
            Ok(Some(MockEvent::Fault(error))) => Err(error),
        }
    }

    async fn describe(&self) -> Result<TransportInfo> {
        Ok(TransportInfo::new(self.name.clone(), "mock"))
    }
}

/// Handle for controlling a [`MockTransport`].
#[derive(Debug, Clone)]
pub struct MockTransportHandle {
    event_tx: mpsc::Sender<MockEvent>,
    name: String,
}

impl MockTransportHandle {
    /// Queue a textual capture, as the command backend would produce.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ChannelClosed` if the transport was dropped.
    pub async fn present_text(&self, text: impl Into<String>) -> Result<()> {
        self.send(MockEvent::Capture(RawCapture::Text(text.into())))
            .await
    }

    /// Queue an APDU capture, as the event backend would produce.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ChannelClosed` if the transport was dropped.
    pub async fn present_apdu(&self, data: Vec<u8>, sw1: u8, sw2: u8) -> Result<()> {
        self.send(MockEvent::Capture(RawCapture::Apdu(ApduResponse::new(
            data, sw1, sw2,
        ))))
        .await
    }

    /// Queue a removal notification.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ChannelClosed` if the transport was dropped.
    pub async fn remove_card(&self) -> Result<()> {
        self.send(MockEvent::Removed).await
    }

    /// Queue a transport fault for the next poll to return.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::ChannelClosed` if the transport was dropped.
    pub async fn fail(&self, error: TransportError) -> Result<()> {
        self.send(MockEvent::Fault(error)).await
    }

    /// Get the transport name.
    pub fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, event: MockEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .await
            .map_err(|_| TransportError::ChannelClosed)
    }
}
