//! Reader transport trait definitions.
//!
//! The [`TagTransport`] trait is the contract between the dedup loop and
//! whatever reaches the physical reader. Implementations answer one
//! question per call: "what did the reader see within this time bound?"
//!
//! All traits use native `async fn` methods (Edition 2024 RPITIT), so no
//! `async_trait` macro is needed.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use std::time::Duration;
use taptype_core::constants::{SW1_SUCCESS, SW2_SUCCESS};

/// An APDU response from a card.
///
/// `data` carries the response payload; `sw1`/`sw2` are the status word.
/// For the get-UID command the payload is the UID itself when the status
/// word is `90 00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduResponse {
    /// Response data bytes.
    pub data: Vec<u8>,

    /// First status byte.
    pub sw1: u8,

    /// Second status byte.
    pub sw2: u8,
}

impl ApduResponse {
    /// Create a new APDU response.
    pub fn new(data: Vec<u8>, sw1: u8, sw2: u8) -> Self {
        Self { data, sw1, sw2 }
    }

    /// Whether the status word signals success (`90 00`).
    ///
    /// # Examples
    ///
    /// ```
    /// use taptype_reader::ApduResponse;
    ///
    /// assert!(ApduResponse::new(vec![0x04], 0x90, 0x00).is_success());
    /// assert!(!ApduResponse::new(vec![], 0x6A, 0x82).is_success());
    /// ```
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.sw1 == SW1_SUCCESS && self.sw2 == SW2_SUCCESS
    }
}

/// Raw reader output, before UID extraction.
///
/// The two backend families produce differently shaped output; the
/// extractor in [`crate::extract`] understands both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCapture {
    /// Combined textual output of a reader-control tool invocation.
    Text(String),

    /// APDU response from an event-backed card connection.
    Apdu(ApduResponse),
}

/// Outcome of a single transport poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// The reader produced output (which may or may not contain a UID).
    Capture(RawCapture),

    /// The tag left the field.
    ///
    /// Only the event-backed transport can observe removals; the
    /// command-backed one never yields this variant.
    Removed,

    /// Nothing happened within the time bound.
    Timeout,
}

/// Transport metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportInfo {
    /// Human-readable transport name (e.g. the tool path or reader name).
    pub name: String,

    /// Backend kind (`"command"`, `"pcsc"`, `"mock"`).
    pub backend: &'static str,
}

impl TransportInfo {
    /// Create new transport metadata.
    pub fn new(name: impl Into<String>, backend: &'static str) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }
}

/// Reader transport abstraction.
///
/// One poll asks the underlying reader interface what it currently sees,
/// bounded by `timeout`. Expected outcomes (tag output, nothing, removal)
/// arrive as [`PollEvent`]s; only genuine failures are errors, classified
/// transient or fatal by [`TransportError::is_fatal`].
///
/// # Object Safety and Dynamic Dispatch
///
/// Native `async fn` methods return opaque futures, so this trait is NOT
/// object-safe: `Box<dyn TagTransport>` does not compile. Use generic type
/// parameters, or the [`AnyTransport`](crate::devices::AnyTransport) enum
/// wrapper for runtime backend selection.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use taptype_reader::{PollEvent, TagTransport, extract};
///
/// async fn next_uid<T: TagTransport>(transport: &mut T) -> taptype_reader::Result<()> {
///     match transport.poll(Duration::from_millis(1400)).await? {
///         PollEvent::Capture(raw) => {
///             if let Some(uid) = extract(&raw) {
///                 println!("tag present: {uid}");
///             }
///         }
///         PollEvent::Removed => println!("tag removed"),
///         PollEvent::Timeout => {}
///     }
///     Ok(())
/// }
/// ```
///
/// [`TransportError::is_fatal`]: crate::error::TransportError::is_fatal
pub trait TagTransport: Send + Sync {
    /// Poll the reader once, bounded by `timeout`.
    ///
    /// Implementations must guarantee the call returns within the bound
    /// (plus scheduling slack); a hung device yields [`PollEvent::Timeout`],
    /// never an indefinite await.
    ///
    /// # Errors
    ///
    /// Returns an error if the poll itself failed (as opposed to finding no
    /// tag). Fatal errors mean no future poll can succeed.
    async fn poll(&mut self, timeout: Duration) -> Result<PollEvent>;

    /// Get transport metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    async fn describe(&self) -> Result<TransportInfo>;
}
