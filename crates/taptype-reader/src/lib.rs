//! Reader transport layer for the TapType tag-to-keyboard bridge.
//!
//! This crate abstracts "ask the reader what tag is present" behind the
//! [`TagTransport`] trait and provides the supported backends plus the UID
//! extractor that turns raw reader output into a normalized [`Uid`].
//!
//! # Design
//!
//! The reader hardware is a black box reached through one of two vendor
//! interfaces, both honored behind the same polling contract:
//!
//! - [`CommandTransport`] invokes a reader-control executable per poll and
//!   captures its combined output as text.
//! - `PcscTransport` (feature `pcsc`) subscribes to card insertion and
//!   removal notifications from the PC/SC service and transmits a get-UID
//!   APDU on each insertion.
//!
//! Every poll is bounded by a hard timeout so an unresponsive device can
//! never stall the caller. All trait methods use native `async fn`
//! (Edition 2024 RPITIT); for dynamic backend selection use the
//! [`AnyTransport`] enum wrapper, since the trait itself is not object-safe.
//!
//! ```text
//! CommandTransport ──┐
//! PcscTransport    ──┼──► PollEvent ──► extract() ──► Option<Uid>
//! MockTransport    ──┘
//! ```
//!
//! # Testing
//!
//! [`MockTransport`] presents captures, removals, and injected faults
//! programmatically, so the dedup loop and the extractor can be exercised
//! without hardware.
//!
//! [`Uid`]: taptype_core::Uid

pub mod devices;
pub mod error;
pub mod extract;
pub mod mock;
pub mod traits;

pub mod command;
#[cfg(feature = "pcsc")]
pub mod pcsc;

// Re-export commonly used types for convenience
pub use command::{CommandConfig, CommandTransport};
pub use devices::AnyTransport;
pub use error::{Result, TransportError};
pub use extract::extract;
pub use mock::{MockTransport, MockTransportHandle};
#[cfg(feature = "pcsc")]
pub use pcsc::{PcscConfig, PcscTransport};
pub use traits::{ApduResponse, PollEvent, RawCapture, TagTransport, TransportInfo};
