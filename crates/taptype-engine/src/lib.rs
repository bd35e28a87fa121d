//! Dedup/poll loop for the TapType tag-to-keyboard bridge.
//!
//! This crate ties the other layers together: it polls a reader transport,
//! extracts candidate UIDs, suppresses duplicate re-reads of the tag that
//! is already in range, and hands exactly one [`ScanEvent`] per distinct
//! presentation to the keystroke emitter.
//!
//! ```text
//! TagTransport ──poll──► RawCapture ──extract──► Uid
//!                                                 │
//!                              DedupState ◄───────┘
//!                                 │ (new UID only)
//!                                 ▼
//!                          KeystrokeEmitter
//! ```
//!
//! # Concurrency
//!
//! A single task owns everything. The poll blocks (bounded by its timeout),
//! then extraction, dedup, and emission run synchronously in sequence —
//! there are never overlapping polls, and [`DedupState`] has exactly one
//! writer. Event-backed transports deliver notifications from a listener
//! thread, but those arrive through a bounded channel consumed by this
//! same task, so insertion events cannot race on loop state.
//!
//! Cancellation is cooperative: a `tokio::sync::watch` shutdown signal is
//! observed between cycles and during the debounce sleep, so shutdown
//! latency is bounded by the poll timeout.
//!
//! [`ScanEvent`]: taptype_core::ScanEvent

pub mod error;
pub mod runner;
pub mod state;

pub use error::{EngineError, Result};
pub use runner::{ScanLoop, ScanLoopConfig};
pub use state::DedupState;
