//! Keystroke emission for the TapType tag-to-keyboard bridge.
//!
//! Given a normalized UID, this crate types it into whatever application
//! currently has input focus: one key-down/key-up pair per character with a
//! small inter-key delay, a settle pause, then a terminating Enter. The
//! injection side effect is entirely external; nothing here verifies that
//! the focused field actually received the text.
//!
//! # Design
//!
//! The typing *policy* (ordering and delays) lives in [`KeystrokeEmitter`]
//! and is identical across injection backends. The injection *mechanism*
//! is the [`KeySink`] trait:
//!
//! - [`CommandSink`] drives an external injection tool (xdotool-style
//!   keydown/keyup subcommands).
//! - `EnigoSink` (feature `enigo`) injects through the platform input
//!   API directly.
//! - [`CapturingSink`] records the action sequence for assertions; the
//!   injection side effect is untestable through the real sinks.

pub mod devices;
pub mod emitter;
pub mod error;
pub mod mock;
pub mod traits;

pub mod command;
#[cfg(feature = "enigo")]
pub mod system;

// Re-export commonly used types for convenience
pub use command::{CommandSink, CommandSinkConfig};
pub use devices::AnyKeySink;
pub use emitter::{EmitterConfig, KeystrokeEmitter};
pub use error::{EmitError, Result};
pub use mock::{CapturedKeys, CapturingSink};
#[cfg(feature = "enigo")]
pub use system::EnigoSink;
pub use traits::{Key, KeyAction, KeySink};
