//! Key sink trait definitions.
//!
//! A [`KeySink`] is the raw injection surface: press a key, release a key.
//! The typing policy (ordering, delays, terminating Enter) lives in
//! [`KeystrokeEmitter`](crate::emitter::KeystrokeEmitter) and is shared by
//! every sink.
//!
//! All traits use native `async fn` methods (Edition 2024 RPITIT).

#![allow(async_fn_in_trait)]

use crate::error::Result;
use std::fmt;

/// A key the emitter can simulate.
///
/// UIDs type with their hex characters plus a terminating Enter; nothing
/// else is ever injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character key.
    Char(char),

    /// The Enter/Return key used to submit the receiving field.
    Enter,
}

impl Key {
    /// X11 keysym name for the key, as injection tools expect it.
    ///
    /// # Examples
    ///
    /// ```
    /// use taptype_input::Key;
    ///
    /// assert_eq!(Key::Char('A').keysym(), "A");
    /// assert_eq!(Key::Enter.keysym(), "Return");
    /// ```
    #[must_use]
    pub fn keysym(&self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Enter => "Return".to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Enter => write!(f, "Enter"),
        }
    }
}

/// A single simulated key action, as recorded by the capturing sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key pressed down.
    Press(Key),

    /// Key released.
    Release(Key),
}

/// Keystroke injection abstraction.
///
/// Implementations inject into the globally focused application and have
/// no way to verify receipt; success means only that the injection call
/// itself succeeded.
///
/// Unlike the reader transports this trait does not require `Send + Sync`:
/// native injection handles are not thread-safe on every platform, and the
/// emitter is only ever driven from the single scan-loop task.
pub trait KeySink {
    /// Simulate pressing `key` down.
    ///
    /// # Errors
    ///
    /// Returns an error if the injection call fails.
    async fn press(&mut self, key: Key) -> Result<()>;

    /// Simulate releasing `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the injection call fails.
    async fn release(&mut self, key: Key) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_keysym() {
        assert_eq!(Key::Char('0').keysym(), "0");
        assert_eq!(Key::Char('F').keysym(), "F");
        assert_eq!(Key::Enter.keysym(), "Return");
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::Char('A').to_string(), "A");
        assert_eq!(Key::Enter.to_string(), "Enter");
    }
}
