//! Typing policy: UID characters, settle pause, terminating Enter.

use crate::{
    error::Result,
    traits::{Key, KeySink},
};
use std::time::Duration;
use taptype_core::{
    Uid,
    constants::{DEFAULT_KEY_DELAY_MS, DEFAULT_SETTLE_MS},
};
use tracing::debug;

/// Timing configuration for keystroke emission.
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Delay after each typed character.
    ///
    /// Target applications assume human-ish input rates; typing without a
    /// delay drops characters in some browsers.
    pub key_delay: Duration,

    /// Pause before the terminating Enter, letting the field settle.
    pub settle_delay: Duration,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            key_delay: Duration::from_millis(DEFAULT_KEY_DELAY_MS),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_MS),
        }
    }
}

/// Types a UID into the focused application through a [`KeySink`].
///
/// For each UID character: press, release, wait `key_delay`. After the
/// last character: wait `settle_delay`, then press and release Enter.
/// A failed injection call aborts the sequence and is reported to the
/// caller; there are no retries.
///
/// # Examples
///
/// ```
/// use taptype_core::Uid;
/// use taptype_input::{CapturingSink, EmitterConfig, KeystrokeEmitter};
///
/// #[tokio::main]
/// async fn main() -> taptype_input::Result<()> {
///     let (sink, keys) = CapturingSink::new();
///     let mut emitter = KeystrokeEmitter::new(sink, EmitterConfig {
///         key_delay: std::time::Duration::ZERO,
///         settle_delay: std::time::Duration::ZERO,
///     });
///
///     emitter.emit(&Uid::parse("04A3FF21").unwrap()).await?;
///     assert_eq!(keys.taps(), "04A3FF21⏎");
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct KeystrokeEmitter<S: KeySink> {
    sink: S,
    config: EmitterConfig,
}

impl<S: KeySink> KeystrokeEmitter<S> {
    /// Create an emitter over `sink` with the given timing.
    pub fn new(sink: S, config: EmitterConfig) -> Self {
        Self { sink, config }
    }

    /// Create an emitter with the reference timing budgets.
    pub fn with_defaults(sink: S) -> Self {
        Self::new(sink, EmitterConfig::default())
    }

    /// Type `uid` followed by Enter into the focused application.
    ///
    /// # Errors
    ///
    /// Returns the first injection failure; keys already typed are not
    /// undone (there is no way to).
    pub async fn emit(&mut self, uid: &Uid) -> Result<()> {
        debug!(%uid, "typing UID");

        for c in uid.as_str().chars() {
            self.tap(Key::Char(c)).await?;
            tokio::time::sleep(self.config.key_delay).await;
        }

        // Let the receiving field settle before submitting.
        tokio::time::sleep(self.config.settle_delay).await;
        self.tap(Key::Enter).await?;

        Ok(())
    }

    /// Get the sink back, consuming the emitter.
    pub fn into_sink(self) -> S {
        self.sink
    }

    async fn tap(&mut self, key: Key) -> Result<()> {
        self.sink.press(key).await?;
        self.sink.release(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::CapturingSink;
    use crate::traits::KeyAction;

    fn instant_config() -> EmitterConfig {
        EmitterConfig {
            key_delay: Duration::ZERO,
            settle_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_emit_types_chars_then_enter() {
        let (sink, keys) = CapturingSink::new();
        let mut emitter = KeystrokeEmitter::new(sink, instant_config());

        let uid = Uid::parse("04A3FF21").unwrap();
        emitter.emit(&uid).await.unwrap();

        let actions = keys.snapshot();
        // 8 characters + Enter, each a press/release pair
        assert_eq!(actions.len(), 18);

        for (i, c) in "04A3FF21".chars().enumerate() {
            assert_eq!(actions[2 * i], KeyAction::Press(Key::Char(c)));
            assert_eq!(actions[2 * i + 1], KeyAction::Release(Key::Char(c)));
        }
        assert_eq!(actions[16], KeyAction::Press(Key::Enter));
        assert_eq!(actions[17], KeyAction::Release(Key::Enter));
    }

    #[tokio::test]
    async fn test_emit_aborts_on_sink_failure() {
        let (sink, keys) = CapturingSink::failing_after(3);
        let mut emitter = KeystrokeEmitter::new(sink, instant_config());

        let uid = Uid::parse("04A3FF21").unwrap();
        assert!(emitter.emit(&uid).await.is_err());

        // The sequence stopped at the failure; Enter was never reached.
        assert!(keys.snapshot().len() < 18);
        assert!(
            !keys
                .snapshot()
                .contains(&KeyAction::Press(Key::Enter))
        );
    }

    #[tokio::test]
    async fn test_emit_repeated_uids_append() {
        let (sink, keys) = CapturingSink::new();
        let mut emitter = KeystrokeEmitter::new(sink, instant_config());

        let uid = Uid::parse("DEADBEEF").unwrap();
        emitter.emit(&uid).await.unwrap();
        emitter.emit(&uid).await.unwrap();

        assert_eq!(keys.taps(), "DEADBEEF⏎DEADBEEF⏎");
    }
}
