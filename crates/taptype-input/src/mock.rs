//! Capturing key sink for testing.
//!
//! Keyboard injection is inherently unverifiable through the real sinks,
//! so tests substitute [`CapturingSink`] and assert on the recorded action
//! sequence instead.

use crate::{
    error::{EmitError, Result},
    traits::{Key, KeyAction, KeySink},
};
use std::sync::{Arc, Mutex};

/// Key sink that records every action instead of injecting it.
///
/// Created together with a [`CapturedKeys`] handle for inspection.
///
/// # Examples
///
/// ```
/// use taptype_input::{CapturingSink, Key, KeySink};
///
/// #[tokio::main]
/// async fn main() -> taptype_input::Result<()> {
///     let (mut sink, keys) = CapturingSink::new();
///
///     sink.press(Key::Char('A')).await?;
///     sink.release(Key::Char('A')).await?;
///
///     assert_eq!(keys.snapshot().len(), 2);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct CapturingSink {
    actions: Arc<Mutex<Vec<KeyAction>>>,
    fail_after: Option<usize>,
}

impl CapturingSink {
    /// Create a sink that records every action.
    pub fn new() -> (Self, CapturedKeys) {
        Self::build(None)
    }

    /// Create a sink that fails once `succeed` actions have been recorded.
    ///
    /// Used to exercise abort-on-failure paths.
    pub fn failing_after(succeed: usize) -> (Self, CapturedKeys) {
        Self::build(Some(succeed))
    }

    fn build(fail_after: Option<usize>) -> (Self, CapturedKeys) {
        let actions = Arc::new(Mutex::new(Vec::new()));
        let sink = Self {
            actions: Arc::clone(&actions),
            fail_after,
        };
        (sink, CapturedKeys { actions })
    }

    fn record(&mut self, action: KeyAction) -> Result<()> {
        let mut actions = self.actions.lock().expect("capture lock poisoned");
        if let Some(limit) = self.fail_after {
            if actions.len() >= limit {
                return Err(EmitError::injection("simulated sink failure"));
            }
        }
        actions.push(action);
        Ok(())
    }
}

impl KeySink for CapturingSink {
    async fn press(&mut self, key: Key) -> Result<()> {
        self.record(KeyAction::Press(key))
    }

    async fn release(&mut self, key: Key) -> Result<()> {
        self.record(KeyAction::Release(key))
    }
}

/// Handle for inspecting actions recorded by a [`CapturingSink`].
#[derive(Debug, Clone)]
pub struct CapturedKeys {
    actions: Arc<Mutex<Vec<KeyAction>>>,
}

impl CapturedKeys {
    /// Copy of the recorded action sequence.
    #[must_use]
    pub fn snapshot(&self) -> Vec<KeyAction> {
        self.actions.lock().expect("capture lock poisoned").clone()
    }

    /// Compact rendering of the typed keys, one character per press.
    ///
    /// Enter renders as `⏎`; releases are elided. Useful for whole-sequence
    /// assertions.
    #[must_use]
    pub fn taps(&self) -> String {
        self.snapshot()
            .iter()
            .filter_map(|action| match action {
                KeyAction::Press(Key::Char(c)) => Some(*c),
                KeyAction::Press(Key::Enter) => Some('⏎'),
                KeyAction::Release(_) => None,
            })
            .collect()
    }

    /// Discard everything recorded so far.
    pub fn clear(&self) {
        self.actions.lock().expect("capture lock poisoned").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_capturing_sink_records_in_order() {
        let (mut sink, keys) = CapturingSink::new();

        sink.press(Key::Char('0')).await.unwrap();
        sink.release(Key::Char('0')).await.unwrap();
        sink.press(Key::Enter).await.unwrap();
        sink.release(Key::Enter).await.unwrap();

        assert_eq!(
            keys.snapshot(),
            vec![
                KeyAction::Press(Key::Char('0')),
                KeyAction::Release(Key::Char('0')),
                KeyAction::Press(Key::Enter),
                KeyAction::Release(Key::Enter),
            ]
        );
        assert_eq!(keys.taps(), "0⏎");
    }

    #[tokio::test]
    async fn test_failing_after_limit() {
        let (mut sink, keys) = CapturingSink::failing_after(1);

        sink.press(Key::Char('A')).await.unwrap();
        assert!(sink.release(Key::Char('A')).await.is_err());
        assert_eq!(keys.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let (mut sink, keys) = CapturingSink::new();
        sink.press(Key::Char('A')).await.unwrap();

        keys.clear();
        assert!(keys.snapshot().is_empty());
    }
}
