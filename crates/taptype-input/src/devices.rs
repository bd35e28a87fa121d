//! Enum wrapper for key sink dispatch.
//!
//! Native `async fn` in traits (RPITIT) are not object-safe, so runtime
//! sink selection cannot use `Box<dyn KeySink>`. The enum wrapper keeps
//! concrete-type dispatch while letting a binary pick the injection
//! mechanism from configuration.

use crate::command::CommandSink;
use crate::mock::CapturingSink;
#[cfg(feature = "enigo")]
use crate::system::EnigoSink;
use crate::traits::{Key, KeySink};
use crate::Result;

/// Enum wrapper over the supported key sinks.
///
/// # Examples
///
/// ```
/// use taptype_input::{AnyKeySink, CapturingSink, Key, KeySink};
///
/// # async fn example() -> taptype_input::Result<()> {
/// let (sink, keys) = CapturingSink::new();
/// let mut sink = AnyKeySink::Capturing(sink);
///
/// sink.press(Key::Char('A')).await?;
/// sink.release(Key::Char('A')).await?;
/// assert_eq!(keys.snapshot().len(), 2);
/// # Ok(())
/// # }
/// ```
#[non_exhaustive]
pub enum AnyKeySink {
    /// External injection tool.
    Command(CommandSink),

    /// Native OS input injection.
    #[cfg(feature = "enigo")]
    Native(EnigoSink),

    /// Capturing sink for development and testing.
    Capturing(CapturingSink),
}

impl KeySink for AnyKeySink {
    async fn press(&mut self, key: Key) -> Result<()> {
        match self {
            Self::Command(sink) => sink.press(key).await,
            #[cfg(feature = "enigo")]
            Self::Native(sink) => sink.press(key).await,
            Self::Capturing(sink) => sink.press(key).await,
        }
    }

    async fn release(&mut self, key: Key) -> Result<()> {
        match self {
            Self::Command(sink) => sink.release(key).await,
            #[cfg(feature = "enigo")]
            Self::Native(sink) => sink.release(key).await,
            Self::Capturing(sink) => sink.release(key).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::KeyAction;

    #[tokio::test]
    async fn test_any_sink_capturing_dispatch() {
        let (sink, keys) = CapturingSink::new();
        let mut sink = AnyKeySink::Capturing(sink);

        sink.press(Key::Enter).await.unwrap();
        sink.release(Key::Enter).await.unwrap();

        assert_eq!(
            keys.snapshot(),
            vec![KeyAction::Press(Key::Enter), KeyAction::Release(Key::Enter)]
        );
    }
}
