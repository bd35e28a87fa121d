//! Key sink backed by native OS input injection.

use crate::{
    error::{EmitError, Result},
    traits::{Key, KeySink},
};
use enigo::{Direction, Enigo, Keyboard, Settings};

/// Key sink injecting through the platform input API.
///
/// Construction connects to the platform input service (X11, Wayland
/// portal, or the OS event system depending on target); a missing display
/// or denied permission surfaces as an [`EmitError::Injection`] here
/// rather than on the first key.
pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    /// Connect to the platform input service.
    ///
    /// # Errors
    ///
    /// Returns `EmitError::Injection` if the connection fails.
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|error| EmitError::injection(error.to_string()))?;
        Ok(Self { enigo })
    }

    fn map(key: Key) -> enigo::Key {
        match key {
            Key::Char(c) => enigo::Key::Unicode(c),
            Key::Enter => enigo::Key::Return,
        }
    }
}

impl KeySink for EnigoSink {
    async fn press(&mut self, key: Key) -> Result<()> {
        self.enigo
            .key(Self::map(key), Direction::Press)
            .map_err(|error| EmitError::injection(error.to_string()))
    }

    async fn release(&mut self, key: Key) -> Result<()> {
        self.enigo
            .key(Self::map(key), Direction::Release)
            .map_err(|error| EmitError::injection(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(EnigoSink::map(Key::Char('A')), enigo::Key::Unicode('A'));
        assert_eq!(EnigoSink::map(Key::Enter), enigo::Key::Return);
    }
}
