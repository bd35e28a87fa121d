//! Tag identifier and scan event types.

use crate::{
    Result,
    constants::{MAX_UID_BYTES, MIN_UID_BYTES},
    error::Error,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Normalized tag unique identifier.
///
/// A `Uid` is the identifier a contactless tag broadcasts, held as uppercase
/// hexadecimal byte pairs with no separators. Reader output spells UIDs in
/// many shapes (`04 a3 ff 21`, `04:A3:FF:21`, `04a3ff21`); all of them
/// normalize to the same `Uid`, so de-duplication and typing operate on one
/// canonical form.
///
/// # Invariants
///
/// - Uppercase ASCII hex digits only, no whitespace.
/// - Even number of digits (whole bytes).
/// - 4 to 10 bytes (ISO 14443 single/double/triple UID sizes).
///
/// # Examples
///
/// ```
/// use taptype_core::Uid;
///
/// let uid = Uid::parse("04 a3 ff 21").unwrap();
/// assert_eq!(uid.as_str(), "04A3FF21");
/// assert_eq!(uid.num_bytes(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uid(String);

impl Uid {
    /// Parse and normalize a textual UID.
    ///
    /// Whitespace, `:` and `-` separators between byte pairs are stripped and
    /// the digits are upper-cased before validation.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUid` if:
    /// - any remaining character is not an ASCII hex digit
    /// - the digit count is odd
    /// - the UID is shorter than 4 or longer than 10 bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use taptype_core::Uid;
    ///
    /// assert_eq!(Uid::parse("04:a3:ff:21").unwrap().as_str(), "04A3FF21");
    /// assert!(Uid::parse("not hex").is_err());
    /// assert!(Uid::parse("04A3").is_err()); // below minimum length
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if normalized.is_empty() {
            return Err(Error::invalid_uid("empty"));
        }

        if let Some(bad) = normalized.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(Error::invalid_uid(format!(
                "unexpected character '{bad}'"
            )));
        }

        if normalized.len() % 2 != 0 {
            return Err(Error::invalid_uid(format!(
                "odd number of hex digits ({})",
                normalized.len()
            )));
        }

        let num_bytes = normalized.len() / 2;
        if !(MIN_UID_BYTES..=MAX_UID_BYTES).contains(&num_bytes) {
            return Err(Error::invalid_uid(format!(
                "UID must be {MIN_UID_BYTES}-{MAX_UID_BYTES} bytes, got {num_bytes}"
            )));
        }

        Ok(Uid(normalized))
    }

    /// Build a UID from raw identifier bytes.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUid` if the byte count is outside 4-10.
    ///
    /// # Examples
    ///
    /// ```
    /// use taptype_core::Uid;
    ///
    /// let uid = Uid::from_bytes(&[0x04, 0xA3, 0xFF, 0x21]).unwrap();
    /// assert_eq!(uid.as_str(), "04A3FF21");
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if !(MIN_UID_BYTES..=MAX_UID_BYTES).contains(&bytes.len()) {
            return Err(Error::invalid_uid(format!(
                "UID must be {MIN_UID_BYTES}-{MAX_UID_BYTES} bytes, got {}",
                bytes.len()
            )));
        }

        let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
        Ok(Uid(hex))
    }

    /// Get the normalized hex form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of identifier bytes.
    #[must_use]
    pub fn num_bytes(&self) -> usize {
        self.0.len() / 2
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Uid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uid::parse(s)
    }
}

/// A UID becoming newly present at the reader.
///
/// Created by the dedup loop exactly once per distinct tag presentation and
/// consumed once by the keystroke emitter. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEvent {
    /// Unique event identifier.
    pub id: Uuid,

    /// The tag identifier that became present.
    pub uid: Uid,

    /// When the presentation was observed.
    pub observed_at: DateTime<Utc>,
}

impl ScanEvent {
    /// Create a scan event observed now.
    ///
    /// # Examples
    ///
    /// ```
    /// use taptype_core::{ScanEvent, Uid};
    ///
    /// let event = ScanEvent::new(Uid::parse("04A3FF21").unwrap());
    /// assert_eq!(event.uid.as_str(), "04A3FF21");
    /// ```
    #[must_use]
    pub fn new(uid: Uid) -> Self {
        Self::at(uid, Utc::now())
    }

    /// Create a scan event with an explicit timestamp.
    ///
    /// Useful for replaying recorded presentations in tests.
    #[must_use]
    pub fn at(uid: Uid, observed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            uid,
            observed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("04A3FF21", "04A3FF21")]
    #[case("04 a3 ff 21", "04A3FF21")]
    #[case("04:a3:ff:21", "04A3FF21")]
    #[case("04-A3-FF-21", "04A3FF21")]
    #[case(" 04 A3 FF 21 9C 55 B0 ", "04A3FF219C55B0")]
    fn test_uid_parse_normalizes(#[case] input: &str, #[case] expected: &str) {
        let uid = Uid::parse(input).unwrap();
        assert_eq!(uid.as_str(), expected);
    }

    #[rstest]
    #[case("")] // empty
    #[case("   ")] // separators only
    #[case("04A3FF2G")] // non-hex digit
    #[case("04A3F")] // odd digit count
    #[case("04A3")] // 2 bytes, below minimum
    #[case("0102030405060708090A0B")] // 11 bytes, above maximum
    fn test_uid_parse_rejects(#[case] input: &str) {
        assert!(Uid::parse(input).is_err());
    }

    #[test]
    fn test_uid_from_bytes() {
        let uid = Uid::from_bytes(&[0x04, 0xA3, 0xFF, 0x21]).unwrap();
        assert_eq!(uid.as_str(), "04A3FF21");
        assert_eq!(uid.num_bytes(), 4);

        assert!(Uid::from_bytes(&[0x01, 0x02]).is_err());
        assert!(Uid::from_bytes(&[0x01; 11]).is_err());
        assert!(Uid::from_bytes(&[0x01; 10]).is_ok());
    }

    #[test]
    fn test_uid_equality_across_sources() {
        let parsed = Uid::parse("04 a3 ff 21").unwrap();
        let from_bytes = Uid::from_bytes(&[0x04, 0xA3, 0xFF, 0x21]).unwrap();
        assert_eq!(parsed, from_bytes);
    }

    #[test]
    fn test_uid_from_str() {
        let uid: Uid = "04 A3 FF 21".parse().unwrap();
        assert_eq!(uid.to_string(), "04A3FF21");
    }

    #[test]
    fn test_scan_event_new() {
        let uid = Uid::parse("04A3FF21").unwrap();
        let event = ScanEvent::new(uid.clone());

        assert_eq!(event.uid, uid);
        assert!(event.observed_at <= Utc::now());
    }

    #[test]
    fn test_scan_event_ids_unique() {
        let uid = Uid::parse("04A3FF21").unwrap();
        let first = ScanEvent::new(uid.clone());
        let second = ScanEvent::new(uid);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_scan_event_serialization() {
        let event = ScanEvent::new(Uid::parse("04A3FF21").unwrap());
        let json = serde_json::to_string(&event).unwrap();
        let back: ScanEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, event.id);
        assert_eq!(back.uid, event.uid);
        assert_eq!(back.observed_at, event.observed_at);
    }
}
