//! UID extraction from raw reader output.
//!
//! Extraction is a total function over whatever the transport captured: a
//! valid UID comes back as `Some`, everything else (no tag in the field,
//! truncated output, failure status words) comes back as `None`. "No tag"
//! is the most frequent outcome of a poll and is never an error.

use crate::traits::{ApduResponse, RawCapture};
use taptype_core::{Uid, constants::UID_MARKER};

/// Extract a normalized UID from a raw capture.
///
/// Dispatches on the capture shape: textual tool output is scanned for the
/// `UID:` marker, APDU responses carry the UID as payload when the status
/// word is `90 00`.
///
/// # Examples
///
/// ```
/// use taptype_reader::{RawCapture, extract};
///
/// let raw = RawCapture::Text("[+]  UID: 04 A3 FF 21".to_string());
/// assert_eq!(extract(&raw).unwrap().as_str(), "04A3FF21");
///
/// let raw = RawCapture::Text("[!] no known/supported 13.56 MHz tags found".to_string());
/// assert!(extract(&raw).is_none());
/// ```
#[must_use]
pub fn extract(raw: &RawCapture) -> Option<Uid> {
    match raw {
        RawCapture::Text(text) => from_text(text),
        RawCapture::Apdu(response) => from_apdu(response),
    }
}

/// Extract a UID from reader-control tool output.
///
/// Scans line by line for the `UID:` marker and takes the run of hex digits
/// and whitespace that follows it. A line whose run does not normalize to a
/// valid UID is skipped; later lines may still match.
#[must_use]
pub fn from_text(text: &str) -> Option<Uid> {
    for line in text.lines() {
        let Some(idx) = line.find(UID_MARKER) else {
            continue;
        };

        let tail = &line[idx + UID_MARKER.len()..];
        let run: String = tail
            .chars()
            .take_while(|c| c.is_ascii_hexdigit() || c.is_whitespace())
            .collect();

        if let Ok(uid) = Uid::parse(&run) {
            return Some(uid);
        }
    }
    None
}

/// Extract a UID from a get-UID APDU response.
///
/// The response data is the UID exactly when the status word is `90 00`;
/// any other status word, or a success response whose payload is not a
/// plausible UID, yields `None`.
///
/// # Examples
///
/// ```
/// use taptype_reader::{ApduResponse, extract::from_apdu};
///
/// let ok = ApduResponse::new(vec![0x04, 0xA3, 0xFF, 0x21], 0x90, 0x00);
/// assert_eq!(from_apdu(&ok).unwrap().as_str(), "04A3FF21");
///
/// let failed = ApduResponse::new(vec![], 0x6A, 0x82);
/// assert!(from_apdu(&failed).is_none());
/// ```
#[must_use]
pub fn from_apdu(response: &ApduResponse) -> Option<Uid> {
    if !response.is_success() {
        return None;
    }
    Uid::from_bytes(&response.data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("[+]  UID: 04 A3 FF 21", "04A3FF21")]
    #[case("UID: 04a3ff21", "04A3FF21")]
    #[case("noise\n[=]  UID: 9C 55 B0 11 04 A3 FF\ntrailer", "9C55B01104A3FF")]
    #[case("[+]  UID: 04 A3 FF 21 (ISO 14443-A)", "04A3FF21")]
    fn test_from_text_well_formed(#[case] output: &str, #[case] expected: &str) {
        let uid = from_text(output).unwrap();
        assert_eq!(uid.as_str(), expected);
        assert!(!uid.as_str().contains(char::is_whitespace));
    }

    #[rstest]
    #[case("")]
    #[case("[!] no known/supported 13.56 MHz tags found")]
    #[case("UID:")] // marker with nothing after
    #[case("UID: zz zz")] // marker with no hex run
    #[case("UID: 04 A3")] // run too short to be a UID
    fn test_from_text_no_tag(#[case] output: &str) {
        assert!(from_text(output).is_none());
    }

    #[test]
    fn test_from_text_skips_bad_line_for_later_match() {
        let output = "UID: 04\n[+]  UID: 04 A3 FF 21";
        assert_eq!(from_text(output).unwrap().as_str(), "04A3FF21");
    }

    #[test]
    fn test_from_apdu_success_maps_data() {
        let response = ApduResponse::new(vec![0x04, 0xA3, 0xFF, 0x21], 0x90, 0x00);
        assert_eq!(from_apdu(&response).unwrap().as_str(), "04A3FF21");
    }

    #[rstest]
    #[case(0x6A, 0x82)] // file not found
    #[case(0x63, 0x00)] // warning
    #[case(0x90, 0x01)] // sw2 mismatch
    fn test_from_apdu_failure_status(#[case] sw1: u8, #[case] sw2: u8) {
        let response = ApduResponse::new(vec![0x04, 0xA3, 0xFF, 0x21], sw1, sw2);
        assert!(from_apdu(&response).is_none());
    }

    #[test]
    fn test_from_apdu_success_with_empty_data() {
        let response = ApduResponse::new(vec![], 0x90, 0x00);
        assert!(from_apdu(&response).is_none());
    }

    #[test]
    fn test_extract_dispatches_both_shapes() {
        let text = RawCapture::Text("[+]  UID: 04 A3 FF 21".to_string());
        let apdu = RawCapture::Apdu(ApduResponse::new(vec![0x04, 0xA3, 0xFF, 0x21], 0x90, 0x00));
        assert_eq!(extract(&text), extract(&apdu));
    }
}
