//! Shared constants for tag reading and keystroke emission.
//!
//! These values pin down the external contracts (the get-UID APDU and its
//! success status, the textual UID marker printed by reader-control tools)
//! and the timing budgets observed on the reference hardware. Timings are
//! defaults; every component accepts an explicit configuration.

// ============================================================================
// Reader command interface
// ============================================================================

/// APDU command requesting the UID of the card in the field.
///
/// `CLA=FF INS=CA P1=00 P2=00 Le=00` — the PC/SC pseudo-APDU understood by
/// contactless readers (ACR122U and compatibles).
///
/// # Examples
///
/// ```
/// use taptype_core::constants::GET_UID_APDU;
///
/// assert_eq!(GET_UID_APDU, [0xFF, 0xCA, 0x00, 0x00, 0x00]);
/// ```
pub const GET_UID_APDU: [u8; 5] = [0xFF, 0xCA, 0x00, 0x00, 0x00];

/// First status byte of a successful APDU response.
pub const SW1_SUCCESS: u8 = 0x90;

/// Second status byte of a successful APDU response.
pub const SW2_SUCCESS: u8 = 0x00;

/// Label preceding the UID in reader-control tool output.
///
/// Tool output lines look like `[+]  UID: 04 A3 FF 21`; everything after the
/// marker up to the first non-hex, non-whitespace character is the UID.
pub const UID_MARKER: &str = "UID:";

// ============================================================================
// UID bounds
// ============================================================================

/// Minimum UID length in bytes (ISO 14443 single-size UID).
pub const MIN_UID_BYTES: usize = 4;

/// Maximum UID length in bytes (ISO 14443 triple-size UID).
pub const MAX_UID_BYTES: usize = 10;

// ============================================================================
// Timing budgets
// ============================================================================

/// Default hard timeout for a single transport poll, in milliseconds.
///
/// The reference reader-control invocation completes a field scan well under
/// this bound; anything longer is treated as a timed-out poll.
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 1400;

/// Default fixed delay between poll cycles, in milliseconds.
///
/// A polling cadence, not a backoff: chosen to balance responsiveness
/// against device and CPU load.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default delay between typed characters, in milliseconds.
pub const DEFAULT_KEY_DELAY_MS: u64 = 50;

/// Default pause before the terminating Enter, in milliseconds.
///
/// Gives the receiving input field time to settle before submission.
pub const DEFAULT_SETTLE_MS: u64 = 100;

/// Number of card-connection attempts before giving up on an insertion.
///
/// A freshly inserted card that is not ready resolves within a retry or two,
/// or not at all; the retry is count-limited rather than cadence-based.
pub const CONNECT_ATTEMPTS: u32 = 3;

/// Delay between card-connection attempts, in milliseconds.
pub const CONNECT_RETRY_DELAY_MS: u64 = 100;
