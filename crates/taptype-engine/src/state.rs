//! De-duplication state for tag presentations.
//!
//! The loop is logically a two-state machine:
//!
//! - **Idle**: no tag tracked (`last_emitted` is `None`)
//! - **Tracking**: a tag is considered present (`last_emitted` is `Some`)
//!
//! Observing a UID different from the tracked one always emits and moves to
//! Tracking; observing the tracked UID again is suppressed. Timeouts and
//! captures with no UID do **not** leave Tracking: the command-backed
//! transport has no removal signal, so a tag removed and identically
//! re-presented is not re-triggered on that backend. Only an explicit
//! removal notification returns the state to Idle.

use taptype_core::{ScanEvent, Uid};

/// Last-emitted-UID state, owned exclusively by the scan loop.
///
/// # Examples
///
/// ```
/// use taptype_core::Uid;
/// use taptype_engine::DedupState;
///
/// let mut state = DedupState::new();
/// let uid = Uid::parse("04A3FF21").unwrap();
///
/// assert!(state.observe(uid.clone()).is_some()); // first presentation
/// assert!(state.observe(uid.clone()).is_none()); // still in range
///
/// state.card_removed();
/// assert!(state.observe(uid).is_some()); // re-presentation after removal
/// ```
#[derive(Debug, Default)]
pub struct DedupState {
    last_emitted: Option<Uid>,
}

impl DedupState {
    /// Create state with no tag tracked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one extracted UID through the dedup transition.
    ///
    /// Returns `Some(ScanEvent)` exactly when `uid` differs from the last
    /// emitted one, updating the tracked UID; returns `None` for a
    /// duplicate read of the tag already in range.
    pub fn observe(&mut self, uid: Uid) -> Option<ScanEvent> {
        if self.last_emitted.as_ref() == Some(&uid) {
            return None;
        }
        self.last_emitted = Some(uid.clone());
        Some(ScanEvent::new(uid))
    }

    /// Handle an explicit removal notification: back to Idle.
    ///
    /// After this, re-presenting the same tag emits again.
    pub fn card_removed(&mut self) {
        self.last_emitted = None;
    }

    /// The UID currently tracked, if any.
    #[must_use]
    pub fn last_emitted(&self) -> Option<&Uid> {
        self.last_emitted.as_ref()
    }

    /// Whether a tag is currently tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.last_emitted.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> Uid {
        Uid::parse(s).unwrap()
    }

    #[test]
    fn test_first_observation_emits() {
        let mut state = DedupState::new();
        assert!(!state.is_tracking());

        let event = state.observe(uid("04A3FF21")).unwrap();
        assert_eq!(event.uid.as_str(), "04A3FF21");
        assert!(state.is_tracking());
    }

    #[test]
    fn test_consecutive_same_uid_emits_once() {
        let mut state = DedupState::new();

        assert!(state.observe(uid("04A3FF21")).is_some());
        assert!(state.observe(uid("04A3FF21")).is_none());
        assert!(state.observe(uid("04A3FF21")).is_none());
        assert_eq!(state.last_emitted().unwrap().as_str(), "04A3FF21");
    }

    #[test]
    fn test_different_uid_emits() {
        let mut state = DedupState::new();

        assert!(state.observe(uid("04A3FF21")).is_some());
        assert!(state.observe(uid("DEADBEEF")).is_some());
        assert_eq!(state.last_emitted().unwrap().as_str(), "DEADBEEF");

        // Swapping back to the first tag emits again: it differs from the
        // last emitted UID, which is all the command backend can know.
        assert!(state.observe(uid("04A3FF21")).is_some());
    }

    #[test]
    fn test_removal_allows_retrigger() {
        let mut state = DedupState::new();

        assert!(state.observe(uid("04A3FF21")).is_some());
        state.card_removed();
        assert!(!state.is_tracking());
        assert!(state.observe(uid("04A3FF21")).is_some());
    }

    #[test]
    fn test_removal_while_idle_is_noop() {
        let mut state = DedupState::new();
        state.card_removed();
        assert!(!state.is_tracking());
    }
}
