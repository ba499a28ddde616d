//! # Report Throttling
//!
//! Per-signature caps on how many times a fault category is textually
//! reported, plus the process-wide silenced gate. A storm of identical
//! faults stops producing text after `max_prints` reports; it never
//! stops being counted.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use alloc::vec::Vec;

// =============================================================================
// THROTTLE STATE
// =============================================================================

/// Per-signature print throttle and the silenced flag
///
/// One counter per fault-table slot plus one for the unknown sentinel.
/// Counters are plain atomics; this sits on the hottest path and must
/// not take a lock. Counts persist for the process lifetime unless
/// explicitly reset.
pub struct ThrottleState {
    counts: Vec<AtomicU32>,
    silenced: AtomicBool,
    max_prints: u32,
}

impl ThrottleState {
    /// Create throttle state for `slots` fault signatures
    pub fn new(slots: usize, max_prints: u32) -> Self {
        let mut counts = Vec::with_capacity(slots);
        counts.resize_with(slots, || AtomicU32::new(0));
        Self {
            counts,
            silenced: AtomicBool::new(false),
            max_prints,
        }
    }

    /// Count one decode attempt against a signature slot
    ///
    /// Returns whether a report may still be rendered, i.e. whether the
    /// pre-increment count was below the cap. The counter advances
    /// regardless of the silenced flag and regardless of the outcome.
    pub fn note(&self, slot: usize) -> bool {
        match self.counts.get(slot) {
            Some(c) => c.fetch_add(1, Ordering::Relaxed) < self.max_prints,
            None => false,
        }
    }

    /// Decode attempts recorded against a slot so far
    pub fn count(&self, slot: usize) -> u32 {
        self.counts
            .get(slot)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Whether all textual output is suppressed
    pub fn silenced(&self) -> bool {
        self.silenced.load(Ordering::Relaxed)
    }

    /// Set the process-wide silenced flag
    ///
    /// Takes effect on the next decode; counters and statistics keep
    /// advancing while silenced.
    pub fn set_silenced(&self, silenced: bool) {
        self.silenced.store(silenced, Ordering::Relaxed);
    }

    /// Explicitly clear all throttle counters
    ///
    /// The only way counters go back down; there is no time-based decay.
    pub fn reset(&self) {
        for c in &self.counts {
            c.store(0, Ordering::Relaxed);
        }
    }

    /// Snapshot all counters for the diagnostics view
    pub fn snapshot(&self) -> Vec<u32> {
        self.counts
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .collect()
    }
}

impl core::fmt::Debug for ThrottleState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThrottleState")
            .field("slots", &self.counts.len())
            .field("max_prints", &self.max_prints)
            .field("silenced", &self.silenced())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_after_max_prints() {
        let t = ThrottleState::new(2, 5);
        for n in 1..=5 {
            assert!(t.note(0), "report {} should render", n);
        }
        assert!(!t.note(0));
        assert!(!t.note(0));
        assert_eq!(t.count(0), 7);
        // Other slots are unaffected.
        assert!(t.note(1));
    }

    #[test]
    fn test_silenced_does_not_stop_counting() {
        let t = ThrottleState::new(1, 5);
        t.set_silenced(true);
        assert!(t.note(0));
        assert_eq!(t.count(0), 1);
        assert!(t.silenced());
    }

    #[test]
    fn test_reset_reopens_throttle() {
        let t = ThrottleState::new(1, 2);
        assert!(t.note(0));
        assert!(t.note(0));
        assert!(!t.note(0));
        t.reset();
        assert_eq!(t.count(0), 0);
        assert!(t.note(0));
    }

    #[test]
    fn test_out_of_range_slot() {
        let t = ThrottleState::new(1, 5);
        assert!(!t.note(7));
        assert_eq!(t.count(7), 0);
    }
}
