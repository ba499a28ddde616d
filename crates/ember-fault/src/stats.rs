//! # Fault Statistics
//!
//! Cumulative per-client fault counts. Updated on every decode from
//! deferred interrupt context, read lazily by the diagnostics path;
//! plain atomics keep the two sides from needing a lock.

use core::sync::atomic::{AtomicU64, Ordering};

use alloc::vec::Vec;

// =============================================================================
// CLIENT STATS
// =============================================================================

/// Per-client cumulative fault counters
///
/// One slot per client-table entry plus one trailing slot for faults
/// whose source id resolved to no client.
pub struct ClientStats {
    counts: Vec<AtomicU64>,
}

impl ClientStats {
    /// Create counters for `slots` client slots
    pub fn new(slots: usize) -> Self {
        let mut counts = Vec::with_capacity(slots);
        counts.resize_with(slots, || AtomicU64::new(0));
        Self { counts }
    }

    /// Count one fault against a client slot
    pub fn record(&self, slot: usize) {
        if let Some(c) = self.counts.get(slot) {
            c.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Faults recorded against a slot so far
    pub fn count(&self, slot: usize) -> u64 {
        self.counts
            .get(slot)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Total faults across all slots
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Snapshot all counters for the diagnostics view
    pub fn snapshot(&self) -> Vec<u64> {
        self.counts
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .collect()
    }
}

impl core::fmt::Debug for ClientStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClientStats")
            .field("slots", &self.counts.len())
            .field("total", &self.total())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_count() {
        let s = ClientStats::new(3);
        s.record(1);
        s.record(1);
        s.record(2);
        assert_eq!(s.count(0), 0);
        assert_eq!(s.count(1), 2);
        assert_eq!(s.count(2), 1);
        assert_eq!(s.total(), 3);
    }

    #[test]
    fn test_out_of_range_slot_ignored() {
        let s = ClientStats::new(1);
        s.record(9);
        assert_eq!(s.total(), 0);
    }

    #[test]
    fn test_snapshot() {
        let s = ClientStats::new(2);
        s.record(0);
        assert_eq!(s.snapshot(), [1, 0]);
    }
}
