//! # Arbitration Interval Tracking
//!
//! Bounded history of inter-arrival times for arbitration-error
//! interrupts. The moving average over the last [`HISTORY_SAMPLES`]
//! arrivals is a coarse health signal: a collapsing average means the
//! arbiter is faulting at a rate worth investigating.

use spin::Mutex;

// =============================================================================
// HISTORY CONFIGURATION
// =============================================================================

/// Number of interval samples kept in the ring
pub const HISTORY_SAMPLES: usize = 20;

// =============================================================================
// SAMPLES
// =============================================================================

/// One recorded arrival
#[derive(Debug, Clone, Copy, Default)]
pub struct ArbSample {
    /// Arrival timestamp in nanoseconds
    pub time: u64,
    /// Interval to the previous arrival in nanoseconds
    pub interval: u64,
}

struct History {
    samples: [ArbSample; HISTORY_SAMPLES],
    /// Next write position
    head: usize,
    /// Populated slots, saturates at the ring capacity
    len: usize,
    /// Timestamp of the most recent arrival
    last_time: Option<u64>,
}

// =============================================================================
// ARBITRATION TRACKER
// =============================================================================

/// Moving-average tracker for arbitration interrupt timing
///
/// Writer (deferred interrupt context) and reader (diagnostics context)
/// share the one lock; critical sections are bounded by the ring size,
/// so holding it briefly from non-blocking context is fine.
pub struct ArbTracker {
    inner: Mutex<History>,
}

impl ArbTracker {
    /// Create an empty tracker
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(History {
                samples: [ArbSample { time: 0, interval: 0 }; HISTORY_SAMPLES],
                head: 0,
                len: 0,
                last_time: None,
            }),
        }
    }

    /// Record an arrival
    ///
    /// The first arrival only seeds the timestamp; every later one
    /// stores an interval sample, evicting the oldest once the ring is
    /// full.
    pub fn record(&self, now_ns: u64) {
        let mut h = self.inner.lock();
        if let Some(last) = h.last_time {
            let sample = ArbSample {
                time: now_ns,
                interval: now_ns.saturating_sub(last),
            };
            let head = h.head;
            h.samples[head] = sample;
            h.head = (head + 1) % HISTORY_SAMPLES;
            if h.len < HISTORY_SAMPLES {
                h.len += 1;
            }
        }
        h.last_time = Some(now_ns);
    }

    /// Arithmetic mean interval over the populated slots, 0 if empty
    pub fn average(&self) -> u64 {
        let h = self.inner.lock();
        if h.len == 0 {
            return 0;
        }
        let sum: u64 = h.samples[..h.len].iter().map(|s| s.interval).sum();
        sum / h.len as u64
    }

    /// Number of populated interval slots
    pub fn sample_count(&self) -> usize {
        self.inner.lock().len
    }
}

impl core::fmt::Debug for ArbTracker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArbTracker")
            .field("samples", &self.sample_count())
            .finish()
    }
}
