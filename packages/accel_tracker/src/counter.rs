//! A shared peak counter driven by integration allocation hooks.

use std::sync::Arc;
use std::sync::atomic::{self, AtomicU64};

use crate::PeakMemoryProbe;

#[derive(Debug, Default)]
struct CounterState {
    current: AtomicU64,
    peak: AtomicU64,
}

/// A thread-safe counter of currently held bytes with a peak watermark.
///
/// An integration that knows when device buffers are created and released calls
/// [`record_alloc()`][Self::record_alloc] and [`record_free()`][Self::record_free]
/// from its hooks. The counter maintains the currently held byte total and the
/// highest total seen since the last [`reset_peak()`][PeakMemoryProbe::reset_peak].
///
/// Clones share state, so the integration can keep one handle for recording while
/// a harness observes through another via the [`PeakMemoryProbe`] it implements.
///
/// # Example
///
/// ```
/// use accel_tracker::{PeakCounter, PeakMemoryProbe};
///
/// let counter = PeakCounter::new();
///
/// counter.record_alloc(2048);
/// counter.record_free(2048);
///
/// // The peak remembers the high-water mark even after the buffers are gone.
/// assert_eq!(counter.current_bytes(), 0);
/// assert_eq!(counter.peak_bytes(), 2048);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PeakCounter {
    state: Arc<CounterState>,
}

impl PeakCounter {
    /// Creates a new counter with nothing held and a zero peak.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the integration allocated `bytes` more bytes.
    ///
    /// Raises the peak watermark if the new held total exceeds it.
    pub fn record_alloc(&self, bytes: u64) {
        // Relaxed is sufficient: we only need atomicity, not ordering w.r.t. other memory ops.
        let previous = self
            .state
            .current
            .fetch_add(bytes, atomic::Ordering::Relaxed);
        let now_held = previous.wrapping_add(bytes);

        self.state
            .peak
            .fetch_max(now_held, atomic::Ordering::Relaxed);
    }

    /// Records that the integration released `bytes` bytes.
    ///
    /// The held total saturates at zero, so a mismatched free cannot wrap the
    /// counter around to an enormous value.
    pub fn record_free(&self, bytes: u64) {
        _ = self.state.current.fetch_update(
            atomic::Ordering::Relaxed,
            atomic::Ordering::Relaxed,
            |held| Some(held.saturating_sub(bytes)),
        );
    }

    /// Bytes currently held according to the recorded allocations and frees.
    #[must_use]
    pub fn current_bytes(&self) -> u64 {
        self.state.current.load(atomic::Ordering::Relaxed)
    }
}

impl PeakMemoryProbe for PeakCounter {
    fn reset_peak(&self) {
        // Bytes still held when the window opens count as observed, so the new
        // watermark starts at the current total rather than zero.
        let held = self.state.current.load(atomic::Ordering::Relaxed);
        self.state.peak.store(held, atomic::Ordering::Relaxed);
    }

    fn peak_bytes(&self) -> u64 {
        self.state.peak.load(atomic::Ordering::Relaxed)
    }
}
