//! The peak-memory capability consumed by measurement harnesses.

use std::fmt::Debug;

/// Observes peak accelerator memory usage over caller-defined windows.
///
/// A measurement harness brackets each measured unit with [`reset_peak()`][Self::reset_peak]
/// before and [`peak_bytes()`][Self::peak_bytes] after. What "allocated" means is up to the
/// implementation; the contract is only that the value never decreases between a reset and
/// the next read.
///
/// Implementations must be cheap to call. Both methods sit directly inside measurement
/// loops, so any work they do is attributed to the measured operation.
pub trait PeakMemoryProbe: Debug + Send + Sync + 'static {
    /// Starts a new measurement window.
    ///
    /// After this call, [`peak_bytes()`][Self::peak_bytes] reflects only usage observed
    /// from this moment on (bytes still held at reset time count as observed).
    fn reset_peak(&self);

    /// Peak allocated bytes observed since the last [`reset_peak()`][Self::reset_peak].
    fn peak_bytes(&self) -> u64;
}

/// The probe used when no accelerator (or no instrumented integration) is available.
///
/// Resetting is a no-op and the peak is always zero. This lets harnesses degrade
/// gracefully on machines without a device instead of failing the run.
///
/// # Example
///
/// ```
/// use accel_tracker::{NoAccelerator, PeakMemoryProbe};
///
/// let probe = NoAccelerator;
/// probe.reset_peak();
/// assert_eq!(probe.peak_bytes(), 0);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAccelerator;

impl PeakMemoryProbe for NoAccelerator {
    #[cfg_attr(test, mutants::skip)] // Intentionally empty; nothing to mutate.
    fn reset_peak(&self) {}

    fn peak_bytes(&self) -> u64 {
        0
    }
}
