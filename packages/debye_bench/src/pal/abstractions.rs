//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Provides wall-clock timestamps for duration measurement.
///
/// This trait abstracts the clock behind the benchmark harness, allowing for
/// the real monotonic clock in production and a fake implementation whose time
/// only moves when a test advances it.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the time elapsed since an arbitrary process-local epoch.
    ///
    /// Timestamps are only meaningful relative to each other within the same
    /// process; subtracting two of them yields an elapsed duration.
    fn timestamp(&self) -> Duration;
}
