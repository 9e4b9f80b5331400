//! Real platform implementation reading the operating system's monotonic clock.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use crate::pal::abstractions::Platform;

/// The process-local epoch all real timestamps are measured from.
///
/// Timestamps only participate in subtraction, so the epoch is arbitrary as
/// long as it never moves within a process.
static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Singleton instance of `RealPlatform`, used by default.
pub(crate) static REAL_PLATFORM: RealPlatform = RealPlatform {};

/// Real implementation of the platform abstraction.
#[derive(Debug)]
pub(crate) struct RealPlatform {}

impl Platform for RealPlatform {
    fn timestamp(&self) -> Duration {
        EPOCH.elapsed()
    }
}
