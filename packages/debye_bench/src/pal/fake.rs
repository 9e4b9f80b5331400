//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::Platform;

/// Internal state for the fake platform that can be shared between clones.
#[derive(Debug)]
#[cfg(test)]
struct FakePlatformState {
    now: Duration,
}

/// Fake implementation of the platform abstraction for testing.
///
/// This implementation gives tests full control over the clock instead of
/// relying on the operating system. Multiple clones of the same `FakePlatform`
/// share the same underlying state, so the code under test and the test's own
/// assertions observe one clock.
#[derive(Clone, Debug)]
#[cfg(test)]
pub(crate) struct FakePlatform {
    state: Arc<Mutex<FakePlatformState>>,
}

#[cfg(test)]
impl FakePlatform {
    /// Creates a new fake platform whose clock reads zero.
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakePlatformState {
                now: Duration::ZERO,
            })),
        }
    }

    /// Moves the clock forward by the given amount.
    ///
    /// This affects all clones of this platform, allowing tests to simulate
    /// work taking time.
    pub(crate) fn advance(&self, amount: Duration) {
        let mut state = self
            .state
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        state.now = state
            .now
            .checked_add(amount)
            .expect("fake clock advanced beyond the range of Duration");
    }
}

#[cfg(test)]
impl Platform for FakePlatform {
    fn timestamp(&self) -> Duration {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .now
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn initializes_with_zero_timestamp() {
        let platform = FakePlatform::new();

        assert_eq!(platform.timestamp(), Duration::ZERO);
    }

    #[test]
    fn advance_moves_the_clock() {
        let platform = FakePlatform::new();
        platform.advance(Duration::from_millis(150));
        platform.advance(Duration::from_millis(50));

        assert_eq!(platform.timestamp(), Duration::from_millis(200));
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        // Advancing time on one clone affects the other.
        platform1.advance(Duration::from_millis(100));
        assert_eq!(platform2.timestamp(), Duration::from_millis(100));
    }
}
