//! Example code from the README.md file.
//!
//! This shows a counter shared between an integration (recording side) and an
//! observer (probe side).

use accel_tracker::{PeakCounter, PeakMemoryProbe};

fn main() {
    let counter = PeakCounter::new();
    let probe = counter.clone(); // Clones share state.

    counter.record_alloc(1024);
    counter.record_alloc(512);
    counter.record_free(512);

    println!("peak bytes:    {}", probe.peak_bytes());
    println!("current bytes: {}", counter.current_bytes());

    // A new measurement window starts from the currently held bytes.
    probe.reset_peak();
    println!("peak after reset: {}", probe.peak_bytes());
}
