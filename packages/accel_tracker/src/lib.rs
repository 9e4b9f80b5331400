//! Accelerator peak-memory tracking primitives for benchmarks and performance analysis.
//!
//! Benchmark harnesses often need to report how much device (GPU or other accelerator)
//! memory a measured operation reached at its peak. The device runtime owns that number,
//! so this package does not talk to any accelerator itself. Instead it defines the
//! narrow capability a harness consumes and the plumbing an integration needs to
//! provide it:
//!
//! - [`PeakMemoryProbe`] - the capability: reset a peak watermark, read peak bytes
//! - [`NoAccelerator`] - the sentinel probe used when no accelerator is present;
//!   it reports zero and never fails
//! - [`PeakCounter`] - a thread-safe counter an integration drives from its own
//!   allocation hooks; implements [`PeakMemoryProbe`]
//!
//! This package is not meant for use in production, serving only as a development tool.
//!
//! # Usage
//!
//! An integration that knows when device buffers come and go feeds a [`PeakCounter`]
//! and hands a clone of it to whatever wants to observe peak usage:
//!
//! ```
//! use accel_tracker::{PeakCounter, PeakMemoryProbe};
//!
//! let counter = PeakCounter::new();
//! let probe = counter.clone(); // Clones share state.
//!
//! counter.record_alloc(1024);
//! counter.record_alloc(512);
//! counter.record_free(512);
//!
//! assert_eq!(probe.peak_bytes(), 1536);
//! assert_eq!(counter.current_bytes(), 1024);
//!
//! // A new measurement window starts from the currently held bytes.
//! probe.reset_peak();
//! assert_eq!(probe.peak_bytes(), 1024);
//! ```
//!
//! Code that runs without an accelerator uses [`NoAccelerator`] and keeps working,
//! merely reporting zeros:
//!
//! ```
//! use accel_tracker::{NoAccelerator, PeakMemoryProbe};
//!
//! let probe = NoAccelerator;
//! probe.reset_peak();
//! assert_eq!(probe.peak_bytes(), 0);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod counter;
mod probe;

pub use counter::*;
pub use probe::*;
