//! Recorded reference benchmarks shipped with the crate.
//!
//! Two historical runs of the same radius sweep are embedded for comparison
//! against a local run: one on an NVIDIA TITAN RTX accelerator and one on CPU
//! with the DiffPy-CMI library. The DiffPy-CMI recording predates the richer
//! metadata lines, so its function name and batch size read as unknown.

use crate::Statistics;
use crate::csv;

const TITAN_RTX_CSV: &str = include_str!("../data/benchmark_reference_TITANRTX.csv");
const DIFFPY_CMI_CSV: &str = include_str!("../data/benchmark_reference_DiffPy.csv");

/// The reference sweep recorded on an NVIDIA TITAN RTX accelerator.
///
/// # Panics
///
/// Panics if the embedded reference data fails to parse, which unit tests guard
/// against.
#[must_use]
pub fn titan_rtx() -> Statistics {
    csv::parse(TITAN_RTX_CSV).expect("embedded TITAN RTX reference data is well formed")
}

/// The reference sweep recorded on CPU with the DiffPy-CMI library.
///
/// # Panics
///
/// Panics if the embedded reference data fails to parse, which unit tests guard
/// against.
#[must_use]
pub fn diffpy_cmi() -> Statistics {
    csv::parse(DIFFPY_CMI_CSV).expect("embedded DiffPy-CMI reference data is well formed")
}
