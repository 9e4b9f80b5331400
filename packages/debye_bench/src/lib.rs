//! Benchmark harness for calculators of the Debye scattering equation.
//!
//! The harness sweeps nanoparticle radii, timing how long an externally supplied
//! calculator takes to evaluate a scattering quantity over each generated
//! structure. Every radius gets two discarded warm-up trials, so one-time costs
//! such as kernel compilation and cache population never reach the results, then
//! a configurable number of retained trials reduced to mean and population
//! standard deviation. Peak accelerator memory is read around structure
//! generation and around each calculation trial through the [`accel_tracker`]
//! probe interface; without an accelerator, the memory columns read zero.
//!
//! The crate is measurement plumbing only. The physics lives behind two
//! collaborator traits supplied by the integration:
//!
//! * [`StructureGenerator`] carves nanoparticles of the requested radii out of a
//!   crystal structure file.
//! * [`ScatteringCalculator`] evaluates the selected quantity (G(r), I(q) or
//!   S(q)) over one structure.
//!
//! Results arrive as a [`Statistics`] record that renders as a bordered table,
//! persists to CSV via [`write_csv()`] and loads back via [`read_csv()`]. Two
//! recorded reference runs ship in the [`reference`] module for comparison with
//! local numbers.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//!
//! use debye_bench::{
//!     BenchmarkOptions, Benchmarker, CalculatorConfig, CollaboratorError, Device,
//!     Nanoparticle, ScatteringCalculator, ScatteringFunction, StructureGenerator,
//! };
//!
//! #[derive(Debug)]
//! struct LatticeGenerator;
//!
//! impl StructureGenerator for LatticeGenerator {
//!     fn generate(
//!         &self,
//!         _structure_file: &Path,
//!         radii: &[f64],
//!         _device: Device,
//!     ) -> Result<Vec<Nanoparticle>, CollaboratorError> {
//!         Ok(radii
//!             .iter()
//!             .map(|_| Nanoparticle::new(vec!["C".to_string()], vec![[0.0, 0.0, 0.0]]))
//!             .collect())
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct FlatCalculator;
//!
//! impl ScatteringCalculator for FlatCalculator {
//!     fn configure(&mut self, _config: &CalculatorConfig) -> Result<(), CollaboratorError> {
//!         Ok(())
//!     }
//!
//!     fn compute(
//!         &self,
//!         _function: ScatteringFunction,
//!         structure: &Nanoparticle,
//!     ) -> Result<Vec<f64>, CollaboratorError> {
//!         Ok(vec![0.0; structure.size()])
//!     }
//! }
//!
//! # fn main() -> Result<(), debye_bench::Error> {
//! let mut benchmarker =
//!     Benchmarker::new(LatticeGenerator, FlatCalculator, ScatteringFunction::Gr);
//! benchmarker.set_radii([2.0, 4.0, 6.0]);
//! benchmarker.show_progress(false);
//!
//! let statistics = benchmarker.benchmark(&BenchmarkOptions::default())?;
//! assert_eq!(statistics.len(), 3);
//! statistics.print_to_stdout();
//!
//! // Recorded reference runs are available for comparison.
//! let reference = debye_bench::reference::titan_rtx();
//! assert_eq!(reference.device(), "cuda");
//! # Ok(())
//! # }
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod benchmarker;
mod calculator;
mod config;
mod csv;
mod device;
mod error;
mod function;
mod pal;
pub mod reference;
mod statistics;
mod structure;

pub use benchmarker::*;
pub use calculator::*;
pub use config::*;
pub use csv::*;
pub use device::*;
pub use error::*;
pub use function::*;
pub use statistics::*;
pub use structure::*;
