//! The scattering calculator collaborator boundary.

use crate::config::CalculatorConfig;
use crate::error::CollaboratorError;
use crate::function::ScatteringFunction;
use crate::structure::Nanoparticle;

/// Evaluates scattering quantities over a nanoparticle structure.
///
/// This is an external collaborator boundary: the numerical Debye core lives outside
/// the harness. A benchmark run first applies its frozen configuration snapshot via
/// [`configure()`][Self::configure], then times repeated
/// [`compute()`][Self::compute] calls.
///
/// # Example
///
/// ```
/// use debye_bench::{
///     CalculatorConfig, CollaboratorError, Nanoparticle, ScatteringCalculator,
///     ScatteringFunction,
/// };
///
/// /// Pretends every curve is flat.
/// struct FlatCalculator;
///
/// impl ScatteringCalculator for FlatCalculator {
///     fn configure(&mut self, _config: &CalculatorConfig) -> Result<(), CollaboratorError> {
///         Ok(())
///     }
///
///     fn compute(
///         &self,
///         _function: ScatteringFunction,
///         structure: &Nanoparticle,
///     ) -> Result<Vec<f64>, CollaboratorError> {
///         Ok(vec![1.0; structure.size()])
///     }
/// }
/// ```
pub trait ScatteringCalculator {
    /// Applies a run's frozen configuration snapshot.
    ///
    /// Called exactly once per benchmark run, before any structure is generated and
    /// before any trial runs.
    ///
    /// # Errors
    ///
    /// Any error aborts the benchmark run with no partial result; it is surfaced
    /// unmodified as the source of [`Error::Calculation`][crate::Error::Calculation].
    fn configure(&mut self, config: &CalculatorConfig) -> std::result::Result<(), CollaboratorError>;

    /// Evaluates the selected scattering quantity over the structure.
    ///
    /// Returns the evaluated curve. The harness passes the buffer through
    /// [`std::hint::black_box`] and discards it; only the call's duration and peak
    /// memory matter to the benchmark.
    ///
    /// # Errors
    ///
    /// Any error aborts the benchmark run with no partial result; it is surfaced
    /// unmodified as the source of [`Error::Calculation`][crate::Error::Calculation].
    fn compute(
        &self,
        function: ScatteringFunction,
        structure: &Nanoparticle,
    ) -> std::result::Result<Vec<f64>, CollaboratorError>;
}
