//! Typed calculator configuration, validated before it reaches the collaborator.

use std::num::NonZero;

use crate::Error;
use crate::device::Device;

/// Default calculator batch size, in structure pairs per device dispatch.
pub const DEFAULT_BATCH_SIZE: NonZero<usize> = NonZero::new(10_000).expect("10 000 is not zero");

/// The Debye calculation parameters forwarded to the scattering calculator.
///
/// Every field is named and typed, with the conventional defaults of Debye-equation
/// calculators. Values are validated before a benchmark run hands them to the
/// calculator collaborator; see [`validate()`][Self::validate].
///
/// # Example
///
/// ```
/// use debye_bench::DebyeParameters;
///
/// let parameters = DebyeParameters::default()
///     .with_q_max(25.0)
///     .with_biso(0.5);
///
/// assert!(parameters.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct DebyeParameters {
    q_min: f64,
    q_max: f64,
    q_step: f64,
    q_damp: f64,
    r_min: f64,
    r_max: f64,
    r_step: f64,
    biso: f64,
    lorch_damping: bool,
}

impl Default for DebyeParameters {
    fn default() -> Self {
        Self {
            q_min: 1.0,
            q_max: 30.0,
            q_step: 0.1,
            q_damp: 0.04,
            r_min: 0.0,
            r_max: 20.0,
            r_step: 0.01,
            biso: 0.3,
            lorch_damping: false,
        }
    }
}

impl DebyeParameters {
    /// Replaces the lower bound of the scattering vector grid, in inverse ångström.
    #[must_use]
    pub fn with_q_min(mut self, q_min: f64) -> Self {
        self.q_min = q_min;
        self
    }

    /// Replaces the upper bound of the scattering vector grid, in inverse ångström.
    #[must_use]
    pub fn with_q_max(mut self, q_max: f64) -> Self {
        self.q_max = q_max;
        self
    }

    /// Replaces the scattering vector grid spacing, in inverse ångström.
    #[must_use]
    pub fn with_q_step(mut self, q_step: f64) -> Self {
        self.q_step = q_step;
        self
    }

    /// Replaces the instrumental q-space damping factor.
    #[must_use]
    pub fn with_q_damp(mut self, q_damp: f64) -> Self {
        self.q_damp = q_damp;
        self
    }

    /// Replaces the lower bound of the real-space grid, in ångström.
    #[must_use]
    pub fn with_r_min(mut self, r_min: f64) -> Self {
        self.r_min = r_min;
        self
    }

    /// Replaces the upper bound of the real-space grid, in ångström.
    #[must_use]
    pub fn with_r_max(mut self, r_max: f64) -> Self {
        self.r_max = r_max;
        self
    }

    /// Replaces the real-space grid spacing, in ångström.
    #[must_use]
    pub fn with_r_step(mut self, r_step: f64) -> Self {
        self.r_step = r_step;
        self
    }

    /// Replaces the isotropic atomic displacement parameter, in square ångström.
    #[must_use]
    pub fn with_biso(mut self, biso: f64) -> Self {
        self.biso = biso;
        self
    }

    /// Enables or disables the Lorch damping window.
    #[must_use]
    pub fn with_lorch_damping(mut self, enabled: bool) -> Self {
        self.lorch_damping = enabled;
        self
    }

    /// Lower bound of the scattering vector grid, in inverse ångström.
    #[must_use]
    pub fn q_min(&self) -> f64 {
        self.q_min
    }

    /// Upper bound of the scattering vector grid, in inverse ångström.
    #[must_use]
    pub fn q_max(&self) -> f64 {
        self.q_max
    }

    /// Scattering vector grid spacing, in inverse ångström.
    #[must_use]
    pub fn q_step(&self) -> f64 {
        self.q_step
    }

    /// Instrumental q-space damping factor.
    #[must_use]
    pub fn q_damp(&self) -> f64 {
        self.q_damp
    }

    /// Lower bound of the real-space grid, in ångström.
    #[must_use]
    pub fn r_min(&self) -> f64 {
        self.r_min
    }

    /// Upper bound of the real-space grid, in ångström.
    #[must_use]
    pub fn r_max(&self) -> f64 {
        self.r_max
    }

    /// Real-space grid spacing, in ångström.
    #[must_use]
    pub fn r_step(&self) -> f64 {
        self.r_step
    }

    /// Isotropic atomic displacement parameter, in square ångström.
    #[must_use]
    pub fn biso(&self) -> f64 {
        self.biso
    }

    /// Whether the Lorch damping window is applied.
    #[must_use]
    pub fn lorch_damping(&self) -> bool {
        self.lorch_damping
    }

    /// Verifies that the parameters describe usable q-space and r-space grids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the offending field when a
    /// value is non-finite, a grid is inverted or a spacing is not positive.
    pub fn validate(&self) -> crate::Result<()> {
        ensure_finite("q_min", self.q_min)?;
        ensure_finite("q_max", self.q_max)?;
        ensure_finite("q_step", self.q_step)?;
        ensure_finite("q_damp", self.q_damp)?;
        ensure_finite("r_min", self.r_min)?;
        ensure_finite("r_max", self.r_max)?;
        ensure_finite("r_step", self.r_step)?;
        ensure_finite("biso", self.biso)?;

        ensure(self.q_min >= 0.0, "q_min must not be negative")?;
        ensure(self.r_min >= 0.0, "r_min must not be negative")?;
        ensure(self.q_min < self.q_max, "q_min must be less than q_max")?;
        ensure(self.r_min < self.r_max, "r_min must be less than r_max")?;
        ensure(self.q_step > 0.0, "q_step must be positive")?;
        ensure(self.r_step > 0.0, "r_step must be positive")?;
        ensure(self.q_damp >= 0.0, "q_damp must not be negative")?;
        ensure(self.biso >= 0.0, "biso must not be negative")?;

        Ok(())
    }
}

fn ensure(condition: bool, problem: &str) -> crate::Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            problem: problem.to_string(),
        })
    }
}

fn ensure_finite(name: &str, value: f64) -> crate::Result<()> {
    ensure(value.is_finite(), &format!("{name} must be a finite number"))
}

/// The frozen configuration snapshot a benchmark run hands to the calculator.
///
/// Assembled from the [`Benchmarker`][crate::Benchmarker] configuration at the start
/// of a run; setter calls between runs never affect a snapshot already taken.
///
/// # Example
///
/// ```
/// use debye_bench::{CalculatorConfig, DebyeParameters, Device, DEFAULT_BATCH_SIZE};
///
/// let config = CalculatorConfig::new(
///     Device::Cpu,
///     DEFAULT_BATCH_SIZE,
///     DebyeParameters::default(),
/// )?;
///
/// assert_eq!(config.device(), Device::Cpu);
/// assert_eq!(config.batch_size().get(), 10_000);
/// # Ok::<(), debye_bench::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct CalculatorConfig {
    device: Device,
    batch_size: NonZero<usize>,
    parameters: DebyeParameters,
}

impl CalculatorConfig {
    /// Creates a validated configuration snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the parameters fail
    /// [`DebyeParameters::validate()`].
    pub fn new(
        device: Device,
        batch_size: NonZero<usize>,
        parameters: DebyeParameters,
    ) -> crate::Result<Self> {
        parameters.validate()?;

        Ok(Self {
            device,
            batch_size,
            parameters,
        })
    }

    /// The device the calculator is asked to run on.
    #[must_use]
    pub fn device(&self) -> Device {
        self.device
    }

    /// Structure pairs per device dispatch.
    #[must_use]
    pub fn batch_size(&self) -> NonZero<usize> {
        self.batch_size
    }

    /// The Debye calculation parameters.
    #[must_use]
    pub fn parameters(&self) -> &DebyeParameters {
        &self.parameters
    }
}
