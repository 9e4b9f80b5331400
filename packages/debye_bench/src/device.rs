//! Selection of the compute device collaborators run on.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::Error;

/// The compute device a benchmark run requests from its collaborators.
///
/// The harness never touches the device itself. The label is passed through to the
/// structure generator and the scattering calculator, and recorded in the run's
/// statistics.
///
/// # Example
///
/// ```
/// use debye_bench::Device;
///
/// let device: Device = "cpu".parse()?;
/// assert_eq!(device, Device::Cpu);
/// assert_eq!(device.to_string(), "cpu");
/// # Ok::<(), debye_bench::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Device {
    /// Run on the host processor.
    Cpu,

    /// Run on a CUDA accelerator.
    #[default]
    Cuda,
}

impl Device {
    /// The lowercase label used in CSV metadata and passed to collaborators.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
        }
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda),
            _ => Err(Error::UnknownDevice {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Device: Send, Sync);

    #[test]
    fn parses_known_devices() {
        assert_eq!("cpu".parse::<Device>().unwrap(), Device::Cpu);
        assert_eq!("cuda".parse::<Device>().unwrap(), Device::Cuda);
    }

    #[test]
    fn rejects_unknown_device() {
        let error = "abacus".parse::<Device>().unwrap_err();

        let Error::UnknownDevice { name } = error else {
            panic!("expected UnknownDevice, got {error:?}");
        };
        assert_eq!(name, "abacus");
    }

    #[test]
    fn default_is_cuda() {
        assert_eq!(Device::default(), Device::Cuda);
    }
}
