//! Selection of the scattering quantity a benchmark evaluates.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::Error;

/// The scattering quantity a benchmark run evaluates.
///
/// The set is closed. A selector string is parsed up front via [`FromStr`] and an
/// unknown name is rejected before any structure is generated or any trial runs;
/// a [`Benchmarker`][crate::Benchmarker] can only ever hold a valid selection.
///
/// # Example
///
/// ```
/// use debye_bench::ScatteringFunction;
///
/// let function: ScatteringFunction = "gr".parse()?;
/// assert_eq!(function, ScatteringFunction::Gr);
/// assert_eq!(function.to_string(), "gr");
///
/// assert!("xyz".parse::<ScatteringFunction>().is_err());
/// # Ok::<(), debye_bench::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the set of supported scattering quantities is closed"
)]
pub enum ScatteringFunction {
    /// Pair distribution function g(r).
    Gr,

    /// Scattering intensity I(q).
    Iq,

    /// Structure function S(q).
    Sq,
}

impl ScatteringFunction {
    /// The lowercase selector used in table titles and CSV metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gr => "gr",
            Self::Iq => "iq",
            Self::Sq => "sq",
        }
    }
}

impl Display for ScatteringFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScatteringFunction {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gr" => Ok(Self::Gr),
            "iq" => Ok(Self::Iq),
            "sq" => Ok(Self::Sq),
            _ => Err(Error::UnknownFunction {
                name: s.to_string(),
            }),
        }
    }
}
