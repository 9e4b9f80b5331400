use thiserror::Error;

/// An opaque error returned by an external collaborator (structure generator or
/// scattering calculator).
///
/// The harness never inspects these; they are preserved unmodified as the
/// [`source()`][std::error::Error::source] of the [`Error`] variant that wraps them.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when configuring or running a benchmark.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A scattering function selector did not name a supported quantity.
    #[error("unknown scattering function '{name}': expected one of 'gr', 'iq' or 'sq'")]
    UnknownFunction {
        /// The selector string that failed to parse.
        name: String,
    },

    /// A device selector did not name a supported device.
    #[error("unknown device '{name}': expected 'cpu' or 'cuda'")]
    UnknownDevice {
        /// The selector string that failed to parse.
        name: String,
    },

    /// The calculator configuration failed validation before being handed to the
    /// calculator collaborator.
    #[error("invalid calculator configuration: {problem}")]
    InvalidConfiguration {
        /// A human-readable description of the problem.
        problem: String,
    },

    /// A benchmark CSV file or string did not match the expected format.
    #[error("malformed benchmark CSV at line {line}: {problem}")]
    MalformedCsv {
        /// One-based line number at which parsing failed.
        line: usize,

        /// A human-readable description of the problem.
        problem: String,
    },

    /// Reading or writing a benchmark CSV file failed at the I/O level.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The structure generator collaborator failed. The run was aborted with no
    /// partial result.
    #[error("structure generation failed: {0}")]
    Generation(#[source] CollaboratorError),

    /// The scattering calculator collaborator failed. The run was aborted with no
    /// partial result.
    #[error("scattering computation failed: {0}")]
    Calculation(#[source] CollaboratorError),
}

/// A specialized `Result` type for benchmark operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::error::Error as _;
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn malformed_csv_names_the_line() {
        let error = Error::MalformedCsv {
            line: 7,
            problem: "expected 6 comma-separated values, found 3".to_string(),
        };

        assert!(error.to_string().contains("line 7"));
    }

    #[test]
    fn collaborator_error_is_preserved_as_source() {
        let inner: CollaboratorError = "device fell off the bus".into();
        let error = Error::Generation(inner);

        let source = error.source().expect("wrapped error must surface as source");
        assert_eq!(source.to_string(), "device fell off the bus");
    }
}
