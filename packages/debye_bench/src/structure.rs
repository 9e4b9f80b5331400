//! Generated nanoparticle structures and the collaborator that produces them.

use std::path::Path;

use crate::device::Device;
use crate::error::CollaboratorError;

/// A nanoparticle structure produced by a [`StructureGenerator`].
///
/// Holds parallel per-atom sequences: the element symbol and the Cartesian position
/// of each atom. The harness never interprets these beyond counting atoms; they are
/// handed to the scattering calculator as-is.
///
/// # Example
///
/// ```
/// use debye_bench::Nanoparticle;
///
/// let structure = Nanoparticle::new(
///     vec!["Au".to_string(), "Au".to_string()],
///     vec![[0.0, 0.0, 0.0], [2.88, 0.0, 0.0]],
/// );
///
/// assert_eq!(structure.size(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Nanoparticle {
    elements: Vec<String>,
    xyz: Vec<[f64; 3]>,
}

impl Nanoparticle {
    /// Creates a structure from parallel element and position sequences.
    ///
    /// # Panics
    ///
    /// Panics if the two sequences differ in length.
    #[must_use]
    pub fn new(elements: Vec<String>, xyz: Vec<[f64; 3]>) -> Self {
        assert_eq!(
            elements.len(),
            xyz.len(),
            "elements and xyz must be parallel sequences of equal length"
        );

        Self { elements, xyz }
    }

    /// Element symbol of each atom.
    #[must_use]
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Cartesian position of each atom, in ångström.
    #[must_use]
    pub fn xyz(&self) -> &[[f64; 3]] {
        &self.xyz
    }

    /// Number of atoms in the structure.
    #[must_use]
    pub fn size(&self) -> usize {
        self.elements.len()
    }
}

/// Generates nanoparticle structures from a structure file.
///
/// This is an external collaborator boundary: the harness does not read structure
/// files itself. Implementations typically carve a particle of the requested radius
/// out of the crystal described by the file.
pub trait StructureGenerator {
    /// Generates one nanoparticle per requested radius, in order.
    ///
    /// The harness invokes this with a single-element slice per radius when
    /// generating individually, or with the whole sweep at once when batched.
    ///
    /// # Errors
    ///
    /// Any error aborts the benchmark run with no partial result; it is surfaced
    /// unmodified as the source of [`Error::Generation`][crate::Error::Generation].
    fn generate(
        &self,
        structure_file: &Path,
        radii: &[f64],
        device: Device,
    ) -> std::result::Result<Vec<Nanoparticle>, CollaboratorError>;
}
