//! The per-run statistics container and its table rendering.

use std::fmt::{self, Display};

use itertools::izip;

/// Column headers shared by the rendered table and the CSV header row.
pub(crate) const COLUMN_HEADERS: [&str; 6] = [
    "Radius [Å]",
    "Num. atoms",
    "Mean [s]",
    "Std [s]",
    "Peak mem. (gen.) [MB]",
    "Peak mem. (calc.) [MB]",
];

/// Identifying metadata of a benchmark run.
///
/// Stored as plain strings so that statistics loaded from foreign CSV files (whose
/// metadata may name anything) round-trip exactly.
#[derive(Clone, Debug)]
pub struct RunMetadata {
    name: String,
    function_name: String,
    device: String,
    batch_size: usize,
}

impl RunMetadata {
    /// Creates run metadata from the structure file name, the scattering function
    /// selector, the device label and the calculator batch size.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        function_name: impl Into<String>,
        device: impl Into<String>,
        batch_size: usize,
    ) -> Self {
        Self {
            name: name.into(),
            function_name: function_name.into(),
            device: device.into(),
            batch_size,
        }
    }

    /// The structure file name the run was benchmarked against.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scattering function selector, e.g. `gr`.
    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// The device label, e.g. `cuda`.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Structure pairs per device dispatch during the run.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

/// The result of one benchmark run (or one loaded CSV file): run metadata plus six
/// parallel per-radius sequences.
///
/// Conceptually immutable once assembled. Render with [`Display`] or persist with
/// [`write_csv()`][crate::write_csv].
///
/// # Example
///
/// ```
/// use debye_bench::{RunMetadata, Statistics};
///
/// let statistics = Statistics::new(
///     RunMetadata::new("test.cif", "gr", "cpu", 1000),
///     vec![5.0],
///     vec![120],
///     vec![0.01234],
///     vec![0.0005],
///     vec![0.0],
///     vec![0.0],
/// );
///
/// assert_eq!(statistics.len(), 1);
/// println!("{statistics}");
/// ```
#[derive(Clone, Debug)]
pub struct Statistics {
    metadata: RunMetadata,
    radii: Vec<f64>,
    atom_counts: Vec<usize>,
    mean_times: Vec<f64>,
    std_times: Vec<f64>,
    generation_memory: Vec<f64>,
    calculation_memory: Vec<f64>,
}

impl Statistics {
    /// Creates statistics from six parallel per-radius sequences.
    ///
    /// # Panics
    ///
    /// Panics if any sequence's length differs from the radius sequence's length.
    #[must_use]
    pub fn new(
        metadata: RunMetadata,
        radii: Vec<f64>,
        atom_counts: Vec<usize>,
        mean_times: Vec<f64>,
        std_times: Vec<f64>,
        generation_memory: Vec<f64>,
        calculation_memory: Vec<f64>,
    ) -> Self {
        assert_eq!(
            atom_counts.len(),
            radii.len(),
            "atom_counts must parallel radii"
        );
        assert_eq!(
            mean_times.len(),
            radii.len(),
            "mean_times must parallel radii"
        );
        assert_eq!(
            std_times.len(),
            radii.len(),
            "std_times must parallel radii"
        );
        assert_eq!(
            generation_memory.len(),
            radii.len(),
            "generation_memory must parallel radii"
        );
        assert_eq!(
            calculation_memory.len(),
            radii.len(),
            "calculation_memory must parallel radii"
        );

        Self {
            metadata,
            radii,
            atom_counts,
            mean_times,
            std_times,
            generation_memory,
            calculation_memory,
        }
    }

    /// The run's identifying metadata.
    #[must_use]
    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    /// The structure file name the run was benchmarked against.
    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    /// The scattering function selector, e.g. `gr`.
    #[must_use]
    pub fn function_name(&self) -> &str {
        self.metadata.function_name()
    }

    /// The device label, e.g. `cuda`.
    #[must_use]
    pub fn device(&self) -> &str {
        self.metadata.device()
    }

    /// Structure pairs per device dispatch during the run.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.metadata.batch_size()
    }

    /// The swept particle radii, in ångström.
    #[must_use]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Atoms in the structure generated for each radius.
    #[must_use]
    pub fn atom_counts(&self) -> &[usize] {
        &self.atom_counts
    }

    /// Mean elapsed calculation time per radius, in seconds.
    #[must_use]
    pub fn mean_times(&self) -> &[f64] {
        &self.mean_times
    }

    /// Population standard deviation of the calculation time per radius, in seconds.
    #[must_use]
    pub fn std_times(&self) -> &[f64] {
        &self.std_times
    }

    /// Peak memory observed while generating each radius's structure, in MB.
    #[must_use]
    pub fn generation_memory(&self) -> &[f64] {
        &self.generation_memory
    }

    /// Mean peak memory observed across each radius's retained trials, in MB.
    #[must_use]
    pub fn calculation_memory(&self) -> &[f64] {
        &self.calculation_memory
    }

    /// Number of per-radius entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    /// Whether the statistics hold no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Prints the rendered table to standard output.
    #[cfg_attr(test, mutants::skip)] // Output-only convenience; tests render via Display directly.
    pub fn print_to_stdout(&self) {
        print!("{self}");
    }

    /// One formatted cell row per radius, in table and CSV column order.
    ///
    /// Radii render like `f64`'s `Debug` (`5.0`, `7.25`); times and memory render
    /// with exactly five decimal places.
    pub(crate) fn formatted_rows(&self) -> impl Iterator<Item = [String; 6]> + '_ {
        izip!(
            &self.radii,
            &self.atom_counts,
            &self.mean_times,
            &self.std_times,
            &self.generation_memory,
            &self.calculation_memory
        )
        .map(|(radius, atom_count, mean, std, generation, calculation)| {
            [
                format!("{radius:?}"),
                atom_count.to_string(),
                format!("{mean:.5}"),
                format!("{std:.5}"),
                format!("{generation:.5}"),
                format!("{calculation:.5}"),
            ]
        })
    }

    fn title(&self) -> String {
        format!(
            "Benchmark / {} / {} / Batch Size: {}",
            self.metadata.function_name(),
            capitalize(self.metadata.device()),
            self.metadata.batch_size()
        )
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 6]> = self.formatted_rows().collect();

        let mut widths: [usize; 6] = [0; 6];
        for (width, header) in widths.iter_mut().zip(COLUMN_HEADERS.iter()) {
            *width = header.chars().count();
        }
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let title = self.title();

        // Widen the last column if the title would not fit the frame otherwise.
        let deficit = title
            .chars()
            .count()
            .saturating_sub(title_width(&widths));
        if deficit > 0 {
            if let Some(last) = widths.last_mut() {
                *last = last.saturating_add(deficit);
            }
        }

        let full_rule = "-".repeat(line_length(&widths).saturating_sub(2));
        writeln!(f, "+{full_rule}+")?;

        let width = title_width(&widths);
        writeln!(f, "| {title:^width$} |")?;

        write_rule(f, &widths)?;
        write_row(f, &widths, COLUMN_HEADERS)?;
        write_rule(f, &widths)?;

        if !rows.is_empty() {
            for row in &rows {
                write_row(f, &widths, row.iter().map(String::as_str))?;
            }
            write_rule(f, &widths)?;
        }

        Ok(())
    }
}

/// Rendered length of a bordered table line: one `|` plus, per column, two padding
/// spaces, the cell and the closing `|`.
fn line_length(widths: &[usize; 6]) -> usize {
    widths
        .iter()
        .map(|width| width.saturating_add(3))
        .sum::<usize>()
        .saturating_add(1)
}

/// Space available to the centered title between the frame's padding.
fn title_width(widths: &[usize; 6]) -> usize {
    line_length(widths).saturating_sub(4)
}

fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize; 6]) -> fmt::Result {
    f.write_str("+")?;
    for width in widths {
        let dashes = "-".repeat(width.saturating_add(2));
        write!(f, "{dashes}+")?;
    }
    writeln!(f)
}

fn write_row<'a>(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize; 6],
    cells: impl IntoIterator<Item = &'a str>,
) -> fmt::Result {
    f.write_str("|")?;
    for (cell, width) in cells.into_iter().zip(widths.iter()) {
        let width = *width;
        write!(f, " {cell:>width$} |")?;
    }
    writeln!(f)
}

/// First character uppercased, the rest lowercased, as conventional in run titles.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}
