//! CSV persistence for [`Statistics`].
//!
//! The on-disk format is `# KEY value` metadata lines followed by a header row and
//! one comma-separated data row per radius. Loading tolerates files that omit some
//! or all metadata lines, as well as files without a header row.

use std::fs;
use std::path::Path;

use crate::Error;
use crate::statistics::{COLUMN_HEADERS, RunMetadata, Statistics};

const NAME_PREFIX: &str = "# NAME";
const FUNCTION_NAME_PREFIX: &str = "# FUNCTION NAME";
const DEVICE_PREFIX: &str = "# DEVICE";
const BATCH_SIZE_PREFIX: &str = "# BATCH SIZE";

/// Metadata value recorded when a loaded file does not carry the corresponding line.
const UNKNOWN_METADATA: &str = "N/A";

/// Writes the statistics to a CSV file, overwriting any existing file at the path.
///
/// The output starts with one metadata line per [`RunMetadata`] field, followed by
/// a header row and the data rows in the column order of the rendered table.
pub fn write_csv(statistics: &Statistics, path: impl AsRef<Path>) -> crate::Result<()> {
    let mut lines = vec![
        format!("{NAME_PREFIX} {}", statistics.name()),
        format!("{FUNCTION_NAME_PREFIX} {}", statistics.function_name()),
        format!("{DEVICE_PREFIX} {}", statistics.device()),
        format!("{BATCH_SIZE_PREFIX} {}", statistics.batch_size()),
        COLUMN_HEADERS.join(","),
    ];
    lines.extend(statistics.formatted_rows().map(|row| row.join(",")));

    let mut contents = lines.join("\n");
    contents.push('\n');

    fs::write(path, contents)?;
    Ok(())
}

/// Loads statistics from a CSV file previously written by [`write_csv()`] or by a
/// compatible tool.
///
/// Missing metadata lines default to `N/A` (batch size to 0). A leading non-numeric
/// row after the metadata block is treated as the header and skipped. Every other
/// row must hold exactly six numeric fields or the load fails.
pub fn read_csv(path: impl AsRef<Path>) -> crate::Result<Statistics> {
    let contents = fs::read_to_string(path)?;
    parse(&contents)
}

pub(crate) fn parse(contents: &str) -> crate::Result<Statistics> {
    let mut name = String::from(UNKNOWN_METADATA);
    let mut function_name = String::from(UNKNOWN_METADATA);
    let mut device = String::from(UNKNOWN_METADATA);
    let mut batch_size = 0_usize;

    let mut radii = Vec::new();
    let mut atom_counts = Vec::new();
    let mut mean_times = Vec::new();
    let mut std_times = Vec::new();
    let mut generation_memory = Vec::new();
    let mut calculation_memory = Vec::new();

    let mut in_metadata = true;
    let mut header_candidate = true;

    for (index, raw_line) in contents.lines().enumerate() {
        let line_number = index.saturating_add(1);
        let line = raw_line.trim();

        if line.is_empty() {
            continue;
        }

        if in_metadata {
            if let Some(value) = line.strip_prefix(FUNCTION_NAME_PREFIX) {
                function_name = value.trim().to_string();
                continue;
            }
            if let Some(value) = line.strip_prefix(NAME_PREFIX) {
                name = value.trim().to_string();
                continue;
            }
            if let Some(value) = line.strip_prefix(DEVICE_PREFIX) {
                device = value.trim().to_string();
                continue;
            }
            if let Some(value) = line.strip_prefix(BATCH_SIZE_PREFIX) {
                batch_size = value.trim().parse().map_err(|error| Error::MalformedCsv {
                    line: line_number,
                    problem: format!("batch size is not an integer: {error}"),
                })?;
                continue;
            }

            // First line matching no metadata prefix ends the metadata block.
            in_metadata = false;
        }

        let fields: Vec<&str> = line.split(',').collect();

        if header_candidate {
            header_candidate = false;

            let is_header = fields
                .first()
                .is_none_or(|field| field.trim().parse::<f64>().is_err());
            if is_header {
                continue;
            }
        }

        let &[radius, atoms, mean, std, generation, calculation] = fields.as_slice() else {
            return Err(Error::MalformedCsv {
                line: line_number,
                problem: format!("expected 6 columns, found {}", fields.len()),
            });
        };

        radii.push(parse_float(radius, "radius", line_number)?);
        atom_counts.push(parse_count(atoms, "atom count", line_number)?);
        mean_times.push(parse_float(mean, "mean time", line_number)?);
        std_times.push(parse_float(std, "std time", line_number)?);
        generation_memory.push(parse_float(generation, "generation memory", line_number)?);
        calculation_memory.push(parse_float(calculation, "calculation memory", line_number)?);
    }

    Ok(Statistics::new(
        RunMetadata::new(name, function_name, device, batch_size),
        radii,
        atom_counts,
        mean_times,
        std_times,
        generation_memory,
        calculation_memory,
    ))
}

fn parse_float(field: &str, column: &str, line: usize) -> crate::Result<f64> {
    field.trim().parse().map_err(|error| Error::MalformedCsv {
        line,
        problem: format!("{column} is not numeric: {error}"),
    })
}

fn parse_count(field: &str, column: &str, line: usize) -> crate::Result<usize> {
    field.trim().parse().map_err(|error| Error::MalformedCsv {
        line,
        problem: format!("{column} is not an integer: {error}"),
    })
}
