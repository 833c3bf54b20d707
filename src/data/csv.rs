//! Delimited-text loading for labelled tabular data.
//!
//! Format:
//! - UTF-8, one sample per line, configurable single-character delimiter
//! - Optional header row (auto-detected: the first row is a header only if
//!   every cell is non-numeric, so a typo in a data row is still an error)
//! - Double-quoted fields may contain the delimiter; `""` is an escaped quote
//! - The last column is the class; `label_offset` is subtracted from it and
//!   the result must be 0 or 1

use std::path::Path;

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads and parses a delimited file.
pub fn load_csv<P: AsRef<Path>>(path: P, delimiter: char, label_offset: f64) -> Result<Dataset> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let data = parse_csv(&text, delimiter, label_offset)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        samples = data.len(),
        features = data.n_features(),
        "loaded dataset"
    );
    Ok(data)
}

/// Parses delimited text into a `Dataset`.
pub fn parse_csv(text: &str, delimiter: char, label_offset: f64) -> Result<Dataset> {
    let mut lines = text.lines().peekable();

    if let Some(first) = lines.peek() {
        if is_header(first, delimiter) {
            lines.next();
        }
    }

    let mut features: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<f64> = Vec::new();

    for (row_idx, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row_num = row_idx + 1;

        let cells = parse_row(line, delimiter);
        if cells.len() < 2 {
            return Err(Error::Dataset(format!(
                "Row {}: expected at least 2 columns (features + class), got {}",
                row_num,
                cells.len()
            )));
        }

        let (feature_cells, label_cell) = cells.split_at(cells.len() - 1);
        let feats = parse_floats(feature_cells, row_num)?;
        let label = parse_floats(label_cell, row_num)?[0] - label_offset;
        if label != 0.0 && label != 1.0 {
            return Err(Error::Dataset(format!(
                "Row {}: class '{}' minus offset {} is not 0 or 1",
                row_num,
                label_cell[0].trim(),
                label_offset
            )));
        }

        features.push(feats);
        labels.push(label);
    }

    if features.is_empty() {
        return Err(Error::Dataset("CSV contains no data rows after parsing".into()));
    }

    Dataset::new(features, labels)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn is_header(line: &str, delimiter: char) -> bool {
    parse_row(line, delimiter).iter().all(|c| c.trim().parse::<f64>().is_err())
}

/// Splits one row on `delimiter`, honouring double quotes.
fn parse_row(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn parse_floats(cells: &[String], row_num: usize) -> Result<Vec<f64>> {
    cells
        .iter()
        .map(|c| {
            c.trim().parse::<f64>().map_err(|_| {
                Error::Dataset(format!("Row {}: '{}' is not a valid number", row_num, c))
            })
        })
        .collect()
}
