//! Descriptor vocabulary.
//!
//! Descriptors are mood, genre and texture words ("hazy", "krautrock",
//! "lush") a user can add to a vibe as extras. The vocabulary file is a
//! CSV; the first column holding text is used.

use std::path::Path;

use csv::StringRecord;

use crate::error::{LoadError, LoadResult};

/// Most descriptors kept from a vocabulary file.
pub const MAX_DESCRIPTORS: usize = 3000;

/// Descriptors shown when no limit is given.
pub const DISPLAY_DESCRIPTORS: usize = 120;

fn is_text(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_err()
}

/// Index of the first column with at least one non-numeric value.
fn text_column(records: &[StringRecord]) -> Option<usize> {
    let width = records.iter().map(StringRecord::len).max()?;
    (0..width).find(|&col| {
        records
            .iter()
            .filter_map(|record| record.get(col))
            .any(|value| is_text(value.trim()))
    })
}

/// Load descriptor words from `path`, in file order.
///
/// The first row is a header. A file holding only a single line is read
/// as a comma-separated word list instead. Blank values are skipped and at
/// most [`MAX_DESCRIPTORS`] words are returned.
pub fn load_descriptors(path: &Path) -> LoadResult<Vec<String>> {
    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error)?;

    if records.is_empty() {
        let headers = reader.headers().map_err(csv_error)?.clone();
        records = headers
            .iter()
            .map(|word| StringRecord::from(vec![word]))
            .collect();
    }

    let descriptors: Vec<String> = match text_column(&records) {
        Some(column) => records
            .iter()
            .filter_map(|record| record.get(column))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .take(MAX_DESCRIPTORS)
            .map(String::from)
            .collect(),
        None => Vec::new(),
    };

    log::info!(
        "Loaded {} descriptors from {}",
        descriptors.len(),
        path.display()
    );
    Ok(descriptors)
}
