//! Batch form input from CSV.
//!
//! The header row names form fields by key, in any order. Each following row
//! becomes one form submission. Cells are trimmed; an empty cell leaves the
//! field empty, so validation reports it like an unanswered input.
//!
//! ```csv
//! num_scenarios
//! 5
//! 20
//! ```
//!
//! A column that is not a field of the target page is rejected before any
//! row is read.

use std::{fs::File, io::Read, path::Path};

use thiserror::Error;
use warc_core::FormSchema;

#[derive(Debug, Error)]
pub enum CsvLoadError {
    #[error("cannot open CSV file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The header row itself could not be read.
    #[error("CSV header error: {0}")]
    Header(#[source] csv::Error),

    #[error("unknown column '{column}'; expected one of: {expected}")]
    UnknownColumn { column: String, expected: String },

    #[error("column '{0}' appears more than once")]
    DuplicateColumn(String),

    /// A data row was malformed. `row` is 1-based, the header is row 0.
    #[error("CSV error on row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// Field values for one submission, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvForm {
    /// 1-based data row number.
    pub row: usize,
    pub values: Vec<(&'static str, String)>,
}

/// Reads every row of `input` as a form for `schema`.
///
/// # Errors
///
/// * [`CsvLoadError::UnknownColumn`] / [`CsvLoadError::DuplicateColumn`]
///   for a bad header.
/// * [`CsvLoadError::Row`] when a row has the wrong number of cells.
pub fn load_forms<R: Read>(
    input: R,
    schema: FormSchema,
) -> Result<Vec<CsvForm>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input);

    let keys = header_keys(reader.headers().map_err(CsvLoadError::Header)?, schema)?;

    reader
        .records()
        .enumerate()
        .map(|(idx, record)| {
            let row = idx + 1;
            let record = record.map_err(|source| CsvLoadError::Row { row, source })?;
            let values = keys
                .iter()
                .zip(record.iter())
                .map(|(key, cell)| (*key, cell.to_string()))
                .collect();
            Ok(CsvForm { row, values })
        })
        .collect()
}

pub fn load_forms_from_str(
    input: &str,
    schema: FormSchema,
) -> Result<Vec<CsvForm>, CsvLoadError> {
    load_forms(input.as_bytes(), schema)
}

pub fn load_forms_from_file(
    path: &Path,
    schema: FormSchema,
) -> Result<Vec<CsvForm>, CsvLoadError> {
    let file = File::open(path).map_err(|source| CsvLoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    load_forms(file, schema)
}

/// Maps each header cell to the schema's static field key.
fn header_keys(
    headers: &csv::StringRecord,
    schema: FormSchema,
) -> Result<Vec<&'static str>, CsvLoadError> {
    let mut keys: Vec<&'static str> = Vec::with_capacity(headers.len());
    for column in headers {
        let spec = schema
            .field(column)
            .ok_or_else(|| CsvLoadError::UnknownColumn {
                column: column.to_string(),
                expected: schema.names().collect::<Vec<_>>().join(", "),
            })?;
        if keys.contains(&spec.name) {
            return Err(CsvLoadError::DuplicateColumn(column.to_string()));
        }
        keys.push(spec.name);
    }
    Ok(keys)
}
