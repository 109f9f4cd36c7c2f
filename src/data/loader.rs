use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::model::{Dataset, Table, ENTRY_COLUMNS, INSTITUTION_COLUMNS};
use crate::error::QueryError;

// ---------------------------------------------------------------------------
// CSV readers
// ---------------------------------------------------------------------------

/// Read `columns` (in that order) from the CSV file at `path`.
pub fn load_columns(path: &Path, columns: &[&str]) -> Result<Table> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_columns(file, columns).with_context(|| format!("reading {}", path.display()))
}

/// Read `columns` from any CSV source with a header row.
///
/// Cells are kept verbatim; numeric interpretation is left to the queries.
/// Short records are padded with empty cells.
pub fn read_columns<R: Read>(source: R, columns: &[&str]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        // Excel exports of the HESA file carry a byte-order mark.
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let indices = columns
        .iter()
        .map(|col| {
            headers
                .iter()
                .position(|h| h == col)
                .ok_or_else(|| QueryError::MissingColumn {
                    column: col.to_string(),
                    available: headers.clone(),
                })
        })
        .collect::<Result<Vec<usize>, QueryError>>()?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(
            indices
                .iter()
                .map(|&i| record.get(i).unwrap_or("").to_string())
                .collect(),
        );
    }

    Ok(Table::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows,
    ))
}

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

/// Where a [`Dataset`] snapshot comes from.
pub trait DataSource {
    fn load(&self) -> Result<Dataset>;

    /// Human-readable origin, shown in the status bar and logs.
    fn describe(&self) -> String;
}

/// The two CSV files of the published dataset inside one directory.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    pub dir: PathBuf,
    pub institutions_file: String,
    pub entries_file: String,
}

impl DataSource for CsvDirectory {
    fn load(&self) -> Result<Dataset> {
        let institutions = load_columns(&self.dir.join(&self.institutions_file), &INSTITUTION_COLUMNS)
            .context("loading institution reference table")?;
        let entries = load_columns(&self.dir.join(&self.entries_file), &ENTRY_COLUMNS)
            .context("loading metric table")?;
        Ok(Dataset {
            institutions,
            entries,
        })
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// CSV text held in memory.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct InMemorySource {
    institutions_csv: String,
    entries_csv: String,
}

#[cfg(test)]
impl InMemorySource {
    pub fn new(institutions_csv: impl Into<String>, entries_csv: impl Into<String>) -> Self {
        InMemorySource {
            institutions_csv: institutions_csv.into(),
            entries_csv: entries_csv.into(),
        }
    }
}

#[cfg(test)]
impl DataSource for InMemorySource {
    fn load(&self) -> Result<Dataset> {
        Ok(Dataset {
            institutions: read_columns(self.institutions_csv.as_bytes(), &INSTITUTION_COLUMNS)
                .context("parsing institution CSV")?,
            entries: read_columns(self.entries_csv.as_bytes(), &ENTRY_COLUMNS)
                .context("parsing metric CSV")?,
        })
    }

    fn describe(&self) -> String {
        "in-memory dataset".to_string()
    }
}
