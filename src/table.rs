// src/table.rs
// Delimited-text IO: identifiers in, extracted records out.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::options::Delim;
use crate::core::sanitize::is_safe_identifier;
use crate::error::{Error, Result};
use crate::file::ensure_parent;

/* ---------------- Input ---------------- */

/// Streams record identifiers from one column of an input table.
/// The first row is a header and is skipped. Each item is one data row:
/// a bad row yields an `Err` and iteration carries on with the next.
pub struct IdentifierReader {
    records: csv::StringRecordsIntoIter<File>,
    column: usize,
    path: PathBuf,
    row: u64,
}

impl IdentifierReader {
    /// Opening is a setup step: a missing or unreadable table fails here.
    pub fn open(path: &Path, column: usize, delim: Delim) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .delimiter(delim.byte())
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| Error::csv(path, e))?;

        Ok(Self {
            records: reader.into_records(),
            column,
            path: path.to_path_buf(),
            row: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for IdentifierReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let rec = self.records.next()?;
        self.row += 1;
        let row = self.row;

        let rec = match rec {
            Ok(r) => r,
            Err(e) => return Some(Err(Error::InputRow { row, reason: e.to_string() })),
        };

        let Some(cell) = rec.get(self.column) else {
            return Some(Err(Error::InputRow {
                row,
                reason: format!("has {} column(s), identifier expected in column {}", rec.len(), self.column),
            }));
        };

        let id = cell.trim();
        if !is_safe_identifier(id) {
            return Some(Err(Error::InputRow {
                row,
                reason: Error::InvalidIdentifier(s!(id)).to_string(),
            }));
        }
        Some(Ok(s!(id)))
    }
}

/* ---------------- Output ---------------- */

/// One open handle for the whole run. The header goes out on creation;
/// every appended row is flushed so an interrupted run leaves whole rows.
pub struct RecordWriter {
    inner: csv::Writer<File>,
    path: PathBuf,
    rows: usize,
}

impl RecordWriter {
    pub fn create(path: &Path, headers: &[&str], delim: Delim) -> Result<Self> {
        ensure_parent(path)?;
        let inner = csv::WriterBuilder::new()
            .delimiter(delim.byte())
            .from_path(path) // truncate/overwrite
            .map_err(|e| Error::csv(path, e))?;

        let mut w = Self { inner, path: path.to_path_buf(), rows: 0 };
        w.inner.write_record(headers).map_err(|e| Error::csv(path, e))?;
        w.flush()?;
        Ok(w)
    }

    pub fn append(&mut self, row: &[String]) -> Result<()> {
        self.inner
            .write_record(row)
            .map_err(|e| Error::csv(&self.path, e))?;
        self.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(|e| Error::io(&self.path, e))
    }
}
