// src/error.rs
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a single document produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("data table header row (tr.{0}) not found")]
    TableMissing(String),
    #[error("no header cell labelled '{0}' in the data table")]
    OwnerColumnMissing(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("input row {row}: {reason}")]
    InputRow { row: u64, reason: String },

    #[error("invalid record identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("request for '{id}' failed: {source}")]
    Http { id: String, source: reqwest::Error },

    #[error("request for '{id}' returned HTTP {status}")]
    Status { id: String, status: u16 },

    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid source URL '{url}': {reason}")]
    Url { url: String, reason: String },

    #[error("document '{0}' not found in store")]
    NotFound(String),

    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("document '{id}': {source}")]
    Parse { id: String, source: ParseError },
}

impl Error {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io { path: path.as_ref().to_path_buf(), source }
    }

    pub fn csv(path: impl AsRef<Path>, source: csv::Error) -> Self {
        Error::Csv { path: path.as_ref().to_path_buf(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
