// src/scrape/mod.rs
mod extract;
mod fetch;

pub use extract::{extract, extract_into, ExtractSummary};
pub use fetch::{fetch, fetch_all, fetch_from, FetchSummary};

use crate::error::Error;

/// One identifier or document that did not make it through a stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    /// Record identifier, or `row N` when the input row had none.
    pub id: String,
    pub reason: String,
}

impl Failure {
    pub fn new(id: impl Into<String>, err: &Error) -> Self {
        Self { id: id.into(), reason: err.to_string() }
    }
}
