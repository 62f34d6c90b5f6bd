// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Delim {
    #[default]
    Csv,
    Tsv,
}

impl Delim {
    pub fn ext(&self) -> &'static str {
        match self { Delim::Csv => "csv", Delim::Tsv => "tsv" }
    }
    pub fn byte(&self) -> u8 {
        match self { Delim::Csv => b',', Delim::Tsv => b'\t' }
    }
}

/// What to do with a response whose status is not 2xx.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Store the body regardless of status.
    #[default]
    Lenient,
    /// Count non-2xx as a failed row; nothing is stored.
    Strict,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub base_url: String,
    pub id_param: String,
    pub timeout: Duration,
    pub status: StatusPolicy,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            id_param: s!(ID_PARAM),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            status: StatusPolicy::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub input: PathBuf,      // table of record identifiers
    pub input_format: Delim,
    pub id_column: usize,    // zero-based
    pub html_dir: PathBuf,   // document store root
    pub source: SourceOptions,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            input_format: Delim::Csv,
            id_column: ID_COLUMN,
            html_dir: default_html_dir(),
            source: SourceOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub html_dir: PathBuf,
    pub output: PathBuf,
    pub format: Delim,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        let format = Delim::Csv;
        Self {
            html_dir: default_html_dir(),
            output: default_output_for(format),
            format,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub fetch: FetchOptions,
    pub extract: ExtractOptions,
}

impl PipelineOptions {
    /// Both stages pointed at the same document directory.
    pub fn new(input: PathBuf, html_dir: PathBuf, output: PathBuf) -> Self {
        let mut opts = Self::default();
        opts.fetch.input = input;
        opts.fetch.html_dir = html_dir.clone();
        opts.extract.html_dir = html_dir;
        opts.extract.output = output;
        opts
    }
}

pub fn default_html_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_HTML_SUBDIR)
}

pub fn default_output_for(format: Delim) -> PathBuf {
    PathBuf::from(DEFAULT_OUT_DIR).join(join!(DEFAULT_OUTPUT_FILE, ".", format.ext()))
}
