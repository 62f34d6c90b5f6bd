// src/runner.rs
use crate::{
    config::options::PipelineOptions,
    core::net::{DocumentSource, HttpSource},
    error::Result,
    file::ensure_directory,
    progress::Progress,
    scrape::{self, ExtractSummary, FetchSummary},
};

/// Summary of both stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub fetch: FetchSummary,
    pub extract: ExtractSummary,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        !self.fetch.failed.is_empty() || !self.extract.failed.is_empty()
    }
}

/// Fetch over HTTP, then extract.
pub fn run(
    opts: &PipelineOptions,
    progress: &mut dyn Progress,
) -> Result<RunSummary> {
    let source = HttpSource::new(&opts.fetch.source)?;
    run_with(opts, &source, progress)
}

/// Fetch into the html directory, then extract from whatever that directory
/// holds afterwards (documents from earlier runs included).
pub fn run_with(
    opts: &PipelineOptions,
    source: &dyn DocumentSource,
    progress: &mut dyn Progress,
) -> Result<RunSummary> {
    progress.log("Fetching documents…");
    let fetch = scrape::fetch_from(&opts.fetch, source, progress)?;

    let mut extract_opts = opts.extract.clone();
    if let Some(dir) = &fetch.html_dir {
        extract_opts.html_dir = dir.clone();
    }
    // Nothing stored means the dir was never created; extract still writes the header.
    ensure_directory(&extract_opts.html_dir)?;

    progress.log("Extracting records…");
    let extract = scrape::extract(&extract_opts, progress)?;

    Ok(RunSummary { fetch, extract })
}
