// src/scrape/extract.rs
use std::path::PathBuf;

use crate::{
    config::{consts::OUTPUT_HEADERS, options::ExtractOptions},
    error::{Error, Result},
    progress::Progress,
    specs::PropertySpec,
    store::{DocumentStore, FsStore},
    table::RecordWriter,
};

use super::Failure;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Documents listed in the store.
    pub documents: usize,
    pub rows_written: usize,
    /// Documents that produced no row, with the reason.
    pub failed: Vec<Failure>,
    pub output: PathBuf,
}

/// Parse every document under `opts.html_dir` into `opts.output`.
/// The output table is (re)created with its header before the first document.
pub fn extract(
    opts: &ExtractOptions,
    progress: &mut dyn Progress,
) -> Result<ExtractSummary> {
    let store = FsStore::new(&opts.html_dir);
    let spec = PropertySpec::new()?;

    // List before truncating the output, so a bad html dir leaves it untouched.
    let ids = store.list()?;
    let mut writer = RecordWriter::create(&opts.output, &OUTPUT_HEADERS, opts.format)?;

    logf!(
        "extracting {} document(s) from {} into {}",
        ids.len(),
        opts.html_dir.display(),
        opts.output.display()
    );

    Ok(extract_ids(&ids, &store, &spec, &mut writer, progress))
}

/// Same loop over any store, writing into an already-created table.
pub fn extract_into(
    store: &dyn DocumentStore,
    spec: &PropertySpec,
    writer: &mut RecordWriter,
    progress: &mut dyn Progress,
) -> Result<ExtractSummary> {
    let ids = store.list()?;
    Ok(extract_ids(&ids, store, spec, writer, progress))
}

fn extract_ids(
    ids: &[String],
    store: &dyn DocumentStore,
    spec: &PropertySpec,
    writer: &mut RecordWriter,
    progress: &mut dyn Progress,
) -> ExtractSummary {
    let mut summary = ExtractSummary {
        documents: ids.len(),
        output: writer.path().to_path_buf(),
        ..ExtractSummary::default()
    };

    progress.begin(Some(ids.len()));

    for id in ids {
        match extract_one(id, store, spec, writer) {
            Ok(()) => {
                summary.rows_written += 1;
                progress.item_done(id);
            }
            Err(e) => {
                match &e {
                    Error::Parse { .. } => logw!("{e}"),
                    _ => loge!("{e}"),
                }
                progress.item_failed(id, &e.to_string());
                summary.failed.push(Failure::new(id.as_str(), &e));
            }
        }
    }

    progress.finish();
    logf!(
        "extract done: {} row(s) from {} document(s), {} failed",
        summary.rows_written,
        summary.documents,
        summary.failed.len()
    );
    summary
}

fn extract_one(
    id: &str,
    store: &dyn DocumentStore,
    spec: &PropertySpec,
    writer: &mut RecordWriter,
) -> Result<()> {
    let raw = store.get(id)?;
    let html = String::from_utf8_lossy(&raw);
    let record = spec
        .parse(&html)
        .map_err(|source| Error::Parse { id: s!(id), source })?;
    writer.append(&record.to_row())
}
