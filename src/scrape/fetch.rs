// src/scrape/fetch.rs
use std::path::PathBuf;

use crate::{
    config::options::FetchOptions,
    core::net::{DocumentSource, HttpSource},
    error::{Error, Result},
    progress::Progress,
    store::{DocumentStore, FsStore},
    table::IdentifierReader,
};

use super::Failure;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Identifiers stored, in input order (duplicates included).
    pub stored: Vec<String>,
    pub failed: Vec<Failure>,
    /// Document directory, when fetched into the filesystem.
    pub html_dir: Option<PathBuf>,
}

/// Fetch every identifier in the input table into `opts.html_dir` over HTTP.
/// Setup problems (unreadable table, bad source URL) are returned as `Err`;
/// per-row problems end up in `FetchSummary::failed`.
pub fn fetch(
    opts: &FetchOptions,
    progress: &mut dyn Progress,
) -> Result<FetchSummary> {
    let source = HttpSource::new(&opts.source)?;
    fetch_from(opts, &source, progress)
}

/// As [`fetch`], with the documents coming from `source`.
pub fn fetch_from(
    opts: &FetchOptions,
    source: &dyn DocumentSource,
    progress: &mut dyn Progress,
) -> Result<FetchSummary> {
    let ids = IdentifierReader::open(&opts.input, opts.id_column, opts.input_format)?;
    let mut store = FsStore::new(&opts.html_dir);

    logf!(
        "fetching identifiers from {} (column {}) into {}",
        ids.path().display(),
        opts.id_column,
        store.root().display()
    );

    let mut summary = fetch_all(ids, source, &mut store, progress);
    summary.html_dir = Some(store.root().to_path_buf());
    Ok(summary)
}

/// Serial loop: one retrieve + put per identifier, no retries.
/// A repeated identifier is fetched again and overwrites the earlier document.
pub fn fetch_all<I>(
    ids: I,
    source: &dyn DocumentSource,
    store: &mut dyn DocumentStore,
    progress: &mut dyn Progress,
) -> FetchSummary
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut summary = FetchSummary::default();

    progress.begin(None);

    for item in ids {
        let id = match item {
            Ok(id) => id,
            Err(e) => {
                let label = match &e {
                    Error::InputRow { row, .. } => format!("row {row}"),
                    _ => s!("input"),
                };
                loge!("{e}");
                progress.item_failed(&label, &e.to_string());
                summary.failed.push(Failure::new(label, &e));
                continue;
            }
        };

        match fetch_one(&id, source, store) {
            Ok(len) => {
                logd!("{id}: stored {len} bytes");
                progress.item_done(&id);
                summary.stored.push(id);
            }
            Err(e) => {
                loge!("{id}: {e}");
                progress.item_failed(&id, &e.to_string());
                summary.failed.push(Failure::new(id, &e));
            }
        }
    }

    progress.finish();
    logf!("fetch done: {} stored, {} failed", summary.stored.len(), summary.failed.len());
    summary
}

fn fetch_one(id: &str, source: &dyn DocumentSource, store: &mut dyn DocumentStore) -> Result<usize> {
    let body = source.retrieve(id)?;
    store.put(id, &body)?;
    Ok(body.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;
    use crate::store::MemoryStore;
    use std::cell::RefCell;

    /// Serves `<p>{id}</p>`, failing for ids starting with "bad".
    struct EchoSource {
        calls: RefCell<Vec<String>>,
    }

    impl DocumentSource for EchoSource {
        fn retrieve(&self, id: &str) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push(s!(id));
            if id.starts_with("bad") {
                return Err(Error::Status { id: s!(id), status: 500 });
            }
            Ok(format!("<p>{id}</p>").into_bytes())
        }
    }

    fn echo() -> EchoSource {
        EchoSource { calls: RefCell::new(Vec::new()) }
    }

    #[test]
    fn stores_one_document_per_identifier() {
        let src = echo();
        let mut store = MemoryStore::new();
        let ids = vec![Ok(s!("1")), Ok(s!("2"))];
        let sum = fetch_all(ids, &src, &mut store, &mut NullProgress);

        assert_eq!(sum.stored, vec!["1", "2"]);
        assert!(sum.failed.is_empty());
        assert_eq!(store.get("2").unwrap(), b"<p>2</p>");
    }

    #[test]
    fn failures_do_not_stop_the_loop() {
        let src = echo();
        let mut store = MemoryStore::new();
        let ids = vec![
            Ok(s!("1")),
            Err(Error::InputRow { row: 2, reason: s!("too short") }),
            Ok(s!("bad-3")),
            Ok(s!("4")),
        ];
        let sum = fetch_all(ids, &src, &mut store, &mut NullProgress);

        assert_eq!(sum.stored, vec!["1", "4"]);
        assert_eq!(sum.failed.len(), 2);
        assert_eq!(sum.failed[0].id, "row 2");
        assert_eq!(sum.failed[1].id, "bad-3");
        assert!(sum.failed[1].reason.contains("500"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn duplicates_are_refetched_and_overwrite() {
        let src = echo();
        let mut store = MemoryStore::new();
        let sum = fetch_all(vec![Ok(s!("7")), Ok(s!("7"))], &src, &mut store, &mut NullProgress);
        assert_eq!(src.calls.borrow().len(), 2);
        assert_eq!(sum.stored.len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn progress_sees_every_item() {
        #[derive(Default)]
        struct Tally { began: bool, done: usize, failed: usize, finished: bool }
        impl Progress for Tally {
            fn begin(&mut self, _total: Option<usize>) { self.began = true; }
            fn item_done(&mut self, _id: &str) { self.done += 1; }
            fn item_failed(&mut self, _id: &str, _reason: &str) { self.failed += 1; }
            fn finish(&mut self) { self.finished = true; }
        }

        let mut tally = Tally::default();
        let ids = vec![Ok(s!("1")), Ok(s!("bad")), Ok(s!("3"))];
        fetch_all(ids, &echo(), &mut MemoryStore::new(), &mut tally);
        assert!(tally.began && tally.finished);
        assert_eq!((tally.done, tally.failed), (2, 1));
    }
}
