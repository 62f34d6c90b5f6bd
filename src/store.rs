// src/store.rs
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::consts::DOC_EXT;
use crate::core::sanitize::is_safe_identifier;
use crate::error::{Error, Result};
use crate::file::ensure_directory;

/// Raw documents keyed by record identifier.
/// The fetch stage only writes, the extract stage only reads.
pub trait DocumentStore {
    /// Store `body` under `id`, replacing any previous document.
    fn put(&mut self, id: &str, body: &[u8]) -> Result<()>;

    /// Identifiers currently stored, in the backend's natural order.
    fn list(&self) -> Result<Vec<String>>;

    fn get(&self, id: &str) -> Result<Vec<u8>>;
}

/// A directory with one `{id}.{ext}` file per document.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
    ext: String,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_extension(root, DOC_EXT)
    }

    pub fn with_extension(root: impl Into<PathBuf>, ext: &str) -> Self {
        Self { root: root.into(), ext: s!(ext.trim_start_matches('.')) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &str) -> Result<PathBuf> {
        if !is_safe_identifier(id) {
            return Err(Error::InvalidIdentifier(s!(id)));
        }
        Ok(self.root.join(join!(id, ".", &self.ext)))
    }
}

impl DocumentStore for FsStore {
    fn put(&mut self, id: &str, body: &[u8]) -> Result<()> {
        let path = self.path_for(id)?;
        // Checked on every write: the directory may vanish mid-run.
        ensure_directory(&self.root)?;
        fs::write(&path, body).map_err(|e| Error::io(&path, e))
    }

    /// `read_dir` order, which is unspecified.
    fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Error::io(&self.root, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    logw!("{}: skipping unreadable entry: {e}", self.root.display());
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() { continue; }
            if path.extension().and_then(|s| s.to_str()) != Some(self.ext.as_str()) { continue; }

            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => ids.push(s!(stem)),
                None => logw!("{}: skipping non-UTF-8 file name", path.display()),
            }
        }
        Ok(ids)
    }

    fn get(&self, id: &str) -> Result<Vec<u8>> {
        let path = self.path_for(id)?;
        fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound(s!(id)),
            _ => Error::io(&path, e),
        })
    }
}

/// In-memory store; lists in identifier order.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    docs: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn put(&mut self, id: &str, body: &[u8]) -> Result<()> {
        self.docs.insert(s!(id), body.to_vec());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.docs.keys().cloned().collect())
    }

    fn get(&self, id: &str) -> Result<Vec<u8>> {
        self.docs.get(id).cloned().ok_or_else(|| Error::NotFound(s!(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_put_names_file_after_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsStore::new(dir.path().join("html"));
        store.put("12345", b"<html></html>").unwrap();

        let path = dir.path().join("html").join("12345.html");
        assert_eq!(fs::read(&path).unwrap(), b"<html></html>");
        assert_eq!(store.get("12345").unwrap(), b"<html></html>");
    }

    #[test]
    fn fs_put_recreates_deleted_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("html");
        let mut store = FsStore::new(&root);
        store.put("a", b"1").unwrap();
        fs::remove_dir_all(&root).unwrap();
        store.put("b", b"2").unwrap();
        assert_eq!(store.list().unwrap(), vec![s!("b")]);
    }

    #[test]
    fn fs_list_filters_extension_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsStore::new(dir.path());
        store.put("a", b"1").unwrap();
        store.put("b", b"2").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested.html")).unwrap();

        let mut ids = store.list().unwrap();
        ids.sort();
        assert_eq!(ids, vec![s!("a"), s!("b")]);
    }

    #[test]
    fn fs_rejects_path_like_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsStore::new(dir.path());
        assert!(matches!(store.put("../x", b""), Err(Error::InvalidIdentifier(_))));
        assert!(matches!(store.get(""), Err(Error::InvalidIdentifier(_))));
    }

    #[test]
    fn missing_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        assert!(matches!(store.get("nope"), Err(Error::NotFound(id)) if id == "nope"));
        assert!(matches!(MemoryStore::new().get("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryStore::new();
        store.put("b", b"first").unwrap();
        store.put("a", b"x").unwrap();
        store.put("b", b"second").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.list().unwrap(), vec![s!("a"), s!("b")]);
        assert_eq!(store.get("b").unwrap(), b"second");
    }
}
