// src/file.rs

use std::{fs, io, path::{Path, PathBuf}};

use crate::error::{Error, Result};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        let e = io::Error::new(io::ErrorKind::AlreadyExists, "path exists but is not a directory");
        return Err(Error::io(dir, e));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}

/// Create the parent directory of `path`, if it has one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

/// An output given as a directory ("out/" or an existing dir) gets `default_filename` appended.
pub fn resolve_output_path(user: &Path, default_filename: &str) -> PathBuf {
    if looks_like_dir_hint(user) || user.is_dir() {
        user.join(default_filename)
    } else {
        user.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_directory_refuses_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "x").unwrap();
        assert!(ensure_directory(&file).is_err());

        let nested = dir.path().join("a").join("b");
        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn ensure_parent_handles_bare_names() {
        ensure_parent(Path::new("rows.csv")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("csv").join("rows.csv");
        ensure_parent(&out).unwrap();
        assert!(dir.path().join("csv").is_dir());
    }

    #[test]
    fn dir_hint() {
        assert!(looks_like_dir_hint(Path::new("out/")));
        assert!(!looks_like_dir_hint(Path::new("out/rows.csv")));
    }

    #[test]
    fn output_dir_gets_default_name() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_output_path(dir.path(), "rows.csv"), dir.path().join("rows.csv"));
        assert_eq!(
            resolve_output_path(Path::new("x/rows.tsv"), "rows.csv"),
            PathBuf::from("x/rows.tsv")
        );
    }
}
