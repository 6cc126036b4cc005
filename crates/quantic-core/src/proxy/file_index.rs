//! Snapshot of the files present in the static directory.
//!
//! Built once at startup and consulted by [`RoutePolicy`](super::RoutePolicy)
//! when the tie-break prefers files that actually exist. Files added after
//! startup are not seen until restart.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Set of `/`-rooted request paths that map to regular files.
#[derive(Debug, Clone, Default)]
pub struct LocalFileIndex {
    files: HashSet<String>,
}

impl LocalFileIndex {
    /// Walk `root` recursively. Symlinked directories are not followed.
    pub fn scan(root: &Path) -> io::Result<Self> {
        let mut files = HashSet::new();
        walk(root, "", &mut files)?;
        tracing::debug!("Indexed {} static files under {}", files.len(), root.display());
        Ok(Self { files })
    }

    /// Index built from known request paths.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { files: paths.into_iter().map(Into::into).collect() }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn walk(dir: &Path, prefix: &str, files: &mut HashSet<String>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let request_path = format!("{}/{}", prefix, name);
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk(&entry.path(), &request_path, files)?;
        } else if file_type.is_file() {
            files.insert(request_path);
        } else if file_type.is_symlink() {
            // Dangling links are skipped
            if fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false) {
                files.insert(request_path);
            }
        }
    }
    Ok(())
}
