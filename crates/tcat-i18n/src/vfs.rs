//! Read-only virtual filesystems for bundled catalogs
//!
//! Paths are `/`-separated and relative to the filesystem root; the root
//! itself is the empty string.

use std::collections::{BTreeMap, BTreeSet};
use std::io;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VfsEntry {
    /// Full path from the filesystem root
    pub path: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl VfsEntry {
    /// A file entry.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    /// A directory entry.
    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }
}

/// Listing and whole-file reads over a read-only tree.
///
/// A missing directory must be reported with [`io::ErrorKind::NotFound`]; the
/// loader treats that kind as "fall back to the root" and propagates any other.
pub trait VirtualFs {
    /// List the immediate children of the directory at `path`.
    fn read_dir(&self, path: &str) -> io::Result<Vec<VfsEntry>>;

    /// Read the whole file at `path`.
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>>;
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{path}: no such file or directory"))
}

fn child_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

impl VirtualFs for include_dir::Dir<'_> {
    fn read_dir(&self, path: &str) -> io::Result<Vec<VfsEntry>> {
        let dir = if path.is_empty() {
            self
        } else {
            self.get_dir(path).ok_or_else(|| not_found(path))?
        };

        Ok(dir
            .entries()
            .iter()
            .map(|entry| {
                let name = entry
                    .path()
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let path = child_path(path, &name);
                match entry {
                    include_dir::DirEntry::Dir(_) => VfsEntry::dir(path),
                    include_dir::DirEntry::File(_) => VfsEntry::file(path),
                }
            })
            .collect())
    }

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        self.get_file(path)
            .map(|file| file.contents().to_vec())
            .ok_or_else(|| not_found(path))
    }
}

/// An in-memory filesystem whose directories are implied by file paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryFs {
    /// An empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the file at `path`.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder form of [`MemoryFs::insert`].
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }
}

impl VirtualFs for MemoryFs {
    fn read_dir(&self, path: &str) -> io::Result<Vec<VfsEntry>> {
        if self.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{path}: not a directory"),
            ));
        }

        let prefix = if path.is_empty() { String::new() } else { format!("{path}/") };
        let mut entries = BTreeSet::new();
        for name in self.files.keys() {
            let Some(rest) = name.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => entries.insert(VfsEntry::dir(child_path(path, dir))),
                None => entries.insert(VfsEntry::file(name.clone())),
            };
        }

        if entries.is_empty() && !path.is_empty() {
            return Err(not_found(path));
        }
        Ok(entries.into_iter().collect())
    }

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| not_found(path))
    }
}
