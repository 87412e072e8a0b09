//! In-memory filesystem double, available under the `testing` feature.

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Mutex;

use crate::fs::{EntryKind, SourceFs};

/// In-memory [`SourceFs`] for unit and integration tests.
///
/// Directory children are visited in the order they were declared. Every
/// [`classify`](SourceFs::classify) call is recorded so callers can assert
/// which paths traversal actually reached.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: HashSet<String>,
    dirs: HashMap<String, Vec<String>>,
    unreadable: HashSet<String>,
    visited: Mutex<Vec<String>>,
}

impl MemoryFs {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.files.insert(path.into());
        self
    }

    /// Adds a directory listing the given child paths. Children that are not
    /// added as files or directories themselves classify as missing.
    #[must_use]
    pub fn with_dir<I, S>(mut self, path: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs
            .insert(path.into(), children.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a directory whose listing fails with a permission error.
    #[must_use]
    pub fn with_unreadable_dir(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.dirs.insert(path.clone(), Vec::new());
        self.unreadable.insert(path);
        self
    }

    /// Returns every path classified so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().expect("memory fs poisoned").clone()
    }
}

impl SourceFs for MemoryFs {
    fn classify(&self, path: &str) -> EntryKind {
        self.visited
            .lock()
            .expect("memory fs poisoned")
            .push(path.to_owned());

        if self.dirs.contains_key(path) {
            EntryKind::Directory
        } else if self.files.contains(path) {
            EntryKind::File
        } else {
            EntryKind::Missing
        }
    }

    fn list(&self, dir: &str) -> io::Result<Vec<String>> {
        if self.unreadable.contains(dir) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot list {dir}"),
            ));
        }
        self.dirs
            .get(dir)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{dir} is not a directory")))
    }
}
