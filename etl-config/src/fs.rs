//! Filesystem access used by source discovery.

use std::io;
use std::path::Path;

use tracing::debug;

/// Classification of a path during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Nothing exists at the path, or it could not be inspected.
    Missing,
    /// A file (anything that exists and is not a directory).
    File,
    /// A directory whose children are candidates for registration.
    Directory,
}

/// Classifier and lister consulted by the registry.
///
/// Implementations must follow symbolic links when classifying.
pub trait SourceFs: Send + Sync {
    /// Classifies `path`.
    fn classify(&self, path: &str) -> EntryKind;

    /// Returns the paths of the direct children of `dir`, each already joined
    /// with `dir`, in the order they should be visited.
    ///
    /// # Errors
    ///
    /// Propagates failures to read the directory.
    fn list(&self, dir: &str) -> io::Result<Vec<String>>;
}

/// [`SourceFs`] backed by the operating system.
///
/// Children are listed sorted by file name so that traversal order does not
/// depend on the platform's directory iteration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl SourceFs for OsFs {
    fn classify(&self, path: &str) -> EntryKind {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            Ok(_) => EntryKind::File,
            Err(err) => {
                debug!(path, error = %err, "configuration source not accessible");
                EntryKind::Missing
            }
        }
    }

    fn list(&self, dir: &str) -> io::Result<Vec<String>> {
        let mut names = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();

        let base = Path::new(dir);
        Ok(names
            .into_iter()
            .map(|name| {
                // Non UTF-8 names become lossy strings; they then classify as
                // missing and surface as an error instead of being skipped.
                base.join(name)
                    .into_os_string()
                    .into_string()
                    .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
            })
            .collect())
    }
}
