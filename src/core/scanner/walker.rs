//! Directory walking implementation using walkdir.

use super::WalkEntry;
use crate::error::ScanError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Configuration for the directory walker
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to prune dot-files and dot-directories
    pub skip_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
}

/// Walker implementation using the walkdir crate
#[derive(Debug, Clone, Default)]
pub struct SourceWalker {
    config: ScanConfig,
}

impl SourceWalker {
    /// Create a new walker with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Walk `root` in file-name order.
    ///
    /// Fails only if `root` itself is not a directory; problems below the
    /// root are yielded as [`WalkEntry::Error`].
    pub fn walk(&self, root: &Path) -> Result<impl Iterator<Item = WalkEntry>, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let skip_hidden = self.config.skip_hidden;

        Ok(walker
            .into_iter()
            .filter_entry(move |entry| {
                let keep = !skip_hidden || entry.depth() == 0 || !is_hidden(entry);
                if !keep {
                    tracing::debug!(path = %entry.path().display(), "skipping hidden entry");
                }
                keep
            })
            .map(classify))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn classify(result: walkdir::Result<DirEntry>) -> WalkEntry {
    match result {
        Ok(entry) => {
            let file_type = entry.file_type();
            if file_type.is_dir() {
                WalkEntry::Directory(entry.into_path())
            } else if file_type.is_file() {
                WalkEntry::File(entry.into_path())
            } else if file_type.is_symlink() {
                classify_link(entry.into_path())
            } else {
                WalkEntry::Other(entry.into_path())
            }
        }
        Err(e) => {
            let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

            let error = if e.io_error().map(|io| io.kind()) == Some(ErrorKind::PermissionDenied) {
                ScanError::PermissionDenied { path }
            } else {
                ScanError::ReadEntry {
                    path,
                    source: e.into(),
                }
            };

            WalkEntry::Error(error)
        }
    }
}

/// Unfollowed links are judged by their target, without descending
fn classify_link(path: PathBuf) -> WalkEntry {
    match path.metadata() {
        Ok(meta) if meta.is_file() => WalkEntry::File(path),
        Ok(meta) if meta.is_dir() => WalkEntry::Directory(path),
        Ok(_) => WalkEntry::Other(path),
        Err(source) => WalkEntry::Error(ScanError::BrokenLink { path, source }),
    }
}
