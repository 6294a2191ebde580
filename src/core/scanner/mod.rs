//! # Scanner Module
//!
//! Walks the source tree and feeds every entry to the organizer.
//!
//! Directories and unreadable entries are reported rather than dropped so
//! the caller can log them; neither stops the walk.
//!
//! ## Example
//! ```rust,ignore
//! use media_sorter::core::scanner::{ScanConfig, SourceWalker, WalkEntry};
//!
//! let walker = SourceWalker::new(ScanConfig::default());
//! for entry in walker.walk("/Volumes/CARD/DCIM".as_ref())? {
//!     if let WalkEntry::File(path) = entry {
//!         println!("{}", path.display());
//!     }
//! }
//! ```

mod walker;

pub use walker::{ScanConfig, SourceWalker};

use crate::error::ScanError;
use std::path::{Path, PathBuf};

/// One entry produced by the walk
#[derive(Debug)]
pub enum WalkEntry {
    /// A regular file to organize, possibly reached through a link
    File(PathBuf),
    /// A directory (descended into, never organized itself)
    Directory(PathBuf),
    /// Anything else, such as sockets or devices
    Other(PathBuf),
    /// The walk could not read an entry but continues past it
    Error(ScanError),
}

impl WalkEntry {
    /// Path of the entry, or of the entry that failed
    pub fn path(&self) -> &Path {
        match self {
            WalkEntry::File(p) | WalkEntry::Directory(p) | WalkEntry::Other(p) => p,
            WalkEntry::Error(e) => e.path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_path_is_exposed_for_every_kind() {
        let file = WalkEntry::File(PathBuf::from("/a/b.jpg"));
        assert_eq!(file.path(), Path::new("/a/b.jpg"));

        let error = WalkEntry::Error(ScanError::PermissionDenied {
            path: PathBuf::from("/a/locked"),
        });
        assert_eq!(error.path(), Path::new("/a/locked"));
    }
}
