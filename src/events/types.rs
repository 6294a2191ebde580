//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted while organizing a source tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Directory walk events
    Walk(WalkEvent),
    /// Per-file resolution events
    Resolve(ResolveEvent),
    /// Copy events
    Copy(CopyEvent),
    /// Run-level events
    Run(RunEvent),
}

/// Events from the directory walk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WalkEvent {
    /// A directory was entered
    Directory { path: PathBuf },
    /// An entry that is neither a file nor a directory was passed over
    Skipped { path: PathBuf },
    /// An entry could not be read but walking continues
    Error { path: PathBuf, message: String },
}

/// Events from resolving a single source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResolveEvent {
    /// A free destination was found
    Resolved {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Identical content is already present
    Duplicate { source: PathBuf, existing: PathBuf },
    /// No capture timestamp, the file is skipped
    TimestampUnavailable { source: PathBuf, reason: String },
    /// Every candidate name was taken by different content
    ProbeExhausted {
        source: PathBuf,
        directory: PathBuf,
        attempts: usize,
    },
    /// Resolution failed outright (e.g. the source could not be hashed)
    Failed { source: PathBuf, message: String },
}

/// Events from the copy step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CopyEvent {
    /// A file was copied into place
    Copied {
        source: PathBuf,
        destination: PathBuf,
        bytes_written: u64,
    },
    /// Dry run: the file would have been copied
    Planned {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Source and destination coincide, nothing was done
    Refused { source: PathBuf, message: String },
    /// The copy failed and any partial output was removed
    Failed {
        source: PathBuf,
        destination: PathBuf,
        message: String,
    },
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    /// Organizing has started
    Started {
        source_root: PathBuf,
        destination_root: PathBuf,
        dry_run: bool,
    },
    /// Organizing finished
    Completed { summary: RunSummary },
}

/// Counters for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Regular files handed to the resolver
    pub files_seen: usize,
    /// Files copied (or planned, in a dry run)
    pub copied: usize,
    /// Files already present with identical content
    pub duplicates: usize,
    /// Files skipped for lack of a capture timestamp
    pub timestamp_unavailable: usize,
    /// Files skipped because every candidate name was taken
    pub probe_exhausted: usize,
    /// Files refused because source and destination coincide
    pub refused: usize,
    /// Walk, hash and copy failures
    pub errors: usize,
    /// Bytes written to the destination tree
    pub bytes_written: u64,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl RunSummary {
    /// Files that were not copied for any reason
    pub fn skipped(&self) -> usize {
        self.duplicates + self.timestamp_unavailable + self.probe_exhausted + self.refused
    }
}
