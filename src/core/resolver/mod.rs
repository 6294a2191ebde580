//! # Resolver Module
//!
//! Decides where a source file belongs in the destination tree.
//!
//! ## Algorithm
//! 1. Read the capture timestamp; without one the file is skipped.
//! 2. The target directory is `<root>/YYYY/MM/DD`, a function of the
//!    timestamp alone.
//! 3. Probe `name.ext`, `name-1.ext`, ... `name-98.ext` in order:
//!    - a free slot resolves the destination
//!    - an occupied slot with identical content means the file is already
//!      there (duplicate)
//!    - an occupied slot with different content is a collision, try the next
//! 4. Running out of attempts is reported as exhaustion, never a loop.
//!
//! The destination tree is re-read on every resolution; nothing is cached
//! across files.
//!
//! Resolution only observes the filesystem. The exists-then-copy sequence is
//! not atomic, so concurrent resolvers would need the copy step to create
//! destinations exclusively (the organizer already opens with create-new).

mod candidate;

pub use candidate::{day_bucket, CandidateName};

use crate::core::hasher::{ContentHasher, Fingerprint, Xxh3Hasher};
use crate::core::metadata::{Absence, CaptureTime, ExifTimestampExtractor, TimestampExtractor};
use crate::error::HashError;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Probe attempts per file: the bare name plus suffixes 1 through 98
pub const MAX_PROBE_ATTEMPTS: usize = 99;

/// Result of resolving one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Copy the file to this (currently free) path
    Resolved(PathBuf),
    /// Identical content already exists at this path
    Duplicate(PathBuf),
    /// No capture timestamp could be determined
    TimestampUnavailable(Unavailable),
    /// Every candidate name in the day-bucket holds different content
    ProbeExhausted { directory: PathBuf, attempts: usize },
}

/// Why a capture timestamp was unavailable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// The file was readable but had no usable timestamp
    Absent(Absence),
    /// The file could not be opened or read for metadata
    Unreadable(String),
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::Absent(absence) => write!(f, "{}", absence),
            Unavailable::Unreadable(reason) => write!(f, "{}", reason),
        }
    }
}

/// State of a single probed slot
enum Probe {
    Free,
    Identical,
    Collision,
}

/// Resolves canonical destination paths for source files
pub struct PathResolver {
    extractor: Box<dyn TimestampExtractor>,
    hasher: Box<dyn ContentHasher>,
}

impl PathResolver {
    /// Resolver backed by EXIF timestamps and XXH3 fingerprints
    pub fn new() -> Self {
        Self::with_components(
            Box::new(ExifTimestampExtractor::new()),
            Box::new(Xxh3Hasher::new()),
        )
    }

    /// Resolver with custom timestamp and content collaborators
    pub fn with_components(
        extractor: Box<dyn TimestampExtractor>,
        hasher: Box<dyn ContentHasher>,
    ) -> Self {
        Self { extractor, hasher }
    }

    /// Resolve `source` against `destination_root`.
    ///
    /// Timestamp failures of any kind become
    /// [`ResolutionOutcome::TimestampUnavailable`]. The only error returned is
    /// a failure to fingerprint the source itself, since without it no
    /// occupied slot can be judged.
    pub fn resolve(
        &self,
        source: &Path,
        destination_root: &Path,
    ) -> Result<ResolutionOutcome, HashError> {
        let captured = match self.extractor.extract_capture_time(source) {
            Ok(CaptureTime::Found(captured)) => captured,
            Ok(CaptureTime::Absent(absence)) => {
                return Ok(ResolutionOutcome::TimestampUnavailable(
                    Unavailable::Absent(absence),
                ))
            }
            Err(e) => {
                return Ok(ResolutionOutcome::TimestampUnavailable(
                    Unavailable::Unreadable(e.to_string()),
                ))
            }
        };

        let directory = destination_root.join(day_bucket(captured.date()));
        let candidate = CandidateName::from_path(source);
        let mut source_fingerprint: Option<Fingerprint> = None;

        for attempt in 0..MAX_PROBE_ATTEMPTS {
            let path = directory.join(candidate.file_name(attempt));

            match self.probe(source, &path, &mut source_fingerprint)? {
                Probe::Free => {
                    tracing::debug!(path = %path.display(), attempt, "free slot");
                    return Ok(ResolutionOutcome::Resolved(path));
                }
                Probe::Identical => {
                    tracing::debug!(path = %path.display(), attempt, "identical content");
                    return Ok(ResolutionOutcome::Duplicate(path));
                }
                Probe::Collision => {
                    tracing::debug!(path = %path.display(), attempt, "name taken by different content");
                }
            }
        }

        Ok(ResolutionOutcome::ProbeExhausted {
            directory,
            attempts: MAX_PROBE_ATTEMPTS,
        })
    }

    fn probe(
        &self,
        source: &Path,
        path: &Path,
        source_fingerprint: &mut Option<Fingerprint>,
    ) -> Result<Probe, HashError> {
        match std::fs::symlink_metadata(path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Probe::Free),
            Err(e) => {
                // Cannot prove the slot is free, so leave it alone
                tracing::warn!(path = %path.display(), error = %e, "cannot inspect destination");
                return Ok(Probe::Collision);
            }
        }

        let wanted = match *source_fingerprint {
            Some(fingerprint) => fingerprint,
            None => *source_fingerprint.insert(self.hasher.fingerprint(source)?),
        };

        match self.hasher.fingerprint(path) {
            Ok(existing) if existing == wanted => Ok(Probe::Identical),
            Ok(_) => Ok(Probe::Collision),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot fingerprint existing file");
                Ok(Probe::Collision)
            }
        }
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}
