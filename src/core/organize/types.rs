//! Types for the organize module.

use crate::core::scanner::ScanConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for an organize run
#[derive(Debug, Clone, Default)]
pub struct OrganizeConfig {
    /// Tree to read media from
    pub source_root: PathBuf,
    /// Tree to sort media into
    pub destination_root: PathBuf,
    /// Resolve everything but write nothing
    pub dry_run: bool,
    /// Walker configuration
    pub scan_config: ScanConfig,
}

/// What happened to a single source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileDisposition {
    /// Copied to the destination (or would be, in a dry run)
    Copied { destination: PathBuf, bytes: u64 },
    /// Identical content already present
    Duplicate { existing: PathBuf },
    /// Skipped without a capture timestamp
    NoTimestamp,
    /// Skipped after exhausting candidate names
    Exhausted,
    /// Copy refused because source and destination coincide
    Refused,
    /// Hashing or copying failed
    Failed,
}
