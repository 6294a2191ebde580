//! # Core Module
//!
//! The UI-agnostic sorting engine.
//!
//! ## Modules
//! - `scanner` - Walks the source tree
//! - `metadata` - Extracts capture timestamps from EXIF
//! - `hasher` - Computes content fingerprints
//! - `resolver` - Picks the dated destination path and detects duplicates
//! - `organize` - Copies resolved files and runs the whole loop

pub mod hasher;
pub mod metadata;
pub mod organize;
pub mod resolver;
pub mod scanner;

// Re-export commonly used types
pub use hasher::{ContentHasher, Fingerprint, Xxh3Hasher};
pub use metadata::{Absence, CaptureTime, ExifTimestampExtractor, TimestampExtractor};
pub use organize::{Organizer, OrganizerBuilder};
pub use resolver::{PathResolver, ResolutionOutcome};
pub use scanner::{SourceWalker, WalkEntry};
