//! # Media Sorter
//!
//! Copies photos and videos into `YYYY/MM/DD` folders named after the date
//! they were captured.
//!
//! ## Guarantees
//! - **Never overwrite** - a name taken by different content gets a `-n` suffix
//! - **Never duplicate** - content already present under a candidate name is skipped
//! - **Never guess** - files without a capture timestamp are left where they are
//!
//! ## Architecture
//! - `core` - Walking, timestamp extraction, hashing, resolution and copying
//! - `events` - Reporting channel injected into each run
//! - `error` - Error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SortError};

/// Initialize tracing for the application
///
/// `default_level` applies when `RUST_LOG` is not set. Call once, from the
/// binary entry point.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("tracing already initialized: {}", e);
    }
}
