//! # media-sort CLI
//!
//! Command-line interface for the media sorter.
//!
//! ## Usage
//! ```bash
//! media-sort /Volumes/CARD/DCIM ~/Pictures/Sorted
//! media-sort ~/Downloads/phone ~/Pictures/Sorted --dry-run --output json
//! ```

mod cli;

use media_sorter::Result;

fn main() -> Result<()> {
    cli::run()
}
