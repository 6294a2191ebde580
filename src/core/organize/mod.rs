//! Media organization module.
//!
//! Walks a source tree, resolves a dated destination for every file and
//! copies what is not already there. Files are handled strictly one after
//! another; each resolution sees the copies made before it.

mod executor;
mod organizer;
mod types;

pub use executor::CopyExecutor;
pub use organizer::{Organizer, OrganizerBuilder};
pub use types::*;
