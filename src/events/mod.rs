//! # Events Module
//!
//! Reporting for organizer runs.
//!
//! ## Design
//! The organizer does not write log lines itself. It receives an
//! [`EventSender`] and emits typed events; the front end (the CLI here)
//! subscribes and turns them into log output, JSON, or anything else.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Copy(CopyEvent::Copied { destination, .. }) = event {
//!             println!("copied to {}", destination.display());
//!         }
//!     }
//! });
//!
//! let summary = organizer.run_with_events(&sender);
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
