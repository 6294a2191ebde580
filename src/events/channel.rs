//! Event channel implementation using crossbeam-channel.
//!
//! Events are how the organizer reports what it does. The sender is
//! injected into each run instead of logging through global state, and
//! the front end decides how to render what it receives.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Reporting handle passed into the organizer.
///
/// Cloneable; sending never fails from the caller's point of view.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Report an event.
    ///
    /// A dropped receiver means nobody is listening, which is fine.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receiving side, owned by whichever front end renders the events
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Blocking iterator that ends when every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Constructors for sender/receiver pairs
pub struct EventChannel;

impl EventChannel {
    /// Unbounded channel; the organizer never waits on the front end
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// Sender whose events go nowhere, for tests and headless callers
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}
