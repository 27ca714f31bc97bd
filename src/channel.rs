//! Single-slot, latest-value-wins heading channel
//!
//! A publish overwrites any unconsumed predecessor; the consumer only ever
//! sees the most recent heading. At most one observer can be subscribed at
//! a time, attached and detached at session boundaries.

use std::sync::Mutex;

use crate::types::Heading;

type Observer = Box<dyn FnMut(Heading) + Send>;

struct Slot {
    latest: Option<Heading>,
    observer: Option<Observer>,
}

/// Latest-value publish channel for headings
///
/// Supports both push consumption (a subscribed observer called on every
/// publish) and pull consumption ([`latest`](HeadingChannel::latest) /
/// [`take`](HeadingChannel::take)). Publishing never blocks on a slow
/// consumer: the slot simply holds the newest value.
pub struct HeadingChannel {
    slot: Mutex<Slot>,
}

impl HeadingChannel {
    /// Create a channel with no value and no observer
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                latest: None,
                observer: None,
            }),
        }
    }

    /// Attach the observer, replacing any previous one
    ///
    /// The observer is invoked while the channel lock is held, so it must
    /// not call back into this channel.
    pub fn subscribe(&self, observer: impl FnMut(Heading) + Send + 'static) {
        self.lock().observer = Some(Box::new(observer));
    }

    /// Detach the current observer, if any
    pub fn unsubscribe(&self) {
        self.lock().observer = None;
    }

    /// Publish a heading, overwriting any unconsumed previous value
    pub fn publish(&self, heading: Heading) {
        let mut slot = self.lock();
        slot.latest = Some(heading);
        if let Some(observer) = slot.observer.as_mut() {
            observer(heading);
        }
    }

    /// Most recently published heading, left in place
    pub fn latest(&self) -> Option<Heading> {
        self.lock().latest
    }

    /// Consume the most recently published heading
    pub fn take(&self) -> Option<Heading> {
        self.lock().latest.take()
    }

    /// Drop any retained value and observer; used on session teardown
    pub fn reset(&self) {
        let mut slot = self.lock();
        slot.latest = None;
        slot.observer = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for HeadingChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HeadingChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadingChannel")
            .field("latest", &self.latest())
            .finish_non_exhaustive()
    }
}
