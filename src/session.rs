//! Session lifecycle: wiring the sensor feeds, vector store, resolver, and
//! heading channel together
//!
//! A [`Compass`] owns the shared pipeline state for one observation
//! session. The [`SensorFeed`] handles it hands out hold only a weak
//! back-reference, so a feed callback that outlives the session (a sensor
//! stack that keeps delivering after deregistration, a queued event) can
//! neither keep the session alive nor mutate torn-down state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use log::{debug, trace};

use crate::channel::HeadingChannel;
use crate::resolver::attempt;
use crate::store::VectorStore;
use crate::types::{Heading, SensorReading};

/// Which of the two inbound sources a feed handle delivers for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorSource {
    /// Gravity / accelerometer feed
    Gravity,
    /// Geomagnetic field feed
    Geomagnetic,
}

struct Shared {
    store: VectorStore,
    channel: HeadingChannel,
    active: AtomicBool,
}

/// Compass pipeline for a single observation session
///
/// Between [`start`](Compass::start) and [`stop`](Compass::stop), readings
/// pushed through the feed handles are stored and fused; every successful
/// fusion publishes one heading to the channel. Outside an active session
/// pushes are silently dropped.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use gyrocompass::{Compass, SensorReading};
///
/// let compass = Compass::new();
/// compass.start();
///
/// let gravity = compass.gravity_feed();
/// let geomagnetic = compass.geomagnetic_feed();
///
/// gravity.push(SensorReading::from_vector(Vector3::new(0.0, 9.81, 0.0)));
/// geomagnetic.push(SensorReading::from_vector(Vector3::new(0.0, 0.0, -48.0)));
///
/// assert_eq!(compass.latest_heading().map(|h| h.degrees()), Some(0));
/// compass.stop();
/// ```
pub struct Compass {
    shared: Arc<Shared>,
}

impl Compass {
    /// Create an inactive compass; call [`start`](Compass::start) before
    /// pushing readings
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                store: VectorStore::new(),
                channel: HeadingChannel::new(),
                active: AtomicBool::new(false),
            }),
        }
    }

    /// Begin a session: reset the store to its no-data state and start
    /// accepting inbound readings
    pub fn start(&self) {
        self.shared.store.clear();
        self.shared.active.store(true, Ordering::SeqCst);
        debug!("compass session started");
    }

    /// End the session: stop accepting readings, clear the store, and
    /// detach the observer
    ///
    /// Ordering matters: the active flag drops before the store is
    /// cleared, so a reading racing with teardown can never re-trigger a
    /// fusion of pre-teardown vectors once `stop` returns.
    pub fn stop(&self) {
        self.shared.active.store(false, Ordering::SeqCst);
        self.shared.store.clear();
        self.shared.channel.reset();
        debug!("compass session stopped");
    }

    /// Whether the session is currently accepting readings
    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::SeqCst)
    }

    /// Handle for pushing gravity/accelerometer readings
    pub fn gravity_feed(&self) -> SensorFeed {
        SensorFeed {
            shared: Arc::downgrade(&self.shared),
            source: SensorSource::Gravity,
        }
    }

    /// Handle for pushing geomagnetic field readings
    pub fn geomagnetic_feed(&self) -> SensorFeed {
        SensorFeed {
            shared: Arc::downgrade(&self.shared),
            source: SensorSource::Geomagnetic,
        }
    }

    /// Attach the single heading observer, replacing any previous one
    ///
    /// The observer runs on whichever feed's push triggered the fusion
    /// and must not call back into this compass.
    pub fn subscribe(&self, observer: impl FnMut(Heading) + Send + 'static) {
        self.shared.channel.subscribe(observer);
    }

    /// Detach the heading observer
    pub fn unsubscribe(&self) {
        self.shared.channel.unsubscribe();
    }

    /// Most recently published heading, left in place
    pub fn latest_heading(&self) -> Option<Heading> {
        self.shared.channel.latest()
    }

    /// Consume the most recently published heading
    pub fn take_heading(&self) -> Option<Heading> {
        self.shared.channel.take()
    }
}

impl Default for Compass {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Compass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compass")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

/// Non-owning handle for one inbound sensor feed
///
/// Cheap to clone and safe to hand to a callback context with an unbounded
/// lifetime: it holds a [`Weak`] reference, so pushes after the owning
/// [`Compass`] is dropped or stopped are no-ops.
#[derive(Clone)]
pub struct SensorFeed {
    shared: Weak<Shared>,
    source: SensorSource,
}

impl SensorFeed {
    /// Which source this handle delivers for
    pub fn source(&self) -> SensorSource {
        self.source
    }

    /// Deliver one reading
    ///
    /// Overwrites the stored vector for this source and re-attempts
    /// fusion. Dropped silently when the session is stopped or its owner
    /// is gone. The active flag is rechecked after the store write so a
    /// push racing with [`Compass::stop`] cannot fuse vectors that
    /// teardown already cleared.
    pub fn push(&self, reading: SensorReading) {
        let Some(shared) = self.shared.upgrade() else {
            trace!("{:?} reading dropped: session owner gone", self.source);
            return;
        };
        if !shared.active.load(Ordering::SeqCst) {
            trace!("{:?} reading dropped: session inactive", self.source);
            return;
        }

        match self.source {
            SensorSource::Gravity => shared.store.set_gravity(reading),
            SensorSource::Geomagnetic => shared.store.set_geomagnetic(reading),
        }

        if !shared.active.load(Ordering::SeqCst) {
            return;
        }
        match attempt(&shared.store, &shared.channel) {
            Ok(heading) => trace!("published heading {heading}"),
            Err(reason) => trace!("fusion skipped: {reason}"),
        }
    }
}

impl std::fmt::Debug for SensorFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorFeed")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn flat_north() -> (SensorReading, SensorReading) {
        (
            SensorReading::from_vector(Vector3::new(0.0, 9.81, 0.0)),
            SensorReading::from_vector(Vector3::new(0.0, 0.0, -48.0)),
        )
    }

    #[test]
    fn test_feed_handles_report_their_source() {
        let compass = Compass::new();
        assert_eq!(compass.gravity_feed().source(), SensorSource::Gravity);
        assert_eq!(
            compass.geomagnetic_feed().source(),
            SensorSource::Geomagnetic
        );
    }

    #[test]
    fn test_push_before_start_is_dropped() {
        let compass = Compass::new();
        let (gravity, geomagnetic) = flat_north();

        compass.gravity_feed().push(gravity);
        compass.geomagnetic_feed().push(geomagnetic);
        assert!(compass.latest_heading().is_none());
    }

    #[test]
    fn test_full_session_publishes_heading() {
        let compass = Compass::new();
        compass.start();
        let (gravity, geomagnetic) = flat_north();

        compass.gravity_feed().push(gravity);
        assert!(compass.latest_heading().is_none());

        compass.geomagnetic_feed().push(geomagnetic);
        assert_eq!(compass.latest_heading().map(|h| h.degrees()), Some(0));
    }

    #[test]
    fn test_stop_clears_store_and_value() {
        let compass = Compass::new();
        compass.start();
        let (gravity, geomagnetic) = flat_north();
        compass.gravity_feed().push(gravity);
        compass.geomagnetic_feed().push(geomagnetic);

        compass.stop();
        assert!(compass.latest_heading().is_none());

        // One stale update from a single source after restart must not
        // pair with anything from the previous session
        compass.start();
        compass.gravity_feed().push(gravity);
        assert!(compass.latest_heading().is_none());
    }

    #[test]
    fn test_push_after_owner_dropped_is_noop() {
        let compass = Compass::new();
        compass.start();
        let feed = compass.gravity_feed();
        let (gravity, _) = flat_north();

        drop(compass);
        feed.push(gravity); // must not panic or publish
    }

    #[test]
    fn test_observer_invoked_on_publish() {
        use std::sync::atomic::AtomicU16;

        let compass = Compass::new();
        compass.start();
        let seen = Arc::new(AtomicU16::new(u16::MAX));
        let sink = Arc::clone(&seen);
        compass.subscribe(move |heading| {
            sink.store(heading.degrees(), Ordering::SeqCst);
        });

        let (gravity, _) = flat_north();
        compass.gravity_feed().push(gravity);
        compass
            .geomagnetic_feed()
            .push(SensorReading::from_vector(Vector3::new(-48.0, 0.0, 0.0)));
        assert_eq!(seen.load(Ordering::SeqCst), 90);
    }
}
