//! Latest-value store for the two inbound sensor vectors
//!
//! Holds the most recent gravity and geomagnetic readings, each overwritten
//! unconditionally as its source delivers. Both fields live under a single
//! mutex so a reader always sees a consistent both-or-neither snapshot,
//! never a half-written pair.

use std::sync::Mutex;

use nalgebra::Vector3;

use crate::types::SensorReading;

#[derive(Debug, Default)]
struct Fields {
    gravity: Option<Vector3<f32>>,
    geomagnetic: Option<Vector3<f32>>,
}

/// Shared store of the latest gravity and geomagnetic vectors
///
/// The two sources write concurrently from their own callback contexts;
/// writes replace the whole vector in one locked scope, and
/// [`snapshot`](VectorStore::snapshot) reads both fields under the same
/// lock. There is no pairing or averaging across readings: last write wins
/// per field.
#[derive(Debug, Default)]
pub struct VectorStore {
    fields: Mutex<Fields>,
}

impl VectorStore {
    /// Create an empty store with both vectors absent
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored gravity vector with a new reading
    pub fn set_gravity(&self, reading: SensorReading) {
        self.lock().gravity = Some(reading.vector);
    }

    /// Overwrite the stored geomagnetic vector with a new reading
    pub fn set_geomagnetic(&self, reading: SensorReading) {
        self.lock().geomagnetic = Some(reading.vector);
    }

    /// True iff both vectors have been set since creation or the last clear
    pub fn both_present(&self) -> bool {
        let fields = self.lock();
        fields.gravity.is_some() && fields.geomagnetic.is_some()
    }

    /// Consistent view of the current pair, or `None` unless both are present
    pub fn snapshot(&self) -> Option<(Vector3<f32>, Vector3<f32>)> {
        let fields = self.lock();
        Some((fields.gravity?, fields.geomagnetic?))
    }

    /// Reset both vectors to absent
    ///
    /// Called on session teardown so stale vectors from a previous session
    /// cannot leak into a later fusion attempt.
    pub fn clear(&self) {
        let mut fields = self.lock();
        fields.gravity = None;
        fields.geomagnetic = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Fields> {
        // A poisoned lock only means a writer panicked mid-update of two
        // Option fields, which cannot leave a torn vector. Continue.
        self.fields.lock().unwrap_or_else(|e| e.into_inner())
    }
}
