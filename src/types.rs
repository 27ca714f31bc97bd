//! Core types for the compass heading pipeline

use core::fmt;

use nalgebra::Vector3;
use thiserror::Error;

use crate::math::RAD_TO_DEG;

/// Compass heading in integer degrees clockwise from magnetic north
///
/// The value is always in `[0, 360)`: 0° is north, 90° east, 180° south,
/// 270° west. A `Heading` is only ever produced from a complete,
/// non-degenerate (gravity, geomagnetic) pair.
///
/// # Example
/// ```
/// use gyrocompass::Heading;
///
/// let heading = Heading::from_yaw(-core::f32::consts::FRAC_PI_2);
/// assert_eq!(heading.degrees(), 270);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Heading(u16);

impl Heading {
    /// Convert a yaw angle in radians into an integer heading
    ///
    /// Accepts the `(-π, π]` output range of `atan2`. Adding a full turn
    /// before the modulo folds the negative half into `[0, 360)` without
    /// a branch. The degree value is then rounded to centidegrees and
    /// integer-truncated; the trailing wrap keeps a value that rounds up
    /// to 360.00 inside the valid range.
    pub fn from_yaw(yaw: f32) -> Self {
        let degrees = (yaw * RAD_TO_DEG + 360.0) % 360.0;
        let centidegrees = (degrees * 100.0).round() as i32;
        Heading(((centidegrees / 100) % 360) as u16)
    }

    /// Heading in whole degrees, `0..360`
    pub const fn degrees(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Reported accuracy of a sensor reading
///
/// Mirrors the accuracy levels delivered by typical mobile sensor stacks.
/// The fusion core accepts this field but never consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accuracy {
    /// Sensor cannot be trusted; readings may be wildly off
    Unreliable,
    /// Low accuracy, calibration recommended
    Low,
    /// Medium accuracy
    Medium,
    /// High accuracy
    #[default]
    High,
}

/// A single reading delivered by one of the two inbound sensor feeds
///
/// Carries the raw 3-component vector plus the timestamp and accuracy the
/// source attached to it. Timestamp and accuracy ride along unused; only
/// the vector participates in fusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Raw 3-axis sample (m/s² for gravity, µT for the magnetic field)
    pub vector: Vector3<f32>,
    /// Source timestamp in nanoseconds; monotonicity is not assumed
    pub timestamp_ns: u64,
    /// Accuracy reported by the source
    pub accuracy: Accuracy,
}

impl SensorReading {
    /// Create a reading with an explicit timestamp and accuracy
    pub fn new(vector: Vector3<f32>, timestamp_ns: u64, accuracy: Accuracy) -> Self {
        Self {
            vector,
            timestamp_ns,
            accuracy,
        }
    }

    /// Create a reading from a bare vector, with default metadata
    pub fn from_vector(vector: Vector3<f32>) -> Self {
        Self::new(vector, 0, Accuracy::default())
    }
}

impl From<Vector3<f32>> for SensorReading {
    fn from(vector: Vector3<f32>) -> Self {
        Self::from_vector(vector)
    }
}

/// Why a fusion attempt produced no heading
///
/// Neither variant is a fault: both describe expected "not ready" states
/// that resolve themselves on a later sensor update. The session layer
/// logs them at trace level and publishes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// Fewer than both vectors have arrived since the store was last cleared
    #[error("awaiting data from both sensor feeds")]
    AwaitingData,
    /// Both vectors present but geometrically degenerate: gravity and the
    /// magnetic field are collinear, or gravity is a zero vector
    #[error("fusion undefined: gravity and geomagnetic field are collinear or gravity is zero")]
    FusionUndefined,
}
