//! Gyrocompass - tilt-compensated compass heading from two asynchronous
//! sensor streams
//!
//! This library fuses independently-arriving gravity (accelerometer) and
//! geomagnetic field readings into a compass heading in integer degrees,
//! `[0, 360)` clockwise from magnetic north, and republishes it through a
//! single-slot latest-value channel.
//!
//! The two streams are never paired or rate-matched: each new reading
//! overwrites the previous one from its source, and every update
//! re-attempts fusion against the latest pair. Fusion builds a rotation
//! matrix whose rows are the device-frame East, North, and Up axes and
//! extracts yaw with `atan2`. Incomplete or geometrically degenerate
//! input (collinear vectors, zero gravity) publishes nothing and simply
//! waits for the next update.
//!
//! # Features
//!
//! - Tilt-compensated heading from gravity and magnetic field alone
//! - Tolerates arbitrary interleaving of the two sensor feeds
//! - Single-slot, latest-value-wins publish channel with one observer
//! - Session lifecycle with weak feed handles, so late sensor callbacks
//!   cannot mutate torn-down state
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use gyrocompass::{Compass, SensorReading};
//!
//! let compass = Compass::new();
//! compass.start();
//!
//! // Each feed handle belongs to one sensor callback context
//! let gravity = compass.gravity_feed();
//! let geomagnetic = compass.geomagnetic_feed();
//!
//! gravity.push(SensorReading::from_vector(Vector3::new(0.0, 9.81, 0.0)));
//! geomagnetic.push(SensorReading::from_vector(Vector3::new(-48.0, 0.0, 0.0)));
//!
//! assert_eq!(compass.latest_heading().map(|h| h.degrees()), Some(90));
//! compass.stop();
//! ```

pub mod channel;
mod math;
pub mod resolver;
pub mod rotation;
mod session;
mod store;
mod types;

// Re-export all public types and functions
pub use channel::HeadingChannel;
pub use math::{DEG_TO_RAD, RAD_TO_DEG, Vector3Ext};
pub use resolver::{attempt, resolve};
pub use rotation::{rotation_matrix, yaw};
pub use session::{Compass, SensorFeed, SensorSource};
pub use store::VectorStore;
pub use types::{Accuracy, Heading, SensorReading, SkipReason};
