//! Orientation resolver: turn the current vector pair into a published
//! heading
//!
//! The resolver is stateless. Each attempt snapshots the store, rebuilds
//! the rotation matrix from scratch, and either publishes exactly one
//! heading or skips with a [`SkipReason`]. A skip is a level-triggered
//! wait, not a fault: the next sensor update re-attempts naturally.

use nalgebra::Vector3;

use crate::channel::HeadingChannel;
use crate::rotation::{rotation_matrix, yaw};
use crate::store::VectorStore;
use crate::types::{Heading, SkipReason};

/// Fuse a gravity and geomagnetic vector pair into a heading
///
/// Pure computation with no store or channel involvement. Fails with
/// [`SkipReason::FusionUndefined`] when the pair is geometrically
/// degenerate (collinear vectors or zero gravity).
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use gyrocompass::resolver::resolve;
///
/// let gravity = Vector3::new(0.0, 9.81, 0.0);
/// let geomagnetic = Vector3::new(-48.0, 0.0, 0.0);
/// let heading = resolve(gravity, geomagnetic).unwrap();
/// assert_eq!(heading.degrees(), 90);
/// ```
pub fn resolve(
    gravity: Vector3<f32>,
    geomagnetic: Vector3<f32>,
) -> Result<Heading, SkipReason> {
    let matrix = rotation_matrix(gravity, geomagnetic).ok_or(SkipReason::FusionUndefined)?;
    Ok(Heading::from_yaw(yaw(&matrix)))
}

/// Attempt one fusion cycle against the store and publish on success
///
/// Skips with [`SkipReason::AwaitingData`] until both vectors have
/// arrived, and with [`SkipReason::FusionUndefined`] on degenerate
/// geometry. Exactly one value is published per `Ok` return; an `Err`
/// publishes nothing.
pub fn attempt(store: &VectorStore, channel: &HeadingChannel) -> Result<Heading, SkipReason> {
    let (gravity, geomagnetic) = store.snapshot().ok_or(SkipReason::AwaitingData)?;
    let heading = resolve(gravity, geomagnetic)?;
    channel.publish(heading);
    Ok(heading)
}
