//! Rotation-matrix construction and yaw extraction from a gravity and
//! geomagnetic vector pair
//!
//! The matrix rows are the device-frame directions of Earth's East, North,
//! and Up axes, built from cross products and normalized to unit length.
//! Yaw is the bearing of the device −Z (sighting) axis, extracted with
//! `atan2` from two of the matrix entries.

use nalgebra::{Matrix3, Vector3};

use crate::math::Vector3Ext;

/// Squared magnitude below which the East cross product is treated as
/// degenerate (collinear inputs, free fall, or a zero field)
const MIN_CROSS_NORM_SQUARED: f32 = 1e-6;

/// Build the rotation matrix describing device orientation
///
/// Rows of the result are the East, North, and Up axes expressed in the
/// device frame:
/// - East  = normalize(geomagnetic × gravity)
/// - North = normalize(gravity × East)
/// - Up    = normalize(gravity)
///
/// Returns `None` when the matrix is undefined: gravity is a zero vector,
/// or gravity and the geomagnetic field are collinear so the cross product
/// vanishes. Collinearity is checked on the normalized inputs, making the
/// threshold independent of sensor units.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use gyrocompass::rotation::rotation_matrix;
///
/// let gravity = Vector3::new(0.0, 9.81, 0.0);
/// let geomagnetic = Vector3::new(0.0, 0.0, -48.0);
/// let r = rotation_matrix(gravity, geomagnetic).unwrap();
/// assert!((r[(0, 0)] - 1.0).abs() < 1e-6); // East along device +X
/// ```
pub fn rotation_matrix(
    gravity: Vector3<f32>,
    geomagnetic: Vector3<f32>,
) -> Option<Matrix3<f32>> {
    let up = gravity.safe_normalize();
    if up == Vector3::zeros() {
        return None;
    }

    let field = geomagnetic.safe_normalize();
    let east = field.cross(&up);
    if east.magnitude_squared() < MIN_CROSS_NORM_SQUARED {
        return None;
    }

    let east = east.safe_normalize();
    let north = up.cross(&east).safe_normalize();

    Some(Matrix3::from_rows(&[
        east.transpose(),
        north.transpose(),
        up.transpose(),
    ]))
}

/// Extract yaw from a rotation matrix produced by [`rotation_matrix`]
///
/// Yaw is the clockwise angle from magnetic north to the device −Z axis
/// projected onto the horizontal plane, in radians within `(-π, π]`. The
/// third column of the matrix holds the East/North/Up components of the
/// device +Z axis, so negating its first two entries gives the horizontal
/// East and North components of −Z.
pub fn yaw(r: &Matrix3<f32>) -> f32 {
    (-r[(0, 2)]).atan2(-r[(1, 2)])
}
