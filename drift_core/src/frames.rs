// drift_core/src/frames.rs

use nalgebra::{Isometry3, UnitQuaternion, Vector3};

/// Expresses a world-frame pose relative to a reference pose.
///
/// The position is the world offset from the reference origin, un-rotated into the
/// reference frame. The orientation is the body orientation composed with the inverse
/// of the reference orientation (`q * q_ref⁻¹`), which is the composition order odometry
/// consumers of this crate expect.
pub fn express_in_reference(
    reference: &Isometry3<f64>,
    world_pose: &Isometry3<f64>,
) -> (Vector3<f64>, UnitQuaternion<f64>) {
    let position = reference
        .rotation
        .inverse_transform_vector(&(world_pose.translation.vector - reference.translation.vector));
    let rotation = world_pose.rotation * reference.rotation.inverse();
    (position, rotation)
}

/// A pure heading rotation about the up (z) axis.
pub fn yaw_rotation(yaw: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(0.0, 0.0, yaw)
}

/// Normalises `rotation` and returns its (roll, pitch, yaw) angles in radians as a vector.
///
/// Dividing this by a time step gives an angular rate that is only trustworthy for
/// small per-step rotations.
pub fn euler_vector(rotation: &UnitQuaternion<f64>) -> Vector3<f64> {
    let (roll, pitch, yaw) = UnitQuaternion::new_normalize(rotation.into_inner()).euler_angles();
    Vector3::new(roll, pitch, yaw)
}
