// drift_sim/src/simulation/core/transforms.rs

use bevy::prelude::{Quat as BevyQuat, Transform as BevyTransform, Vec3 as BevyVec3};
use drift_core::prelude::PoseProvider;
use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_2;

// =========================================================================
// == Ground-Truth Adapter ==
// =========================================================================

/// Reads an agent's Bevy `Transform` as an ENU ground-truth pose.
pub struct BevyPose<'a>(pub &'a BevyTransform);

impl PoseProvider for BevyPose<'_> {
    fn ground_truth_pose(&self) -> Isometry3<f64> {
        bevy_transform_to_enu_iso(self.0)
    }
}

// =========================================================================
// == ENU <-> Bevy Coordinate System Conversion ==
// =========================================================================

/// Rotation from the ENU coordinate frame to the Bevy (Y-up) coordinate frame.
///
/// ENU's X-axis (East) stays Bevy X, ENU's Y-axis (North) becomes Bevy -Z,
/// ENU's Z-axis (Up) becomes Bevy Y. That is a -90 degree rotation about X.
fn q_enu_frame_to_bevy_frame() -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2)
}

/// Converts a 3D coordinate vector from ENU to Bevy world.
pub fn enu_vector_to_bevy_vector(enu_vec: &Vector3<f64>) -> BevyVec3 {
    BevyVec3::new(
        enu_vec.x as f32,  // East -> Bevy X
        enu_vec.z as f32,  // Up -> Bevy Y
        -enu_vec.y as f32, // North -> Bevy -Z
    )
}

/// Converts a 3D coordinate vector from Bevy world to ENU.
pub fn bevy_vector_to_enu_vector(bevy_vec: &BevyVec3) -> Vector3<f64> {
    Vector3::new(
        bevy_vec.x as f64,  // Bevy X -> East
        -bevy_vec.z as f64, // Bevy -Z -> North
        bevy_vec.y as f64,  // Bevy Y -> Up
    )
}

/// Converts an object's orientation from ENU frame to Bevy world frame.
pub fn enu_quat_to_bevy_quat(enu_obj_quat: &UnitQuaternion<f64>) -> BevyQuat {
    // q_bevy = Q_frame * q_enu * Q_frame⁻¹
    let q_frame = q_enu_frame_to_bevy_frame();
    let bevy_q = q_frame * enu_obj_quat * q_frame.inverse();

    BevyQuat::from_xyzw(
        bevy_q.coords.x as f32,
        bevy_q.coords.y as f32,
        bevy_q.coords.z as f32,
        bevy_q.coords.w as f32,
    )
}

/// Converts an object's orientation from Bevy world frame to ENU frame.
pub fn bevy_quat_to_enu_quat(bevy_obj_quat: &BevyQuat) -> UnitQuaternion<f64> {
    let bevy_q = UnitQuaternion::from_quaternion(Quaternion::new(
        bevy_obj_quat.w as f64, // nalgebra Quaternion::new is w,x,y,z
        bevy_obj_quat.x as f64,
        bevy_obj_quat.y as f64,
        bevy_obj_quat.z as f64,
    ));

    // q_enu = Q_frame⁻¹ * q_bevy * Q_frame
    let q_frame = q_enu_frame_to_bevy_frame();
    q_frame.inverse() * bevy_q * q_frame
}

/// Converts a full pose (Isometry3) from ENU frame to Bevy Transform.
pub fn enu_iso_to_bevy_transform(enu_pose: &Isometry3<f64>) -> BevyTransform {
    BevyTransform {
        translation: enu_vector_to_bevy_vector(&enu_pose.translation.vector),
        rotation: enu_quat_to_bevy_quat(&enu_pose.rotation),
        scale: BevyVec3::ONE,
    }
}

/// Converts a Bevy Transform to a full pose (Isometry3) in the ENU frame.
pub fn bevy_transform_to_enu_iso(bevy_transform: &BevyTransform) -> Isometry3<f64> {
    let enu_translation_vector = bevy_vector_to_enu_vector(&bevy_transform.translation);
    let enu_rotation = bevy_quat_to_enu_quat(&bevy_transform.rotation);

    Isometry3::from_parts(Translation3::from(enu_translation_vector), enu_rotation)
}
