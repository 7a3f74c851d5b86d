// drift_sim/src/simulation/utils/serde_helpers.rs

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Deserializer};

/// `[x, y, z]` into a `Vector3<f64>`.
pub fn vec3_from_array<'de, D>(deserializer: D) -> Result<Vector3<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let arr: [f64; 3] = Deserialize::deserialize(deserializer)?;
    Ok(Vector3::from(arr))
}

/// `[roll, pitch, yaw]` in degrees into a unit quaternion.
pub fn quat_from_euler_deg<'de, D>(deserializer: D) -> Result<UnitQuaternion<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let [roll, pitch, yaw]: [f64; 3] = Deserialize::deserialize(deserializer)?;
    Ok(UnitQuaternion::from_euler_angles(
        roll.to_radians(),
        pitch.to_radians(),
        yaw.to_radians(),
    ))
}
