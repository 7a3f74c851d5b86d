// drift_core/src/estimation/config.rs

use crate::noise::GaussianNoise;
use nalgebra::Isometry3;
use serde::{Deserialize, Serialize};

/// Covariance diagonal reported for both pose and twist, over (x, y, z, roll, pitch, yaw).
/// Planar x/y are trusted, z/roll/pitch are unobservable, yaw sits in between.
/// These are fixed values, not derived from the configured noise.
pub const ODOM_COVARIANCE_DIAGONAL: [f64; 6] = [1e-5, 1e-5, 1e12, 1e12, 1e12, 1e-3];

/// Where the odometry frame is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OdomSource {
    /// The frame starts at the body's pose when the estimator initialises.
    #[default]
    Encoder,
    /// The frame is the world origin.
    World,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OdometryConfig {
    pub source: OdomSource,
    pub frame_id: String,
    pub child_frame_id: String,
    /// When false every noise term is forced to zero.
    pub with_noise: bool,
    /// Per-axis noise added to the x and y position increments. z is never noised.
    pub position_noise: GaussianNoise,
    /// Noise added to the heading increment, in radians.
    pub rotation_noise: GaussianNoise,
    /// Sensor mount offset applied to the published pose after noise.
    pub root_offset: Isometry3<f64>,
}

impl Default for OdometryConfig {
    fn default() -> Self {
        Self {
            source: OdomSource::Encoder,
            frame_id: "odom".to_string(),
            child_frame_id: "base_footprint".to_string(),
            with_noise: false,
            position_noise: GaussianNoise::default(),
            rotation_noise: GaussianNoise::default(),
            root_offset: Isometry3::identity(),
        }
    }
}
