// drift_sim/src/simulation/config/structs.rs

use bevy::prelude::Resource;
use drift_core::estimation::{OdomSource, OdometryConfig};
use drift_core::noise::GaussianNoise;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use serde::Deserialize;

use crate::simulation::utils::serde_helpers;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// The Bevy resource holding all configuration for a simulation run.
/// This struct is the root of the data parsed from a `scenario.toml` file.
#[derive(Resource, Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: Simulation,

    // The TOML has `[[agents]]`, which becomes a Vec of AgentConfig structs.
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Duration of the simulation in seconds.
    pub duration_seconds: f64,
    /// Fixed-step rate of the simulation loop.
    pub frequency_hz: f64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: None,
            duration_seconds: 60.0,
            frequency_hz: 400.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub name: String,
    #[serde(default)]
    pub starting_pose: Pose,
    /// Scripted ground-truth motion. Agents without one stay where they spawn.
    #[serde(default)]
    pub motion: Option<MotionConfig>,
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
}

// =========================================================================
// == Helper Structs for Nested Configuration ==
// =========================================================================

/// A pose in the ENU world frame: metres, and `[roll, pitch, yaw]` in degrees.
#[derive(Deserialize, Debug, Clone, Copy, Default)]
#[serde(deny_unknown_fields)]
pub struct Pose {
    #[serde(deserialize_with = "serde_helpers::vec3_from_array", default)]
    pub translation: Vector3<f64>,

    #[serde(deserialize_with = "serde_helpers::quat_from_euler_deg", default)]
    pub rotation: UnitQuaternion<f64>,
}

impl Pose {
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
    }
}

/// Constant body-frame velocities, in m/s and rad/s.
#[derive(Deserialize, Debug, Clone, Copy, Default)]
#[serde(deny_unknown_fields)]
pub struct MotionConfig {
    #[serde(deserialize_with = "serde_helpers::vec3_from_array", default)]
    pub linear_velocity: Vector3<f64>,
    #[serde(deserialize_with = "serde_helpers::vec3_from_array", default)]
    pub angular_velocity: Vector3<f64>,
}

// =========================================================================
// == Sensors ==
// =========================================================================

// This enum can represent ANY sensor that might appear in the config list.
// The `tag = "kind"` tells Serde to look for a `kind = "..."` field in the TOML
// to decide which variant to parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
#[serde(rename_all = "PascalCase")] // "Odometry" in TOML maps to the Odometry variant
pub enum SensorConfig {
    Odometry(OdometrySensorConfig),
}

impl SensorConfig {
    pub fn get_name(&self) -> &str {
        match self {
            SensorConfig::Odometry(c) => &c.name,
        }
    }

    pub fn get_rate(&self) -> f64 {
        match self {
            SensorConfig::Odometry(c) => c.rate,
        }
    }
}

fn default_odom_rate() -> f64 {
    30.0
}

fn default_odom_topic() -> String {
    "odom".to_string()
}

fn default_odom_frame() -> String {
    "odom".to_string()
}

fn default_base_frame() -> String {
    "base_footprint".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OdometrySensorConfig {
    pub name: String,
    /// Publication rate in Hz.
    #[serde(default = "default_odom_rate")]
    pub rate: f64,
    #[serde(default = "default_odom_topic")]
    pub topic: String,
    #[serde(default)]
    pub source: OdomSource,
    #[serde(default = "default_odom_frame")]
    pub frame_id: String,
    #[serde(default = "default_base_frame")]
    pub child_frame_id: String,
    #[serde(default)]
    pub with_noise: bool,
    #[serde(default)]
    pub position_noise: GaussianNoise,
    /// Heading noise, in radians.
    #[serde(default)]
    pub rotation_noise: GaussianNoise,
    /// Sensor mount offset added to the published pose.
    #[serde(default)]
    pub root_offset: Pose,
    /// Only update when an `OdometryUpdateRequest` arrives, never on the timer.
    #[serde(default)]
    pub manual_update: bool,
    /// Also publish the odometry transform on the TF topic.
    #[serde(default)]
    pub publish_tf: bool,
}

impl OdometrySensorConfig {
    /// The framework-agnostic estimator configuration.
    pub fn to_core_config(&self) -> OdometryConfig {
        OdometryConfig {
            source: self.source,
            frame_id: self.frame_id.clone(),
            child_frame_id: self.child_frame_id.clone(),
            with_noise: self.with_noise,
            position_noise: self.position_noise,
            rotation_noise: self.rotation_noise,
            root_offset: self.root_offset.to_isometry(),
        }
    }
}
