// drift_sim/src/simulation/core/events.rs
use bevy::prelude::{Entity, Event};
// Import the pure data struct from the core library
use drift_core::messages::Odometry;
use nalgebra::Isometry3;

/// One odometry sample published by a sensor.
#[derive(Event, Debug, Clone)]
pub struct OdometryTopic {
    /// Topic name from the sensor's configuration.
    pub topic: String,
    pub agent: Entity,
    pub sensor: Entity,
    pub message: Odometry,
}

/// A parent-to-child frame transform, published alongside odometry when enabled.
#[derive(Event, Debug, Clone)]
pub struct TfTopic {
    pub stamp: f64,
    pub parent_frame: String,
    pub child_frame: String,
    pub transform: Isometry3<f64>,
}

/// Asks a sensor in manual mode to produce a sample this tick.
#[derive(Event, Debug, Clone, Copy)]
pub struct OdometryUpdateRequest {
    pub sensor: Entity,
}
