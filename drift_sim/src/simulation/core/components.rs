// drift_sim/src/simulation/core/components.rs

use bevy::prelude::Component;

/// Marks the root entity of a simulated agent. Its `Transform` is the ground truth.
#[derive(Component, Debug, Default)]
pub struct Agent;
