// drift_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::motion::ScriptedMotionPlugin;
use crate::simulation::plugins::sensors::odometry::OdometrySensorPlugin;

// This prelude is for convenience for other files WITHIN the drift_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
///
/// Expects a `ScenarioConfig` resource to be inserted before it is added. There is no
/// rendering or physics, so `MinimalPlugins` is enough to run it.
pub struct DriftSimulationPlugin;

impl Plugin for DriftSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // Core setup (RNG, fixed timestep, events, agent spawning).
            SimulationSetupPlugin,
            // Moves agents along their scripted trajectories (the ground truth).
            ScriptedMotionPlugin,
            // Turns ground truth into noisy odometry.
            OdometrySensorPlugin,
        ));
    }
}
