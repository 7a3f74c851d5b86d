// drift_sim/src/simulation/core/app_state.rs

use bevy::ecs::schedule::SystemSet;

/// System sets that order the one-shot scene building at `Startup`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneBuildSet {
    /// Pass 1: Spawn agent entities carrying their spawn request.
    CreateAgents,

    /// Pass 2: Attach scripted ground-truth motion.
    ProcessMotion,

    /// Pass 3: Process all sensor requests and create sensor child entities.
    ProcessSensors,

    /// Pass 4: Remove all temporary request components.
    Cleanup,
}

// =========================================================================
// == Main Simulation Sets (The "Data Flow Graph") ==
// =========================================================================

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Systems that move the agents. Runs first, so sensors see this tick's truth.
    GroundTruth,
    /// Systems that simulate sensors from the current ground truth.
    Sensors,
}
