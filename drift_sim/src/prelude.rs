// drift_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the drift_core prelude so pure types like `NoisyOdometry`, `Odometry`,
// `PoseProvider` are one import away.
pub use drift_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::core::app_state::{SceneBuildSet, SimulationSet};
pub use crate::simulation::core::components::Agent;
pub use crate::simulation::core::events::{OdometryTopic, OdometryUpdateRequest, TfTopic};
pub use crate::simulation::core::spawn_requests::SpawnAgentConfigRequest;
