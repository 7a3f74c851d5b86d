// drift_sim/src/simulation/plugins/motion.rs

use crate::prelude::*;
use crate::simulation::core::transforms::enu_iso_to_bevy_transform;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

// --- BEVY COMPONENTS ---

/// Constant-twist ground-truth motion for an agent.
///
/// The ENU pose is integrated in `f64` here and copied into the `Transform`, so the
/// truth does not pick up `f32` round-off from the render types.
#[derive(Component, Debug, Clone)]
pub struct ScriptedMotion {
    /// Body-frame linear velocity, m/s.
    pub linear_velocity: Vector3<f64>,
    /// Body-frame angular velocity, rad/s.
    pub angular_velocity: Vector3<f64>,
    pub pose: Isometry3<f64>,
}

impl ScriptedMotion {
    pub fn new(config: &MotionConfig, start: Isometry3<f64>) -> Self {
        Self {
            linear_velocity: config.linear_velocity,
            angular_velocity: config.angular_velocity,
            pose: start,
        }
    }

    /// Moves the pose forward by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        let rotation = self.pose.rotation;
        let translation = self.pose.translation.vector + rotation * self.linear_velocity * dt;
        let rotation = rotation * UnitQuaternion::from_scaled_axis(self.angular_velocity * dt);
        self.pose = Isometry3::from_parts(Translation3::from(translation), rotation);
    }
}

// --- THE PLUGIN ---
pub struct ScriptedMotionPlugin;

impl Plugin for ScriptedMotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            attach_scripted_motion.in_set(SceneBuildSet::ProcessMotion),
        )
        .add_systems(
            FixedUpdate,
            drive_scripted_motion.in_set(SimulationSet::GroundTruth),
        );
    }
}

// --- SYSTEMS ---

/// SPAWNING: Adds a `ScriptedMotion` to every agent whose config asks for one.
fn attach_scripted_motion(
    mut commands: Commands,
    request_query: Query<(Entity, &SpawnAgentConfigRequest)>,
) {
    for (entity, request) in &request_query {
        let agent_config = &request.0;
        if let Some(motion) = &agent_config.motion {
            debug!(
                "[SPAWN] Scripted motion for '{}': v = {:?}, w = {:?}",
                agent_config.name, motion.linear_velocity, motion.angular_velocity
            );
            commands.entity(entity).insert(ScriptedMotion::new(
                motion,
                agent_config.starting_pose.to_isometry(),
            ));
        }
    }
}

/// RUNTIME: Integrates each scripted agent and writes the result to its `Transform`.
fn drive_scripted_motion(
    time: Res<Time>,
    mut query: Query<(&mut ScriptedMotion, &mut Transform), With<Agent>>,
) {
    let dt = time.delta_secs_f64();
    for (mut motion, mut transform) in &mut query {
        motion.advance(dt);
        *transform = enu_iso_to_bevy_transform(&motion.pose);
    }
}
