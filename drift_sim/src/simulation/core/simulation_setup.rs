// drift_sim/src/simulation/core/simulation_setup.rs

use crate::prelude::*;
use crate::simulation::config::period_from_hz;
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::core::transforms::enu_iso_to_bevy_transform;

pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        // This plugin's job is to read the config and add resources and startup systems.
        let config = match app.world().get_resource::<ScenarioConfig>().cloned() {
            Some(config) => config,
            None => {
                warn!("No ScenarioConfig inserted before the simulation plugins, using defaults.");
                app.init_resource::<ScenarioConfig>();
                ScenarioConfig::default()
            }
        };

        // --- 1. Add the Deterministic PRNG Resource ---
        app.insert_resource(SimulationRng::new(config.simulation.seed));

        // --- 2. Register the topics ---
        app.add_event::<OdometryTopic>()
            .add_event::<TfTopic>()
            .add_event::<OdometryUpdateRequest>();

        // --- 3. Fixed simulation step ---
        match period_from_hz(config.simulation.frequency_hz) {
            Some(step) => {
                app.insert_resource(Time::<Fixed>::from_duration(step));
            }
            None => error!(
                "Invalid simulation.frequency_hz {}, keeping the default fixed timestep.",
                config.simulation.frequency_hz
            ),
        }

        // --- CONFIGURE THE SPAWNING PIPELINE ---
        // This chain of SystemSets guarantees the correct spawning order.
        app.configure_sets(
            Startup,
            (
                SceneBuildSet::CreateAgents,
                SceneBuildSet::ProcessMotion,
                SceneBuildSet::ProcessSensors,
                SceneBuildSet::Cleanup,
            )
                .chain(),
        );

        app.add_systems(
            Startup,
            (
                // This system reads the config and creates entities with "request" components.
                spawn_agents.in_set(SceneBuildSet::CreateAgents),
                // Removes the temporary request components once every pass has run.
                cleanup_spawn_requests.in_set(SceneBuildSet::Cleanup),
            ),
        );

        // Configure the runtime schedule graph.
        app.configure_sets(
            FixedUpdate,
            (SimulationSet::GroundTruth, SimulationSet::Sensors).chain(),
        );

        app.add_systems(
            FixedUpdate,
            stop_after_duration.after(SimulationSet::Sensors),
        );
    }
}

fn spawn_agents(mut commands: Commands, config: Res<ScenarioConfig>) {
    for agent_config in &config.agents {
        info!(
            "[SPAWN] Posting spawn request for agent: {}",
            &agent_config.name
        );

        let start_isometry = agent_config.starting_pose.to_isometry();

        commands.spawn((
            Name::new(agent_config.name.clone()),
            Agent,
            enu_iso_to_bevy_transform(&start_isometry),
            // The later build passes read the config from this component.
            SpawnAgentConfigRequest(agent_config.clone()),
        ));
    }
}

fn cleanup_spawn_requests(
    mut commands: Commands,
    query: Query<Entity, With<SpawnAgentConfigRequest>>,
) {
    info!("[CLEANUP] Removing spawn request components.");
    for entity in &query {
        commands.entity(entity).remove::<SpawnAgentConfigRequest>();
    }
}

/// Ends the run once the configured simulated duration has elapsed.
fn stop_after_duration(
    time: Res<Time>,
    config: Res<ScenarioConfig>,
    mut exit: EventWriter<AppExit>,
    mut stopped: Local<bool>,
) {
    if *stopped {
        return;
    }
    if time.elapsed_secs_f64() >= config.simulation.duration_seconds {
        info!(
            elapsed = time.elapsed_secs_f64(),
            "Simulated duration reached, stopping."
        );
        exit.write(AppExit::Success);
        *stopped = true;
    }
}
