// drift_sim/src/simulation/plugins/sensors/odometry.rs

// --- Simulation Crate Imports ---
use crate::prelude::*;
use crate::simulation::config::period_from_hz;
use crate::simulation::core::{prng::SimulationRng, transforms::BevyPose};

// =========================================================================
// == Odometry Components & Plugin ==
// =========================================================================

/// A Bevy component attached to an odometry sensor entity, containing its runtime state.
#[derive(Component, Debug)]
pub struct OdometrySensor {
    pub topic: String,
    pub timer: Timer,
    /// When set, the timer is ignored and samples are only taken on request.
    pub manual_update: bool,
    pub publish_tf: bool,
    /// The agent whose ground truth this sensor reads.
    pub agent: Entity,
    pub estimator: NoisyOdometry,
}

pub struct OdometrySensorPlugin;

impl Plugin for OdometrySensorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            spawn_odometry_sensors.in_set(SceneBuildSet::ProcessSensors),
        )
        .add_systems(
            FixedUpdate,
            (odometry_sensor_system, odometry_request_system)
                .chain()
                .in_set(SimulationSet::Sensors),
        );
    }
}

// =========================================================================
// == Spawning System ==
// =========================================================================

/// Reads the config and spawns odometry sensor entities as children of the appropriate agent.
fn spawn_odometry_sensors(
    mut commands: Commands,
    mut rng: ResMut<SimulationRng>,
    request_query: Query<(Entity, &Name, &Transform, &SpawnAgentConfigRequest)>,
) {
    for (agent_entity, agent_name, agent_transform, request) in &request_query {
        for sensor_config in &request.0.sensors {
            let SensorConfig::Odometry(odom_config) = sensor_config;

            info!(
                "  -> Spawning Odometry '{}' as child of agent '{}'",
                &odom_config.name,
                agent_name.as_str()
            );

            let Some(period) = period_from_hz(odom_config.rate) else {
                error!(
                    "Invalid rate {} Hz for odometry '{}' on agent '{}'. Skipping sensor.",
                    odom_config.rate,
                    &odom_config.name,
                    agent_name.as_str()
                );
                continue;
            };

            // --- 1. Create the `drift_core` estimator ---
            // Each sensor gets its own seed so the noise streams are independent.
            let seed = rng.next_seed();
            let mut estimator =
                match NoisyOdometry::from_seed(odom_config.to_core_config(), seed) {
                    Ok(estimator) => estimator,
                    Err(e) => {
                        error!(
                            "Invalid noise for odometry '{}' on agent '{}': {}. Skipping sensor.",
                            &odom_config.name,
                            agent_name.as_str(),
                            e
                        );
                        continue;
                    }
                };

            // Anchor the odometry frame at the spawn pose.
            estimator.initialize(&BevyPose(agent_transform).ground_truth_pose(), 0.0);

            // --- 2. Spawn the Sensor Entity as a Child ---
            let sensor_entity = commands
                .spawn((
                    Name::new(odom_config.name.clone()),
                    OdometrySensor {
                        topic: odom_config.topic.clone(),
                        timer: Timer::new(period, TimerMode::Repeating),
                        manual_update: odom_config.manual_update,
                        publish_tf: odom_config.publish_tf,
                        agent: agent_entity,
                        estimator,
                    },
                    Transform::default(),
                ))
                .id();

            // --- 3. Add the sensor as a child of the agent ---
            commands.entity(agent_entity).add_child(sensor_entity);
        }
    }
}

// =========================================================================
// == Runtime Systems ==
// =========================================================================

/// Ticks every timer-driven sensor and publishes a sample when it fires.
fn odometry_sensor_system(
    time: Res<Time>,
    mut odom_writer: EventWriter<OdometryTopic>,
    mut tf_writer: EventWriter<TfTopic>,
    agent_query: Query<&Transform, With<Agent>>,
    mut sensor_query: Query<(Entity, &mut OdometrySensor)>,
) {
    let dt = time.delta();
    let now = time.elapsed_secs_f64();

    for (sensor_entity, mut sensor) in &mut sensor_query {
        if sensor.manual_update {
            continue;
        }
        sensor.timer.tick(dt);
        if !sensor.timer.just_finished() {
            continue;
        }
        let Ok(agent_transform) = agent_query.get(sensor.agent) else {
            continue;
        };
        sample_and_publish(
            sensor_entity,
            &mut sensor,
            agent_transform,
            now,
            &mut odom_writer,
            &mut tf_writer,
        );
    }
}

/// Serves explicit `OdometryUpdateRequest`s, whatever the sensor's timer says.
fn odometry_request_system(
    time: Res<Time>,
    mut requests: EventReader<OdometryUpdateRequest>,
    mut odom_writer: EventWriter<OdometryTopic>,
    mut tf_writer: EventWriter<TfTopic>,
    agent_query: Query<&Transform, With<Agent>>,
    mut sensor_query: Query<&mut OdometrySensor>,
) {
    let now = time.elapsed_secs_f64();

    for request in requests.read() {
        let Ok(mut sensor) = sensor_query.get_mut(request.sensor) else {
            warn!("Odometry update requested for unknown sensor {:?}", request.sensor);
            continue;
        };
        let Ok(agent_transform) = agent_query.get(sensor.agent) else {
            continue;
        };
        sample_and_publish(
            request.sensor,
            &mut sensor,
            agent_transform,
            now,
            &mut odom_writer,
            &mut tf_writer,
        );
    }
}

/// Feeds the agent's ground truth to the estimator and publishes the result if it advanced.
fn sample_and_publish(
    sensor_entity: Entity,
    sensor: &mut OdometrySensor,
    agent_transform: &Transform,
    now: f64,
    odom_writer: &mut EventWriter<OdometryTopic>,
    tf_writer: &mut EventWriter<TfTopic>,
) {
    let previous = sensor.estimator.last_update_time();
    sensor
        .estimator
        .update_from(&BevyPose(agent_transform), now);
    if sensor.estimator.last_update_time() == previous {
        return;
    }

    let message = sensor.estimator.sample().clone();

    if sensor.publish_tf {
        tf_writer.write(TfTopic {
            stamp: message.header.stamp,
            parent_frame: message.header.frame_id.clone(),
            child_frame: message.child_frame_id.clone(),
            transform: sensor.estimator.odom_transform(),
        });
    }

    odom_writer.write(OdometryTopic {
        topic: sensor.topic.clone(),
        agent: sensor.agent,
        sensor: sensor_entity,
        message,
    });
}
