// drift_sim/examples/01_headless_odometry.rs

//! A headless end-to-end run of the drift odometry simulation.
//!
//! This example demonstrates how to:
//! 1. Load a simulation scenario from a TOML file, with command-line overrides.
//! 2. Set up a minimal, windowless Bevy application stepped at a fixed rate.
//! 3. Add the main `DriftSimulationPlugin`.
//! 4. Report how far each odometry sensor drifted from the ground truth.
//!
//! To run this example:
//! `cargo run --example 01_headless_odometry -- --scenario assets/scenarios/00_odometry_showcase.toml`

use std::collections::BTreeMap;
use std::time::Duration;

use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*, time::TimeUpdateStrategy};
use clap::Parser;
use drift_core::estimation::Lifecycle;

use drift_sim::cli::Cli;
use drift_sim::prelude::*;
use drift_sim::simulation::config::{load_scenario, period_from_hz};
use drift_sim::simulation::plugins::sensors::odometry::OdometrySensor;
use drift_sim::DriftSimulationPlugin;

fn main() -> AppExit {
    let cli = Cli::parse();

    // --- 1. Load Simulation Configuration ---
    println!("Loading scenario from: {}", cli.scenario.display());
    let mut config = match load_scenario(&cli.scenario) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(duration) = cli.duration {
        config.simulation.duration_seconds = duration;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        return AppExit::error();
    }

    // Every frame advances the clock by exactly one fixed step, so a run is
    // reproducible and finishes as fast as the CPU allows.
    let Some(step) = period_from_hz(config.simulation.frequency_hz) else {
        eprintln!(
            "Error: invalid simulation.frequency_hz {}",
            config.simulation.frequency_hz
        );
        return AppExit::error();
    };

    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins & Resources ---
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)),
        LogPlugin {
            level: bevy::log::Level::INFO,
            // A good filter for focusing on our crates' logs during development.
            filter: "info,drift_sim=debug,drift_core=debug".to_string(),
            ..default()
        },
    ))
    .insert_resource(TimeUpdateStrategy::ManualDuration(step))
    // Insert the loaded configuration as a Bevy resource so all systems can access it.
    .insert_resource(config);

    // --- 3. Add the Main Drift Simulation Plugin ---
    app.add_plugins(DriftSimulationPlugin);

    // --- 4. Add Example-Specific Systems ---
    app.init_resource::<DriftReport>()
        .add_systems(Update, track_drift)
        .add_systems(Last, print_drift_report);

    // --- 5. Run the App ---
    info!("Starting drift simulation...");
    app.run()
}

#[derive(Debug, Default, Clone, Copy)]
struct SensorDrift {
    samples: usize,
    position_error: f64,
    heading_error: f64,
}

/// Latest drift figures, keyed by "agent/sensor".
#[derive(Resource, Default)]
struct DriftReport(BTreeMap<String, SensorDrift>);

fn track_drift(
    mut report: ResMut<DriftReport>,
    mut odometry: EventReader<OdometryTopic>,
    names: Query<&Name>,
    sensors: Query<&OdometrySensor>,
) {
    for sample in odometry.read() {
        let Ok(sensor) = sensors.get(sample.sensor) else {
            continue;
        };
        let Lifecycle::Initialized(state) = sensor.estimator.lifecycle() else {
            continue;
        };

        let agent = names.get(sample.agent).map(Name::as_str).unwrap_or("?");
        let sensor_name = names.get(sample.sensor).map(Name::as_str).unwrap_or("?");
        let entry = report.0.entry(format!("{agent}/{sensor_name}")).or_default();

        entry.samples += 1;
        entry.position_error = (state.previous_noisy_transform.translation.vector
            - state.previous_true_transform.translation.vector)
            .norm();
        entry.heading_error = state
            .previous_true_transform
            .rotation
            .angle_to(&state.previous_noisy_transform.rotation);
    }
}

fn print_drift_report(report: Res<DriftReport>, mut exits: EventReader<AppExit>) {
    if exits.read().next().is_none() {
        return;
    }
    for (name, drift) in &report.0 {
        info!(
            "{name}: {} samples, position drift {:.4} m, heading drift {:.4} rad",
            drift.samples, drift.position_error, drift.heading_error
        );
    }
}
