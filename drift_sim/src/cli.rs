use clap::Parser;
use std::path::PathBuf;

/// Drift: headless noisy-odometry simulation.
///
/// This struct defines the command-line arguments accepted by any binary built on the
/// drift simulation library.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/00_odometry_showcase.toml")]
    pub scenario: PathBuf,

    /// Seed for the simulation RNG. Overrides `simulation.seed` from the scenario.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulated duration in seconds. Overrides `simulation.duration_seconds`.
    #[arg(short, long)]
    pub duration: Option<f64>,
}
