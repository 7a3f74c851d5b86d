// drift_sim/src/simulation/config/mod.rs

//! This module handles loading and validating the scenario configuration
//! from disk.

pub mod structs;

use std::path::{Path, PathBuf};
use std::time::Duration;

use drift_core::error::OdomError;
use figment::{
    providers::{Format, Toml},
    Figment,
};
use thiserror::Error;

pub use structs::{
    AgentConfig, MotionConfig, OdometrySensorConfig, Pose, ScenarioConfig, SensorConfig,
    Simulation,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scenario file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to load or parse scenario: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("simulation.frequency_hz must give a non-zero, representable step, got {0}")]
    InvalidFrequency(f64),

    #[error("simulation.duration_seconds must be non-negative and finite, got {0}")]
    InvalidDuration(f64),

    #[error("sensor '{sensor}' on agent '{agent}' has invalid rate {rate}")]
    InvalidRate {
        agent: String,
        sensor: String,
        rate: f64,
    },

    #[error("sensor '{sensor}' on agent '{agent}': {source}")]
    InvalidNoise {
        agent: String,
        sensor: String,
        source: OdomError,
    },
}

/// The period of a rate in Hz, or `None` when it is not a positive, non-zero
/// `Duration` (non-positive, non-finite, too slow to represent or too fast to resolve).
pub fn period_from_hz(hz: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(1.0 / hz)
        .ok()
        .filter(|period| !period.is_zero())
}

/// Reads and validates a scenario TOML file.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    // Figment treats a missing file as an empty source.
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let config: ScenarioConfig = Figment::new()
        .merge(Toml::file(path))
        .extract()
        .map_err(Box::new)?;
    config.validate()?;
    Ok(config)
}

/// Parses and validates a scenario from an in-memory TOML string.
pub fn parse_scenario(toml: &str) -> Result<ScenarioConfig, ConfigError> {
    let config: ScenarioConfig = Figment::new()
        .merge(Toml::string(toml))
        .extract()
        .map_err(Box::new)?;
    config.validate()?;
    Ok(config)
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if period_from_hz(sim.frequency_hz).is_none() {
            return Err(ConfigError::InvalidFrequency(sim.frequency_hz));
        }
        if !(sim.duration_seconds.is_finite() && sim.duration_seconds >= 0.0) {
            return Err(ConfigError::InvalidDuration(sim.duration_seconds));
        }

        for agent in &self.agents {
            for sensor in &agent.sensors {
                let rate = sensor.get_rate();
                if period_from_hz(rate).is_none() {
                    return Err(ConfigError::InvalidRate {
                        agent: agent.name.clone(),
                        sensor: sensor.get_name().to_string(),
                        rate,
                    });
                }
                match sensor {
                    SensorConfig::Odometry(odom) => {
                        for noise in [&odom.position_noise, &odom.rotation_noise] {
                            noise.distribution().map_err(|source| {
                                ConfigError::InvalidNoise {
                                    agent: agent.name.clone(),
                                    sensor: odom.name.clone(),
                                    source,
                                }
                            })?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
