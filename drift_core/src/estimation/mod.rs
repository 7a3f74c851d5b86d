// drift_core/src/estimation/mod.rs

//! Synthetic odometry estimation.
//!
//! The estimator here does not filter anything. It takes the true pose of a simulated
//! body every tick and turns it into the kind of estimate a wheel-encoder or world-fixed
//! odometry source would publish: a pose that drifts by accumulated Gaussian noise, a
//! twist derived from that drifting pose, and fixed covariance.

pub mod config;
pub mod odometry;

pub use config::{OdomSource, OdometryConfig, ODOM_COVARIANCE_DIAGONAL};
pub use odometry::{EstimatorState, Lifecycle, NoisyOdometry, DELTA_TIME_EPSILON};
