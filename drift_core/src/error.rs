// drift_core/src/error.rs

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OdomError {
    /// A normal distribution cannot be built from these parameters
    /// (negative or non-finite variance, or a non-finite mean).
    #[error("invalid gaussian noise parameters: mean = {mean}, variance = {variance}")]
    InvalidNoise { mean: f64, variance: f64 },
}
