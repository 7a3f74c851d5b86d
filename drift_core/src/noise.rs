// drift_core/src/noise.rs

use crate::error::OdomError;
use dyn_clone::DynClone;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Parameters of a scalar Gaussian noise term.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GaussianNoise {
    pub mean: f64,
    /// Variance (sigma squared), not the standard deviation.
    pub variance: f64,
}

impl GaussianNoise {
    pub fn new(mean: f64, variance: f64) -> Self {
        Self { mean, variance }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Builds the matching `rand_distr` distribution.
    pub fn distribution(&self) -> Result<Normal<f64>, OdomError> {
        let invalid = OdomError::InvalidNoise {
            mean: self.mean,
            variance: self.variance,
        };
        if !self.mean.is_finite() || !self.variance.is_finite() || self.variance < 0.0 {
            return Err(invalid);
        }
        Normal::new(self.mean, self.std_dev()).map_err(|_| invalid)
    }
}

// --- NOISE SOURCE TRAIT ---
// Anything that can hand out one sample of a configured normal distribution.
// Tests swap in scripted sequences; the simulation uses seeded samplers.
pub trait NoiseSource: DynClone + Debug + Send + Sync {
    fn sample(&mut self) -> f64;
}

// This macro automatically generates the implementation of `Clone` for `Box<dyn NoiseSource>`.
dyn_clone::clone_trait_object!(NoiseSource);

/// A normal distribution paired with the generator that drives it.
#[derive(Debug, Clone)]
pub struct GaussianSampler<R> {
    distribution: Normal<f64>,
    rng: R,
}

impl<R: Rng> GaussianSampler<R> {
    pub fn new(noise: &GaussianNoise, rng: R) -> Result<Self, OdomError> {
        Ok(Self {
            distribution: noise.distribution()?,
            rng,
        })
    }
}

impl<R> NoiseSource for GaussianSampler<R>
where
    R: Rng + Clone + Debug + Send + Sync + 'static,
{
    fn sample(&mut self) -> f64 {
        self.distribution.sample(&mut self.rng)
    }
}

/// Always yields zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn sample(&mut self) -> f64 {
        0.0
    }
}
