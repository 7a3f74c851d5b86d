// drift_sim/src/simulation/core/prng.rs

use bevy::prelude::Resource;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A newtype wrapper around `ChaCha8Rng` to make it a Bevy Resource.
/// This is the central, deterministic pseudo-random number generator for the simulation.
/// Sensors draw their own seeds from it, so a fixed scenario seed fixes every noise stream.
#[derive(Resource)]
pub struct SimulationRng(pub ChaCha8Rng);

impl SimulationRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(ChaCha8Rng::seed_from_u64(seed)),
            None => Self(ChaCha8Rng::from_entropy()),
        }
    }

    /// A fresh seed for a component that owns its own generator.
    pub fn next_seed(&mut self) -> u64 {
        self.0.next_u64()
    }
}
