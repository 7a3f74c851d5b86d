// drift_core/src/types.rs

use nalgebra::Isometry3;

// --- Core Trait for Ground-Truth Lookups ---
// This is the only thing the estimator needs from whatever owns the simulated body.
// A Bevy query adapter implements it in the sim crate, a plain pose implements it in tests.
pub trait PoseProvider {
    /// The body's true pose in the world frame, free of any noise.
    fn ground_truth_pose(&self) -> Isometry3<f64>;
}

impl PoseProvider for Isometry3<f64> {
    fn ground_truth_pose(&self) -> Isometry3<f64> {
        *self
    }
}
