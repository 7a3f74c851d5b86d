// drift_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::noise::NoiseSource;
pub use crate::types::PoseProvider;

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::messages::{Header, Odometry, PoseWithCovariance, Twist, TwistWithCovariance};
pub use crate::noise::GaussianNoise;

// --- Estimation Algorithms ---
pub use crate::estimation::{NoisyOdometry, OdomSource, OdometryConfig};

// --- Errors ---
pub use crate::error::OdomError;
