// drift_core/src/lib.rs

// This file defines the public modules of the library.
pub mod error;
pub mod estimation;
pub mod frames;
pub mod messages;
pub mod noise;
pub mod prelude;
pub mod types;
