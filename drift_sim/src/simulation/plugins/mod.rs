// drift_sim/src/simulation/plugins/mod.rs

pub mod motion;
pub mod sensors;
