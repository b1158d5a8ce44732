//! Application-layer configuration

pub mod params;

pub use params::{AdvisoryTimeouts, DEFAULT_COORDINATION_TIMEOUT, OrchestratorParams};
