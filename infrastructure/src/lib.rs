//! Infrastructure layer for conclave
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod specialist;

#[cfg(feature = "advisory-http")]
pub mod advisory;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileAdvisoryConfig, FileConfig, FileHistoryConfig,
    FileOrchestratorConfig, FileSpecialistsConfig, Severity,
};
pub use logging::JsonlCoordinationLogger;
pub use specialist::CliSpecialistGateway;

#[cfg(feature = "advisory-http")]
pub use advisory::HttpAdvisoryService;
