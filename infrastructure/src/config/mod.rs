//! Configuration loading for the orchestration engine

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileAdvisoryConfig, FileConfig, FileHistoryConfig, FileOrchestratorConfig,
    FileSpecialistsConfig, Severity,
};
pub use loader::ConfigLoader;
