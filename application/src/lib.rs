//! Application layer for conclave
//!
//! Hosts the coordination engine use case, the ports implemented by
//! infrastructure adapters, the advisory circuit breaker, and the
//! engine's static parameters.
//!
//! The dependency rule: this crate depends on `conclave-domain` only.
//! Adapters (specialist gateways, advisory services, loggers) plug in
//! through the traits in [`ports`].

pub mod advisory;
pub mod config;
pub mod ports;
pub mod use_cases;

pub use advisory::AdvisoryClient;
pub use config::{AdvisoryTimeouts, OrchestratorParams};
pub use ports::{
    Advisory, AdvisoryError, AdvisoryQuery, AdvisoryService, CoordinationEvent,
    CoordinationLogger, CoordinationProgress, NoCoordinationLogger, NoProgress, SpecialistError,
    SpecialistGateway,
};
pub use use_cases::{CoordinateError, CoordinateInput, CoordinateOutput, CoordinateUseCase};
