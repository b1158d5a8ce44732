//! Ports - interfaces implemented by infrastructure adapters

pub mod advisory;
pub mod coordination_log;
pub mod progress;
pub mod specialist_gateway;

pub use advisory::{Advisory, AdvisoryError, AdvisoryQuery, AdvisoryService};
pub use coordination_log::{CoordinationEvent, CoordinationLogger, NoCoordinationLogger};
pub use progress::{CoordinationProgress, NoProgress};
pub use specialist_gateway::{SpecialistError, SpecialistGateway};
