//! Specialist dispatch adapters

mod cli_gateway;

pub use cli_gateway::CliSpecialistGateway;
