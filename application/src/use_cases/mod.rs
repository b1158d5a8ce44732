//! Use cases - application services orchestrating the domain layer

pub mod coordinate;

pub use coordinate::{CoordinateError, CoordinateInput, CoordinateOutput, CoordinateUseCase};
