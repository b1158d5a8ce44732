//! Domain classification
//!
//! Keyword-table mapping from free-text problem descriptions to domain tags.

pub mod classifier;
pub mod domain;

pub use classifier::DomainClassifier;
pub use domain::Domain;
