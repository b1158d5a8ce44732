//! Specialist reports and their per-run accumulation

pub mod domain_report;
pub mod result_set;

pub use domain_report::{DomainReport, Issue, Recommendation};
pub use result_set::ResultSet;
