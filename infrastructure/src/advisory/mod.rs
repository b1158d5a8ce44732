//! Advisory service adapters (optional, feature-gated)

mod http;

pub use http::HttpAdvisoryService;
