//! Utility modules for common functionality.
//!
//! - constants: Constants for the application
//! - http: Retryable HTTP client construction
//! - logging: Logging setup and error context
//! - tests: Builders for test fixtures

pub mod constants;
pub mod http;
pub mod logging;

pub use constants::*;
pub use http::*;
