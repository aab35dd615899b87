//! HTTP middleware
//!
//! Author: hephaex@gmail.com

pub mod metrics;
pub mod security_headers;

pub use metrics::{metrics_middleware, REQUEST_ID_HEADER};
pub use security_headers::security_headers_middleware;
