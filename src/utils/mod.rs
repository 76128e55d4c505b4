//! Shared utilities.

mod http;

pub use http::HttpClient;
