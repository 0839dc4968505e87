//! Sleeper API wire types and endpoint access.

pub mod http;
pub mod types;

pub use http::SleeperApi;
