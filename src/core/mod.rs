//! Core utilities for the Sleeper league pipeline
//!
//! This module consolidates the pieces every command depends on:
//! - `config`: league map, eligibility thresholds, fetch tuning
//! - `http`: the retrying remote client
//! - `output`: JSON/CSV artifact helpers

pub mod config;
pub mod http;
pub mod output;

// Re-export commonly used items for convenience
pub use config::{FetchSettings, LeagueMap, LeagueRef, ModeConfig, ModeThresholds};
pub use http::RemoteClient;
pub use output::{read_json, write_artifact, write_json_pretty, write_string};
