//! Command implementations for the Sleeper league CLI

pub mod audit;
pub mod common;
pub mod leaderboard;
pub mod snapshots;
pub mod stats;
