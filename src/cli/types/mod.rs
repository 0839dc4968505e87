//! Type-safe wrappers for Sleeper league data.

pub mod ids;
pub mod time;

pub use ids::{LeagueId, ModeKey, UserId};
pub use time::{Season, Week};
