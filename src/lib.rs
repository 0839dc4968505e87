//! Sleeper Fantasy League Aggregation Library
//!
//! Pulls league data from the read-only Sleeper API and turns it into
//! per-owner scoring ledgers, leaderboards, and season-wide statistics for a
//! family of leagues organised by year, mode, and division.
//!
//! ## Features
//!
//! - **Owner Ledgers**: Weekly starter points and authoritative season totals per owner and league
//! - **Leaderboards**: One artifact per year, nested by mode, with divisions and league names
//! - **Season Stats**: Team and unique-owner counts over leagues that meet a per-mode threshold
//! - **Snapshot Merging**: Numbered weekly roster parts merged for roster drill-down
//! - **Audit**: An independent recount that writes a per-owner team-count CSV
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sleeper_ffl::{
//!     core::config::{FetchSettings, LeagueMap},
//!     ledger::build_leaderboards,
//!     sleeper::SleeperApi,
//!     Season,
//! };
//!
//! # async fn example() -> sleeper_ffl::Result<()> {
//! let map = LeagueMap::from_path("leagues.json".as_ref())?;
//! let settings = FetchSettings::default();
//! let api = SleeperApi::new(&settings)?;
//!
//! let run = build_leaderboards(&api, &settings, &map, Season::new(2025), None).await?;
//! run.report.log_summary();
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at your league map to avoid passing it in every command:
//! ```bash
//! export SLEEPER_FFL_LEAGUE_MAP=~/leagues.json
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod ledger;
pub mod sleeper;

// Re-export commonly used types
pub use cli::types::{LeagueId, ModeKey, Season, UserId, Week};
pub use error::{Result, SleeperError};

pub const LEAGUE_MAP_ENV_VAR: &str = "SLEEPER_FFL_LEAGUE_MAP";
pub const BASE_URL_ENV_VAR: &str = "SLEEPER_FFL_BASE_URL";
