//! The aggregation pipeline
//!
//! - `bundle`: one league's info, users, and rosters
//! - `owners`: weekly pagination and the per-owner ledger
//! - `division`: concurrent league fan-out under a run-wide cap
//! - `leaderboard`: per-year, per-mode leaderboard artifacts
//! - `stats`: season totals over eligible leagues
//! - `snapshot`: merged weekly roster snapshots
//! - `audit`: independent recount and owner CSV

pub mod audit;
pub mod bundle;
pub mod division;
pub mod leaderboard;
pub mod owners;
pub mod points;
pub mod snapshot;
pub mod stats;

#[cfg(test)]
pub(crate) mod fixtures;

pub use audit::{run_audit, AuditReport, OwnerTeamCount};
pub use bundle::{fetch_league_bundle, LeagueBundle, LeagueFullness};
pub use division::{aggregate_division, DivisionLedger, FetchLimiter};
pub use leaderboard::{build_leaderboards, Leaderboard, LeaderboardRun, Leaderboards, RunReport};
pub use owners::{build_owner_ledger, LeagueLedger, LedgerWarning, OwnerLedgerEntry};
pub use points::Points;
pub use snapshot::{load_snapshot_parts, MergedSnapshots, SnapshotSource, WeeklyRosterSnapshot};
pub use stats::{all_year_stats, mode_stats, year_stats, YearStats};
