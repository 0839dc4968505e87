//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{ModeKey, Season, Week};

/// Options shared by every command.
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// League map JSON (or set `SLEEPER_FFL_LEAGUE_MAP` env var).
    #[clap(long, global = true)]
    pub leagues: Option<PathBuf>,

    /// Sleeper API base URL (or set `SLEEPER_FFL_BASE_URL` env var).
    #[clap(long, global = true)]
    pub base_url: Option<String>,

    /// Maximum league fetches in flight across the whole run.
    #[clap(long, global = true, default_value_t = 5)]
    pub concurrency: usize,

    /// Minimum owners for a league to count, per mode - repeatable: `--min-rosters big_game=10`.
    #[clap(long = "min-rosters", global = true, value_name = "MODE=N")]
    pub min_rosters: Vec<String>,
}

#[derive(Debug, Parser)]
#[clap(name = "sleeper-ffl", about = "Sleeper fantasy league aggregation")]
pub struct SleeperCli {
    #[clap(flatten)]
    pub global: GlobalOpts,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build per-owner leaderboards for a year and print its season stats.
    Leaderboard {
        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        year: Season,

        /// Only this mode (e.g. big_game); all of the year's modes otherwise.
        #[clap(long, short)]
        mode: Option<ModeKey>,

        /// Where to write the leaderboards JSON.
        #[clap(long, short)]
        out: Option<PathBuf>,

        /// Debug-level logging and per-division detail.
        #[clap(long)]
        verbose: bool,
    },

    /// Re-fetch every league of a year and write the owner team-count CSV.
    Audit {
        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        year: Season,

        /// CSV destination; `owners_<year>.csv` otherwise.
        #[clap(long)]
        csv: Option<PathBuf>,

        /// Log every counted league, not just skipped ones.
        #[clap(long)]
        verbose: bool,
    },

    /// Recompute season stats from an existing leaderboards JSON.
    Stats {
        #[clap(long, short)]
        input: PathBuf,
    },

    /// Merge weekly roster snapshot parts and optionally look up one roster.
    Snapshots {
        /// Directory or base URL holding `weekly_rosters_part{n}.json`.
        #[clap(long, short)]
        source: String,

        /// Write the merged snapshot here.
        #[clap(long, short)]
        out: Option<PathBuf>,

        #[clap(flatten)]
        lookup: RosterLookup,
    },
}

/// Drill-down key for one owner's roster in one week.
#[derive(Debug, Args)]
pub struct RosterLookup {
    #[clap(long, requires_all = ["mode", "league", "week", "owner"])]
    pub year: Option<Season>,

    #[clap(long)]
    pub mode: Option<ModeKey>,

    /// League name as it appears in the leaderboard.
    #[clap(long)]
    pub league: Option<String>,

    #[clap(long)]
    pub week: Option<Week>,

    /// Owner display name.
    #[clap(long)]
    pub owner: Option<String>,
}
