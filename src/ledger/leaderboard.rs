//! Leaderboard artifacts and the per-run coordinator that produces them.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use crate::{
    core::config::{FetchSettings, LeagueMap, ModeConfig},
    error::{ConfigError, LeagueFetchError},
    ledger::{
        division::{aggregate_division, DivisionLedger, FetchLimiter},
        owners::{LedgerWarning, OwnerLedgerEntry},
    },
    sleeper::SleeperApi,
    ModeKey, Season, Week,
};

/// Leaderboard for one year and mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub weeks: Vec<Week>,
    pub owners: Vec<OwnerLedgerEntry>,
    pub divisions: Vec<String>,
    pub leagues_by_division: BTreeMap<String, Vec<String>>,
}

/// `year → mode → leaderboard`, the shape of the leaderboards artifact.
pub type Leaderboards = BTreeMap<Season, BTreeMap<ModeKey, Leaderboard>>;

impl Leaderboard {
    pub fn from_divisions(divisions: &[DivisionLedger]) -> Self {
        let weeks: BTreeSet<Week> = divisions
            .iter()
            .flat_map(|d| d.leagues.iter())
            .flat_map(|l| l.weeks.iter().copied())
            .collect();

        Self {
            weeks: weeks.into_iter().collect(),
            owners: divisions.iter().flat_map(|d| d.owners().cloned()).collect(),
            divisions: divisions.iter().map(|d| d.division.clone()).collect(),
            leagues_by_division: divisions
                .iter()
                .map(|d| (d.division.clone(), d.league_names()))
                .collect(),
        }
    }
}

/// Completeness summary for one run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub leagues_attempted: usize,
    pub leagues_failed: Vec<LeagueFetchError>,
    pub week_failures: usize,
    pub caps_reached: usize,
    pub unresolved_owners: usize,
    pub invalid_totals: usize,
}

impl RunReport {
    pub fn absorb(&mut self, division: &DivisionLedger) {
        self.leagues_attempted += division.leagues.len() + division.failures.len();
        self.leagues_failed.extend(division.failures.iter().cloned());

        for warning in division.leagues.iter().flat_map(|l| l.warnings.iter()) {
            match warning {
                LedgerWarning::WeekFetchFailed { .. } => self.week_failures += 1,
                LedgerWarning::PaginationCapReached { .. } => self.caps_reached += 1,
                LedgerWarning::UnresolvedOwner { .. } => self.unresolved_owners += 1,
                LedgerWarning::InvalidTotal { .. } => self.invalid_totals += 1,
            }
        }
    }

    pub fn log_summary(&self) {
        info!(
            leagues = self.leagues_attempted,
            failed = self.leagues_failed.len(),
            week_failures = self.week_failures,
            caps_reached = self.caps_reached,
            unresolved_owners = self.unresolved_owners,
            invalid_totals = self.invalid_totals,
            "run complete"
        );
    }
}

/// Output of a leaderboard run.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardRun {
    pub leaderboards: Leaderboards,
    pub report: RunReport,
}

/// Aggregate every division of one mode concurrently, sharing the run's limiter.
pub async fn build_mode_leaderboard(
    api: &SleeperApi,
    limiter: &FetchLimiter,
    year: Season,
    mode: &ModeKey,
    config: &ModeConfig,
    max_weeks: u16,
) -> Vec<DivisionLedger> {
    join_all(config.divisions.names().map(|division| {
        let refs = config.division_refs(year, mode, division);
        async move { aggregate_division(api, limiter, division, &refs, max_weeks).await }
    }))
    .await
}

/// Build leaderboards for `year` (all modes, or only `only_mode`).
///
/// The only error is a configuration error; per-league failures end up in
/// the run report instead.
pub async fn build_leaderboards(
    api: &SleeperApi,
    settings: &FetchSettings,
    map: &LeagueMap,
    year: Season,
    only_mode: Option<&ModeKey>,
) -> Result<LeaderboardRun, ConfigError> {
    let modes = map.select_modes(year, only_mode)?;
    let limiter = FetchLimiter::new(settings.concurrency);

    let per_mode = join_all(modes.iter().map(|(mode, config)| {
        let limiter = &limiter;
        async move {
            info!(year = %year, mode = %mode, name = %config.display_name(year, mode), "aggregating mode");
            let divisions =
                build_mode_leaderboard(api, limiter, year, mode, config, settings.max_weeks).await;
            (mode.clone(), divisions)
        }
    }))
    .await;

    let mut run = LeaderboardRun::default();
    let by_mode = run.leaderboards.entry(year).or_default();
    for (mode, divisions) in per_mode {
        for division in &divisions {
            run.report.absorb(division);
        }
        by_mode.insert(mode, Leaderboard::from_divisions(&divisions));
    }
    Ok(run)
}
