//! Per-owner weekly scoring ledger for one league.
//!
//! Weekly matchups are paged strictly in order starting at week 1; the first
//! empty week ends the season for that league. Season totals come from the
//! roster's authoritative fixed-point fields, never from summing weeks.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::{
    error::RemoteError,
    ledger::{bundle::LeagueBundle, points::Points},
    sleeper::{types::Matchup, SleeperApi},
    LeagueId, Week,
};

/// One owner's scores in one league. Keyed by `(owner_name, league_name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerLedgerEntry {
    pub owner_name: String,
    pub league_name: String,
    pub division: String,
    pub weekly: BTreeMap<Week, Points>,
    pub total: Points,
}

/// Non-fatal conditions met while building a ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerWarning {
    /// Owned roster whose owner is not in the user list.
    UnresolvedOwner { league_id: LeagueId, roster_id: u32 },
    /// Pagination stopped early; later weeks are not reported.
    WeekFetchFailed {
        league_id: LeagueId,
        week: Week,
        error: String,
    },
    PaginationCapReached { league_id: LeagueId, cap: u16 },
    /// `fpts_decimal` outside `0..=99`, or `fpts` too large to hold in
    /// hundredths. The total was left untouched.
    InvalidTotal {
        league_id: LeagueId,
        roster_id: u32,
        whole: i64,
        fraction: i64,
    },
}

/// Result of one step of weekly pagination.
#[derive(Debug)]
pub enum PageOutcome {
    Page { week: Week, matchups: Vec<Matchup> },
    /// `week` came back empty.
    Exhausted { week: Week },
    Failed { week: Week, error: RemoteError },
    CapReached { cap: u16 },
}

/// Lazy week-by-week matchup pager with an explicit empty-page stop and an
/// iteration cap.
pub struct WeekPager<'a> {
    api: &'a SleeperApi,
    league_id: &'a LeagueId,
    next: Week,
    cap: u16,
    done: bool,
}

impl<'a> WeekPager<'a> {
    pub fn new(api: &'a SleeperApi, league_id: &'a LeagueId, cap: u16) -> Self {
        Self {
            api,
            league_id,
            next: Week::FIRST,
            cap,
            done: false,
        }
    }

    /// Start again from week 1.
    pub fn restart(&mut self) {
        self.next = Week::FIRST;
        self.done = false;
    }

    /// Fetch the next week. Returns `None` once a terminal outcome has been yielded.
    pub async fn next_page(&mut self) -> Option<PageOutcome> {
        if self.done {
            return None;
        }
        if self.next.as_u16() > self.cap {
            self.done = true;
            return Some(PageOutcome::CapReached { cap: self.cap });
        }

        let week = self.next;
        let outcome = match self.api.matchups(self.league_id, week).await {
            Ok(matchups) if matchups.is_empty() => PageOutcome::Exhausted { week },
            Ok(matchups) => PageOutcome::Page { week, matchups },
            Err(error) => PageOutcome::Failed { week, error },
        };

        match outcome {
            PageOutcome::Page { .. } => self.next = week.next(),
            _ => self.done = true,
        }
        Some(outcome)
    }
}

/// A finished ledger for one league.
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueLedger {
    pub league_id: LeagueId,
    pub league_name: String,
    pub division: String,
    /// Weeks with non-empty matchup data, ascending.
    pub weeks: Vec<Week>,
    pub entries: Vec<OwnerLedgerEntry>,
    pub warnings: Vec<LedgerWarning>,
}

impl LeagueLedger {
    /// Last week with data; 0 when the league has none yet.
    pub fn observed_weeks(&self) -> u16 {
        self.weeks.last().map(Week::as_u16).unwrap_or(0)
    }
}

/// Accumulates one league's ledger from matchup pages and the roster pass.
pub struct OwnerLedgerBuilder<'a> {
    bundle: &'a LeagueBundle,
    entries: Vec<OwnerLedgerEntry>,
    index: HashMap<String, usize>,
    weeks: Vec<Week>,
    warnings: Vec<LedgerWarning>,
}

impl<'a> OwnerLedgerBuilder<'a> {
    pub fn new(bundle: &'a LeagueBundle) -> Self {
        Self {
            bundle,
            entries: Vec::new(),
            index: HashMap::new(),
            weeks: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Lookup by owner name within this league, creating an empty entry on first use.
    fn entry(&mut self, owner_name: &str) -> &mut OwnerLedgerEntry {
        let idx = match self.index.get(owner_name) {
            Some(&idx) => idx,
            None => {
                self.entries.push(OwnerLedgerEntry {
                    owner_name: owner_name.to_string(),
                    league_name: self.bundle.league_name.clone(),
                    division: self.bundle.league_ref.division.clone(),
                    weekly: BTreeMap::new(),
                    total: Points::ZERO,
                });
                self.index
                    .insert(owner_name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }

    /// Store each resolvable roster's rounded starter sum for `week`.
    pub fn record_week(&mut self, week: Week, matchups: &[Matchup]) {
        let bundle = self.bundle;
        for m in matchups {
            let Some(name) = bundle.owner_name(m.roster_id) else {
                continue;
            };
            let points = Points::from_starters(&m.starters_points);
            self.entry(name).weekly.insert(week, points);
        }
        if !self.weeks.contains(&week) {
            self.weeks.push(week);
            self.weeks.sort();
        }
    }

    /// Assign every owned roster's authoritative season total.
    pub fn record_totals(&mut self) {
        let bundle = self.bundle;
        let league_id = &bundle.league_ref.league_id;

        for roster in bundle.rosters.iter().filter(|r| r.is_owned()) {
            let Some(name) = bundle.owner_name(roster.roster_id) else {
                debug!(league_id = %league_id, roster_id = roster.roster_id, "owner not in user list");
                self.warnings.push(LedgerWarning::UnresolvedOwner {
                    league_id: league_id.clone(),
                    roster_id: roster.roster_id,
                });
                continue;
            };

            let settings = roster.settings;
            match Points::from_fixed(roster.roster_id, settings.fpts, settings.fpts_decimal) {
                Ok(total) => self.entry(name).total = total,
                Err(err) => {
                    warn!(league_id = %league_id, error = %err, "leaving total unset");
                    self.entry(name);
                    self.warnings.push(LedgerWarning::InvalidTotal {
                        league_id: league_id.clone(),
                        roster_id: roster.roster_id,
                        whole: settings.fpts,
                        fraction: settings.fpts_decimal,
                    });
                }
            }
        }
    }

    pub fn warn(&mut self, warning: LedgerWarning) {
        self.warnings.push(warning);
    }

    pub fn finish(self) -> LeagueLedger {
        LeagueLedger {
            league_id: self.bundle.league_ref.league_id.clone(),
            league_name: self.bundle.league_name.clone(),
            division: self.bundle.league_ref.division.clone(),
            weeks: self.weeks,
            entries: self.entries,
            warnings: self.warnings,
        }
    }
}

/// Page through a league's weeks and build its owner ledger.
///
/// A failed week stops pagination for the league and is reported as a
/// warning; the roster pass still runs so totals are never lost.
pub async fn build_owner_ledger(api: &SleeperApi, bundle: &LeagueBundle, max_weeks: u16) -> LeagueLedger {
    let league_id = &bundle.league_ref.league_id;
    let mut builder = OwnerLedgerBuilder::new(bundle);
    let mut pager = WeekPager::new(api, league_id, max_weeks);

    while let Some(outcome) = pager.next_page().await {
        match outcome {
            PageOutcome::Page { week, matchups } => builder.record_week(week, &matchups),
            PageOutcome::Exhausted { week } => {
                debug!(league_id = %league_id, week = %week, "season exhausted");
            }
            PageOutcome::Failed { week, error } => {
                warn!(league_id = %league_id, week = %week, error = %error, "stopping pagination");
                builder.warn(LedgerWarning::WeekFetchFailed {
                    league_id: league_id.clone(),
                    week,
                    error: error.to_string(),
                });
            }
            PageOutcome::CapReached { cap } => {
                warn!(league_id = %league_id, cap, "pagination cap reached");
                builder.warn(LedgerWarning::PaginationCapReached {
                    league_id: league_id.clone(),
                    cap,
                });
            }
        }
    }

    builder.record_totals();
    builder.finish()
}
