//! Season-wide team and owner counts over eligible leagues only.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    core::config::ModeThresholds,
    ledger::{
        leaderboard::{Leaderboard, Leaderboards},
        owners::OwnerLedgerEntry,
    },
    ModeKey, Season,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStats {
    pub total_teams: usize,
    pub unique_owners: usize,
}

/// Ledger entries grouped by league name, in first-seen order.
pub fn group_by_league(entries: &[OwnerLedgerEntry]) -> Vec<(&str, Vec<&OwnerLedgerEntry>)> {
    let mut groups: Vec<(&str, Vec<&OwnerLedgerEntry>)> = Vec::new();
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        let name = entry.league_name.as_str();
        match index.get(name) {
            Some(&i) => groups[i].1.push(entry),
            None => {
                index.insert(name, groups.len());
                groups.push((name, vec![entry]));
            }
        }
    }
    groups
}

/// Running totals across one or more modes. Owners are unioned by name,
/// teams are summed.
#[derive(Debug, Default)]
pub struct StatsTally {
    total_teams: usize,
    owners: BTreeSet<String>,
}

impl StatsTally {
    /// Add one mode's ledger. A league under threshold adds nothing at all.
    pub fn add_mode(
        &mut self,
        mode: &ModeKey,
        entries: &[OwnerLedgerEntry],
        thresholds: &ModeThresholds,
    ) {
        for (_, group) in group_by_league(entries) {
            if !thresholds.admits(mode, group.len()) {
                continue;
            }
            self.total_teams += group.len();
            self.owners
                .extend(group.iter().map(|e| e.owner_name.clone()));
        }
    }

    pub fn finish(&self) -> YearStats {
        YearStats {
            total_teams: self.total_teams,
            unique_owners: self.owners.len(),
        }
    }
}

pub fn mode_stats(
    mode: &ModeKey,
    entries: &[OwnerLedgerEntry],
    thresholds: &ModeThresholds,
) -> YearStats {
    let mut tally = StatsTally::default();
    tally.add_mode(mode, entries, thresholds);
    tally.finish()
}

/// Stats for one year across all of its modes.
pub fn year_stats(
    by_mode: &BTreeMap<ModeKey, Leaderboard>,
    thresholds: &ModeThresholds,
) -> YearStats {
    let mut tally = StatsTally::default();
    for (mode, board) in by_mode {
        tally.add_mode(mode, &board.owners, thresholds);
    }
    tally.finish()
}

pub fn all_year_stats(
    leaderboards: &Leaderboards,
    thresholds: &ModeThresholds,
) -> BTreeMap<Season, YearStats> {
    leaderboards
        .iter()
        .map(|(year, by_mode)| (*year, year_stats(by_mode, thresholds)))
        .collect()
}
