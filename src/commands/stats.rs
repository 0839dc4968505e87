//! Offline stats over an existing leaderboards file

use std::{collections::BTreeMap, path::Path};

use crate::{
    core::{config::ModeThresholds, output::read_json},
    ledger::{all_year_stats, Leaderboards, YearStats},
    Result, Season,
};

/// Handle the stats command
pub fn handle_stats(input: &Path, thresholds: &ModeThresholds) -> Result<BTreeMap<Season, YearStats>> {
    let leaderboards: Leaderboards = read_json(input)?;
    let stats = all_year_stats(&leaderboards, thresholds);

    for (year, s) in &stats {
        println!(
            "{year}: teams {} | unique owners {}",
            s.total_teams, s.unique_owners
        );
    }
    Ok(stats)
}
