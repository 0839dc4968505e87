//! Snapshot merge and roster drill-down

use std::path::PathBuf;

use crate::{
    cli::RosterLookup,
    core::{config::FetchSettings, output::write_json_pretty},
    ledger::{
        snapshot::{load_snapshot_parts, source_for, MAX_SNAPSHOT_PARTS},
        MergedSnapshots,
    },
    Result,
};

/// Handle the snapshots command
pub async fn handle_snapshots(
    settings: &FetchSettings,
    source: &str,
    out: Option<PathBuf>,
    lookup: RosterLookup,
) -> Result<MergedSnapshots> {
    let source = source_for(source, settings)?;
    let merged = load_snapshot_parts(source.as_ref(), MAX_SNAPSHOT_PARTS).await;
    println!(
        "✓ Merged {} part(s), {} league-weeks",
        merged.parts_loaded,
        merged.snapshot.week_count()
    );

    if let Some(out) = out {
        write_json_pretty(&out, &merged.snapshot)?;
        println!("Merged snapshot written to {}", out.display());
    }

    if let RosterLookup {
        year: Some(year),
        mode: Some(mode),
        league: Some(league),
        week: Some(week),
        owner: Some(owner),
    } = lookup
    {
        match merged.roster_for(year, &mode, &league, week, &owner) {
            Some(roster) => {
                println!("{owner} - {league}, week {week}");
                println!("  Starters ({}):", roster.starters_total());
                for slot in &roster.starters {
                    println!("    {:<24} {:>6.2}", slot.name, slot.points.unwrap_or(0.0));
                }
                println!("  Bench ({}):", roster.bench_total());
                for slot in &roster.bench {
                    println!("    {:<24} {:>6.2}", slot.name, slot.points.unwrap_or(0.0));
                }
            }
            None => println!("No roster for {owner} in {league}, week {week}"),
        }
    }

    Ok(merged)
}
