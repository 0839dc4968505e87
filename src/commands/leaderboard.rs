//! Leaderboard command implementation

use std::path::PathBuf;

use crate::{
    core::output::write_json_pretty,
    ledger::{build_leaderboards, mode_stats, year_stats, Leaderboard, LeaderboardRun},
    ModeKey, Result, Season,
};

use super::common::CommandContext;

/// Parameters for the leaderboard command
#[derive(Debug)]
pub struct LeaderboardParams {
    pub year: Season,
    pub mode: Option<ModeKey>,
    pub out: Option<PathBuf>,
    /// Print one line per division under each mode.
    pub verbose: bool,
}

pub fn default_output_path(year: Season) -> PathBuf {
    PathBuf::from(format!("leaderboards_{year}.json"))
}

/// League and owner counts per division, in configured division order.
pub fn division_lines(board: &Leaderboard) -> Vec<String> {
    board
        .divisions
        .iter()
        .map(|division| {
            let leagues = board
                .leagues_by_division
                .get(division)
                .map_or(0, Vec::len);
            let owners = board
                .owners
                .iter()
                .filter(|o| &o.division == division)
                .count();
            format!("    {division}: {leagues} leagues, {owners} owners")
        })
        .collect()
}

/// Handle the leaderboard command
pub async fn handle_leaderboard(
    ctx: &CommandContext,
    params: LeaderboardParams,
) -> Result<LeaderboardRun> {
    let run = build_leaderboards(
        &ctx.api,
        &ctx.settings,
        &ctx.map,
        params.year,
        params.mode.as_ref(),
    )
    .await?;
    run.report.log_summary();

    let out = params
        .out
        .unwrap_or_else(|| default_output_path(params.year));
    write_json_pretty(&out, &run.leaderboards)?;
    println!("✓ Leaderboards written to {}", out.display());

    if let Some(by_mode) = run.leaderboards.get(&params.year) {
        for (mode, board) in by_mode {
            let stats = mode_stats(mode, &board.owners, &ctx.thresholds);
            println!(
                "  {mode}: {} owners in {} divisions, {} weeks | teams {} | unique owners {}",
                board.owners.len(),
                board.divisions.len(),
                board.weeks.len(),
                stats.total_teams,
                stats.unique_owners
            );
            if params.verbose {
                for line in division_lines(board) {
                    println!("{line}");
                }
            }
        }
        let stats = year_stats(by_mode, &ctx.thresholds);
        println!(
            "{} total: teams {} | unique owners {}",
            params.year, stats.total_teams, stats.unique_owners
        );
    }

    if !run.report.leagues_failed.is_empty() {
        println!(
            "⚠ {} of {} leagues could not be fetched",
            run.report.leagues_failed.len(),
            run.report.leagues_attempted
        );
    }

    Ok(run)
}
