//! Audit command implementation

use std::path::PathBuf;

use crate::{
    core::output::write_artifact,
    ledger::{run_audit, AuditReport, FetchLimiter},
    Result, Season,
};

use super::common::CommandContext;

pub fn default_csv_path(year: Season) -> PathBuf {
    PathBuf::from(format!("owners_{year}.csv"))
}

/// Handle the audit command
pub async fn handle_audit(
    ctx: &CommandContext,
    year: Season,
    csv: Option<PathBuf>,
) -> Result<AuditReport> {
    let limiter = FetchLimiter::new(ctx.settings.concurrency);
    let report = run_audit(&ctx.api, &limiter, &ctx.map, year, &ctx.thresholds).await?;

    for mode in &report.modes {
        println!(
            "{} | Eligible: {}/{} leagues (full: {}) | Teams: {} | Unique owners: {}",
            mode.name,
            mode.leagues_eligible,
            mode.leagues_total,
            mode.leagues_full,
            mode.teams,
            mode.unique_owners
        );
    }
    println!("YEAR {year} SUMMARY");
    println!(
        "  Eligible leagues: {}/{}",
        report.leagues_eligible(),
        report.leagues_total()
    );
    println!("  Total teams: {}", report.total_teams);
    println!("  Unique owners: {}", report.unique_owners);
    if !report.shared_names.is_empty() {
        println!(
            "  Shared display names (counted once by stats): {}",
            report.shared_names.join(", ")
        );
    }

    let csv = csv.unwrap_or_else(|| default_csv_path(year));
    write_artifact(&csv, &report.to_csv())?;
    println!(
        "✓ CSV written: {} ({} unique owners)",
        csv.display(),
        report.owners.len()
    );

    Ok(report)
}
