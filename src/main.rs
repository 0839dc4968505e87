//! Entry point: parse CLI, set up logging, and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use sleeper_ffl::{
    cli::{Commands, SleeperCli},
    commands::{
        audit::handle_audit,
        common::{fetch_settings, parse_threshold_overrides, CommandContext},
        leaderboard::{handle_leaderboard, LeaderboardParams},
        snapshots::handle_snapshots,
        stats::handle_stats,
    },
    core::config::ModeThresholds,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = SleeperCli::parse();

    let verbose = matches!(
        app.command,
        Commands::Leaderboard { verbose: true, .. } | Commands::Audit { verbose: true, .. }
    );
    init_tracing(verbose);

    match app.command {
        Commands::Leaderboard {
            year,
            mode,
            out,
            verbose,
        } => {
            let ctx = CommandContext::new(&app.global).context("loading configuration")?;
            handle_leaderboard(
                &ctx,
                LeaderboardParams {
                    year,
                    mode,
                    out,
                    verbose,
                },
            )
                .await
                .with_context(|| format!("leaderboard for {year}"))?;
        }

        Commands::Audit {
            year,
            csv,
            verbose: _,
        } => {
            let ctx = CommandContext::new(&app.global).context("loading configuration")?;
            handle_audit(&ctx, year, csv)
                .await
                .with_context(|| format!("audit for {year}"))?;
        }

        Commands::Stats { input } => {
            let thresholds = ModeThresholds::default()
                .with_overrides(parse_threshold_overrides(&app.global.min_rosters));
            handle_stats(&input, &thresholds)
                .with_context(|| format!("reading {}", input.display()))?;
        }

        Commands::Snapshots {
            source,
            out,
            lookup,
        } => {
            let settings = fetch_settings(&app.global);
            handle_snapshots(&settings, &source, out, lookup)
                .await
                .with_context(|| format!("snapshots from {source}"))?;
        }
    }

    Ok(())
}
