//! Fan league work out across a division under a run-wide concurrency cap.

use futures::future::join_all;
use std::{future::Future, sync::Arc};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::{
    core::config::LeagueRef,
    error::LeagueFetchError,
    ledger::{
        bundle::fetch_league_bundle,
        owners::{build_owner_ledger, LeagueLedger, OwnerLedgerEntry},
    },
    sleeper::SleeperApi,
};

/// Run-wide cap on in-flight league work. Clones share the same permits.
#[derive(Debug, Clone)]
pub struct FetchLimiter {
    permits: Arc<Semaphore>,
}

impl FetchLimiter {
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    /// Run `fut` while holding one permit.
    pub async fn run<F: Future>(&self, fut: F) -> F::Output {
        let _permit = self.permits.acquire().await.ok();
        fut.await
    }

    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

/// All league ledgers for one division, in configured league order.
#[derive(Debug, Clone)]
pub struct DivisionLedger {
    pub division: String,
    pub leagues: Vec<LeagueLedger>,
    pub failures: Vec<LeagueFetchError>,
}

impl DivisionLedger {
    /// Every owner entry across the division; entries are never merged across leagues.
    pub fn owners(&self) -> impl Iterator<Item = &OwnerLedgerEntry> {
        self.leagues.iter().flat_map(|l| l.entries.iter())
    }

    pub fn league_names(&self) -> Vec<String> {
        self.leagues.iter().map(|l| l.league_name.clone()).collect()
    }
}

/// Fetch and build one league while holding a permit for the whole league.
pub async fn ledger_for_league(
    api: &SleeperApi,
    limiter: &FetchLimiter,
    league_ref: &LeagueRef,
    max_weeks: u16,
) -> Result<LeagueLedger, LeagueFetchError> {
    limiter
        .run(async {
            let bundle = fetch_league_bundle(api, league_ref).await?;
            Ok::<_, LeagueFetchError>(build_owner_ledger(api, &bundle, max_weeks).await)
        })
        .await
}

/// Build every league of a division. Failed leagues are logged and set aside;
/// merging happens only after all workers have returned.
pub async fn aggregate_division(
    api: &SleeperApi,
    limiter: &FetchLimiter,
    division: &str,
    league_refs: &[LeagueRef],
    max_weeks: u16,
) -> DivisionLedger {
    let results = join_all(
        league_refs
            .iter()
            .map(|r| ledger_for_league(api, limiter, r, max_weeks)),
    )
    .await;

    let mut out = DivisionLedger {
        division: division.to_string(),
        leagues: Vec::new(),
        failures: Vec::new(),
    };
    for result in results {
        match result {
            Ok(ledger) => out.leagues.push(ledger),
            Err(err) => {
                warn!(division, league_id = %err.league_id, error = %err.cause, "league excluded");
                out.failures.push(err);
            }
        }
    }

    info!(
        division,
        leagues = out.leagues.len(),
        failed = out.failures.len(),
        owners = out.owners().count(),
        "division aggregated"
    );
    out
}
