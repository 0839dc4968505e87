//! Independent recount of a year's eligible leagues, straight from fresh
//! league bundles, producing a per-owner team count.
//!
//! Eligibility uses the same rule as the season stats (distinct ledger owners
//! against the mode threshold), so team totals agree for a year. Unique owners
//! are counted by user id here and by ledger name in the stats; the two differ
//! only when distinct users share a display name, which the report lists.

use futures::future::join_all;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use crate::{
    core::{
        config::{LeagueMap, ModeThresholds},
        output::quote_csv_field,
    },
    error::{ConfigError, LeagueFetchError},
    ledger::{
        bundle::{fetch_league_bundle, LeagueBundle, LeagueFullness},
        division::FetchLimiter,
    },
    sleeper::SleeperApi,
    LeagueId, ModeKey, Season, UserId,
};

pub const CSV_HEADER: &str = "No.,user_id,display_name,team_count";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerTeamCount {
    pub owner_id: UserId,
    pub display_name: String,
    /// Distinct eligible leagues this owner holds a roster in.
    pub team_count: usize,
}

/// Per-mode audit summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeAudit {
    pub mode: ModeKey,
    pub name: String,
    pub leagues_total: usize,
    pub leagues_failed: usize,
    pub leagues_full: usize,
    pub leagues_eligible: usize,
    pub teams: usize,
    pub unique_owners: usize,
}

#[derive(Debug, Clone)]
pub struct AuditReport {
    pub year: Season,
    pub modes: Vec<ModeAudit>,
    pub owners: Vec<OwnerTeamCount>,
    pub failures: Vec<LeagueFetchError>,
    pub total_teams: usize,
    pub unique_owners: usize,
    /// Ledger names held by more than one user id in eligible leagues.
    pub shared_names: Vec<String>,
}

impl AuditReport {
    pub fn leagues_total(&self) -> usize {
        self.modes.iter().map(|m| m.leagues_total).sum()
    }

    pub fn leagues_eligible(&self) -> usize {
        self.modes.iter().map(|m| m.leagues_eligible).sum()
    }

    pub fn team_count_sum(&self) -> usize {
        self.owners.iter().map(|o| o.team_count).sum()
    }

    /// Audit ledger as CSV: unquoted header, quoted id and name, bare count.
    pub fn to_csv(&self) -> String {
        let mut lines = vec![CSV_HEADER.to_string()];
        lines.extend(self.owners.iter().enumerate().map(|(i, o)| {
            format!(
                "{},{},{},{}",
                i + 1,
                quote_csv_field(o.owner_id.as_str()),
                quote_csv_field(&o.display_name),
                o.team_count
            )
        }));
        lines.join("\n")
    }
}

/// Case-insensitive by name, empty names last, then by id.
fn sort_owners(owners: &mut [OwnerTeamCount]) {
    owners.sort_by(|a, b| {
        let (na, nb) = (a.display_name.to_lowercase(), b.display_name.to_lowercase());
        na.is_empty()
            .cmp(&nb.is_empty())
            .then_with(|| na.cmp(&nb))
            .then_with(|| a.owner_id.as_str().cmp(b.owner_id.as_str()))
    });
}

#[derive(Default)]
struct OwnerAccumulator {
    names: BTreeMap<UserId, String>,
    leagues: BTreeMap<UserId, BTreeSet<LeagueId>>,
    ids_by_ledger_name: BTreeMap<String, BTreeSet<UserId>>,
}

impl OwnerAccumulator {
    fn add(&mut self, bundle: &LeagueBundle) {
        let league_id = &bundle.league_ref.league_id;
        for (owner, ledger_name) in bundle.ledger_owners() {
            let known = self.names.entry(owner.clone()).or_default();
            if known.is_empty() {
                *known = bundle.display_name(owner).unwrap_or_default().to_string();
            }
            self.leagues
                .entry(owner.clone())
                .or_default()
                .insert(league_id.clone());
            self.ids_by_ledger_name
                .entry(ledger_name.to_string())
                .or_default()
                .insert(owner.clone());
        }
    }

    /// Names that the name-keyed stats would fold into a single owner.
    fn shared_names(&self) -> Vec<String> {
        self.ids_by_ledger_name
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn into_counts(self) -> Vec<OwnerTeamCount> {
        let mut names = self.names;
        let mut owners: Vec<OwnerTeamCount> = self
            .leagues
            .into_iter()
            .map(|(owner_id, leagues)| OwnerTeamCount {
                display_name: names.remove(&owner_id).unwrap_or_default(),
                owner_id,
                team_count: leagues.len(),
            })
            .collect();
        sort_owners(&mut owners);
        owners
    }
}

fn log_league(bundle: &LeagueBundle, owners: usize, eligible: bool) {
    let LeagueFullness {
        total_rosters,
        owned_rosters,
        is_full,
    } = bundle.fullness;
    let status = if is_full { "FULL" } else { "NOT FULL" };
    if eligible {
        debug!(
            division = %bundle.league_ref.division,
            league = %bundle.league_name,
            league_id = %bundle.league_ref.league_id,
            owned_rosters, total_rosters, owners, status, "counted"
        );
    } else {
        info!(
            division = %bundle.league_ref.division,
            league = %bundle.league_name,
            league_id = %bundle.league_ref.league_id,
            owned_rosters, total_rosters, owners, status, "skipped from totals"
        );
    }
}

/// Re-fetch every league of `year` and count owners over eligible leagues.
pub async fn run_audit(
    api: &SleeperApi,
    limiter: &FetchLimiter,
    map: &LeagueMap,
    year: Season,
    thresholds: &ModeThresholds,
) -> Result<AuditReport, ConfigError> {
    let modes = map.modes_for(year)?;
    info!(year = %year, modes = modes.len(), "verifying counts");

    let mut report = AuditReport {
        year,
        modes: Vec::new(),
        owners: Vec::new(),
        failures: Vec::new(),
        total_teams: 0,
        unique_owners: 0,
        shared_names: Vec::new(),
    };
    let mut year_owners = OwnerAccumulator::default();

    for (mode, config) in modes {
        let refs = config.league_refs(year, mode);
        let bundles = join_all(
            refs.iter()
                .map(|r| limiter.run(fetch_league_bundle(api, r))),
        )
        .await;

        let mut summary = ModeAudit {
            mode: mode.clone(),
            name: config.display_name(year, mode),
            leagues_total: refs.len(),
            ..ModeAudit::default()
        };
        let mut mode_owners: BTreeSet<UserId> = BTreeSet::new();

        for result in bundles {
            let bundle = match result {
                Ok(bundle) => bundle,
                Err(err) => {
                    warn!(mode = %mode, league_id = %err.league_id, error = %err.cause, "fetch failed");
                    summary.leagues_failed += 1;
                    report.failures.push(err);
                    continue;
                }
            };

            let owners = bundle.ledger_owners();
            let eligible = thresholds.admits(mode, owners.len());
            log_league(&bundle, owners.len(), eligible);

            if bundle.fullness.is_full {
                summary.leagues_full += 1;
            }
            if !eligible {
                continue;
            }
            summary.leagues_eligible += 1;
            summary.teams += owners.len();
            mode_owners.extend(owners.iter().map(|(id, _)| (*id).clone()));
            year_owners.add(&bundle);
        }

        summary.unique_owners = mode_owners.len();
        info!(
            mode = %summary.name,
            full = summary.leagues_full,
            eligible = summary.leagues_eligible,
            leagues = summary.leagues_total,
            teams = summary.teams,
            unique_owners = summary.unique_owners,
            "mode summary"
        );
        report.total_teams += summary.teams;
        report.modes.push(summary);
    }

    report.shared_names = year_owners.shared_names();
    for name in &report.shared_names {
        warn!(year = %year, name = %name, "display name shared by several users; stats count them once");
    }
    report.owners = year_owners.into_counts();
    report.unique_owners = report.owners.len();
    info!(
        year = %year,
        eligible = report.leagues_eligible(),
        leagues = report.leagues_total(),
        teams = report.total_teams,
        unique_owners = report.unique_owners,
        "year summary"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ledger::fixtures::league_ref,
        sleeper::types::{LeagueInfo, Roster, RosterSettings, User},
    };

    fn owner(id: &str, name: &str, count: usize) -> OwnerTeamCount {
        OwnerTeamCount {
            owner_id: UserId::new(id),
            display_name: name.to_string(),
            team_count: count,
        }
    }

    fn report(owners: Vec<OwnerTeamCount>) -> AuditReport {
        AuditReport {
            year: Season::new(2025),
            modes: Vec::new(),
            owners,
            failures: Vec::new(),
            total_teams: 0,
            unique_owners: 0,
            shared_names: Vec::new(),
        }
    }

    fn bundle(league: &str, users: &[(&str, &str)]) -> LeagueBundle {
        let total = users.len() as u32;
        LeagueBundle::from_parts(
            league_ref(league, "big_game", "The Boys"),
            LeagueInfo {
                name: Some(format!("League {league}")),
                total_rosters: Some(total),
            },
            users
                .iter()
                .map(|(id, name)| User {
                    user_id: UserId::new(*id),
                    display_name: Some(name.to_string()),
                })
                .collect(),
            users
                .iter()
                .zip(1..)
                .map(|((id, _), roster_id)| Roster {
                    roster_id,
                    owner_id: Some(UserId::new(*id)),
                    settings: RosterSettings::default(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_mode_audit_default_is_zeroed() {
        let summary = ModeAudit::default();
        assert_eq!(summary.mode, ModeKey::default());
        assert_eq!(
            summary.leagues_total + summary.leagues_failed + summary.leagues_eligible,
            0
        );
        assert_eq!(summary.teams + summary.unique_owners, 0);
    }

    #[test]
    fn test_shared_display_name_is_reported() {
        let mut acc = OwnerAccumulator::default();
        acc.add(&bundle("1", &[("u1", "sam"), ("u2", "ann")]));
        acc.add(&bundle("2", &[("u9", "sam"), ("u2", "ann")]));

        assert_eq!(acc.shared_names(), vec!["sam".to_string()]);
        let counts = acc.into_counts();
        assert_eq!(counts.len(), 3);
        let ann = counts.iter().find(|o| o.owner_id.as_str() == "u2").unwrap();
        assert_eq!(ann.team_count, 2);
    }

    #[test]
    fn test_blank_names_stay_blank_in_counts() {
        let mut acc = OwnerAccumulator::default();
        acc.add(&bundle("1", &[("u1", ""), ("u2", "")]));

        assert!(acc.shared_names().is_empty());
        let counts = acc.into_counts();
        assert_eq!(counts.len(), 2);
        assert!(counts.iter().all(|o| o.display_name.is_empty()));
    }

    #[test]
    fn test_sort_case_insensitive_empty_last_then_id() {
        let mut owners = vec![
            owner("9", "", 1),
            owner("3", "bravo", 1),
            owner("2", "", 1),
            owner("1", "Alpha", 1),
            owner("5", "alpha", 1),
        ];
        sort_owners(&mut owners);
        let ids: Vec<_> = owners.iter().map(|o| o.owner_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5", "3", "2", "9"]);
    }

    #[test]
    fn test_csv_format() {
        let csv = report(vec![owner("111", "Ann \"The Hammer\"", 2), owner("222", "", 1)]).to_csv();
        assert_eq!(
            csv,
            "No.,user_id,display_name,team_count\n1,\"111\",\"Ann \"\"The Hammer\"\"\",2\n2,\"222\",\"\",1"
        );
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        assert_eq!(report(Vec::new()).to_csv(), CSV_HEADER);
    }
}
