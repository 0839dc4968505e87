//! Weekly roster snapshots, split across numbered part files and merged back
//! into one `year → mode → league → week → rosters` lookup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};
use tracing::{debug, info};

use crate::{
    core::{config::FetchSettings, http::RemoteClient},
    ledger::points::Points,
    ModeKey, Result, Season, Week,
};

/// Parts are probed from 1 up to this many.
pub const MAX_SNAPSHOT_PARTS: u32 = 20;

pub fn part_file_name(part: u32) -> String {
    format!("weekly_rosters_part{part}.json")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSlot {
    pub name: String,
    #[serde(default)]
    pub points: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterDetail {
    pub owner_name: String,
    #[serde(default)]
    pub starters: Vec<RosterSlot>,
    #[serde(default)]
    pub bench: Vec<RosterSlot>,
}

fn slot_total(slots: &[RosterSlot]) -> Points {
    let points: Vec<f64> = slots.iter().map(|s| s.points.unwrap_or(0.0)).collect();
    Points::from_starters(&points)
}

impl RosterDetail {
    pub fn starters_total(&self) -> Points {
        slot_total(&self.starters)
    }

    pub fn bench_total(&self) -> Points {
        slot_total(&self.bench)
    }
}

pub type WeekRosters = BTreeMap<Week, Vec<RosterDetail>>;

/// One snapshot part, or the merge of several.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyRosterSnapshot {
    pub years: BTreeMap<Season, BTreeMap<ModeKey, BTreeMap<String, WeekRosters>>>,
}

impl WeeklyRosterSnapshot {
    /// Overlay `part` onto `self`, week by week. Overlapping weeks take `part`'s value.
    pub fn merge(&mut self, part: WeeklyRosterSnapshot) {
        for (year, modes) in part.years {
            let acc_modes = self.years.entry(year).or_default();
            for (mode, leagues) in modes {
                let acc_leagues = acc_modes.entry(mode).or_default();
                for (league, weeks) in leagues {
                    acc_leagues.entry(league).or_default().extend(weeks);
                }
            }
        }
    }

    pub fn merged<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = WeeklyRosterSnapshot>,
    {
        parts.into_iter().fold(Self::default(), |mut acc, part| {
            acc.merge(part);
            acc
        })
    }

    pub fn week(&self, year: Season, mode: &ModeKey, league: &str, week: Week) -> Option<&[RosterDetail]> {
        self.years
            .get(&year)?
            .get(mode)?
            .get(league)?
            .get(&week)
            .map(Vec::as_slice)
    }

    /// Number of `(year, mode, league, week)` cells present.
    pub fn week_count(&self) -> usize {
        self.years
            .values()
            .flat_map(|m| m.values())
            .flat_map(|l| l.values())
            .map(|w| w.len())
            .sum()
    }
}

/// Merged snapshot parts ready for drill-down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedSnapshots {
    pub snapshot: WeeklyRosterSnapshot,
    pub parts_loaded: u32,
}

impl MergedSnapshots {
    /// One owner's starters and bench for a week.
    pub fn roster_for(
        &self,
        year: Season,
        mode: &ModeKey,
        league: &str,
        week: Week,
        owner: &str,
    ) -> Option<&RosterDetail> {
        self.snapshot
            .week(year, mode, league, week)?
            .iter()
            .find(|r| r.owner_name == owner)
    }
}

/// Somewhere numbered snapshot parts can be read from.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    fn describe(&self, part: u32) -> String;

    /// `None` when the part is missing, unreadable, or not a snapshot.
    async fn part(&self, part: u32) -> Option<WeeklyRosterSnapshot>;
}

/// Parts stored as files in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl SnapshotSource for DirectorySource {
    fn describe(&self, part: u32) -> String {
        self.dir.join(part_file_name(part)).display().to_string()
    }

    async fn part(&self, part: u32) -> Option<WeeklyRosterSnapshot> {
        let path = self.dir.join(part_file_name(part));
        let raw = tokio::fs::read_to_string(&path).await.ok()?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "unparsable snapshot part");
                None
            }
        }
    }
}

/// Parts served under an HTTP base URL. Each part is fetched once, without retry.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: RemoteClient,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, settings: &FetchSettings) -> Result<Self> {
        Ok(Self {
            client: RemoteClient::new(settings)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    fn describe(&self, part: u32) -> String {
        format!("{}/{}", self.base_url, part_file_name(part))
    }

    async fn part(&self, part: u32) -> Option<WeeklyRosterSnapshot> {
        self.client.probe_json(&self.describe(part)).await
    }
}

/// Pick a source from a `--source` argument: URLs go over HTTP, anything else is a directory.
pub fn source_for(location: &str, settings: &FetchSettings) -> Result<Box<dyn SnapshotSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, settings)?))
    } else {
        Ok(Box::new(DirectorySource::new(location)))
    }
}

/// Probe parts 1, 2, 3, ... in order, stopping at the first one that is
/// absent, and merge everything loaded before it.
pub async fn load_snapshot_parts(source: &dyn SnapshotSource, max_parts: u32) -> MergedSnapshots {
    let mut merged = MergedSnapshots::default();
    for part in 1..=max_parts {
        let Some(snapshot) = source.part(part).await else {
            debug!(part = %source.describe(part), "no further parts");
            break;
        };
        merged.snapshot.merge(snapshot);
        merged.parts_loaded = part;
    }
    info!(
        parts = merged.parts_loaded,
        weeks = merged.snapshot.week_count(),
        "snapshots merged"
    );
    merged
}
