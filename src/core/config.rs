//! Static configuration: the league lookup table, per-mode eligibility
//! thresholds, and remote-fetch tuning.

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    error::ConfigError, LeagueId, ModeKey, Season, BASE_URL_ENV_VAR, LEAGUE_MAP_ENV_VAR,
};

/// Public read-only Sleeper API.
pub const SLEEPER_BASE_URL: &str = "https://api.sleeper.app/v1";

/// Default minimum owned-roster counts, keyed by mode.
const DEFAULT_THRESHOLDS: &[(&str, usize)] = &[
    ("big_game", 10),
    ("mini_game", 12),
    ("redraft", 12),
    ("redraft_2025", 12),
    ("triathlon", 12),
    ("dynasty", 12),
];

/// One league as placed by the league map. Immutable for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueRef {
    pub league_id: LeagueId,
    pub year: Season,
    pub mode: ModeKey,
    pub division: String,
}

/// Division name → league ids, in the order the league map lists them.
///
/// A repeated division name replaces the earlier list in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Divisions(Vec<(String, Vec<LeagueId>)>);

impl Divisions {
    pub fn get(&self, division: &str) -> Option<&[LeagueId]> {
        self.0
            .iter()
            .find(|(name, _)| name == division)
            .map(|(_, ids)| ids.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, division: String, ids: Vec<LeagueId>) {
        match self.0.iter_mut().find(|(name, _)| *name == division) {
            Some((_, existing)) => *existing = ids,
            None => self.0.push((division, ids)),
        }
    }
}

impl FromIterator<(String, Vec<LeagueId>)> for Divisions {
    fn from_iter<I: IntoIterator<Item = (String, Vec<LeagueId>)>>(iter: I) -> Self {
        let mut divisions = Divisions::default();
        for (name, ids) in iter {
            divisions.insert(name, ids);
        }
        divisions
    }
}

impl Serialize for Divisions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, ids) in &self.0 {
            map.serialize_entry(name, ids)?;
        }
        map.end()
    }
}

struct DivisionsVisitor;

impl<'de> Visitor<'de> for DivisionsVisitor {
    type Value = Divisions;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of division name to league ids")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut divisions = Divisions::default();
        while let Some((name, ids)) = access.next_entry::<String, Vec<LeagueId>>()? {
            divisions.insert(name, ids);
        }
        Ok(divisions)
    }
}

impl<'de> Deserialize<'de> for Divisions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DivisionsVisitor)
    }
}

/// A competition mode within one year: display name plus division → leagues.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModeConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub divisions: Divisions,
}

impl ModeConfig {
    pub fn display_name(&self, year: Season, mode: &ModeKey) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{year} {mode}"))
    }

    /// League refs for one division, in configured order.
    pub fn division_refs(&self, year: Season, mode: &ModeKey, division: &str) -> Vec<LeagueRef> {
        self.divisions
            .get(division)
            .map(|ids| {
                ids.iter()
                    .map(|id| LeagueRef {
                        league_id: id.clone(),
                        year,
                        mode: mode.clone(),
                        division: division.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every league ref of this mode, division by division.
    pub fn league_refs(&self, year: Season, mode: &ModeKey) -> Vec<LeagueRef> {
        self.divisions
            .names()
            .flat_map(|division| self.division_refs(year, mode, division))
            .collect()
    }
}

/// The injected lookup table of which leagues belong to which year/mode/division.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeagueMap {
    /// Optional per-mode threshold overrides layered over the defaults.
    #[serde(default)]
    pub thresholds: BTreeMap<ModeKey, usize>,
    pub years: BTreeMap<Season, BTreeMap<ModeKey, ModeConfig>>,
}

impl LeagueMap {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn modes_for(&self, year: Season) -> Result<&BTreeMap<ModeKey, ModeConfig>, ConfigError> {
        self.years.get(&year).ok_or(ConfigError::MissingYear {
            year: year.as_u16(),
        })
    }

    pub fn mode(&self, year: Season, mode: &ModeKey) -> Result<&ModeConfig, ConfigError> {
        self.modes_for(year)?
            .get(mode)
            .ok_or_else(|| ConfigError::MissingMode {
                year: year.as_u16(),
                mode: mode.to_string(),
            })
    }

    /// Modes to process for a run: all of the year's modes, or just the one requested.
    pub fn select_modes(
        &self,
        year: Season,
        only: Option<&ModeKey>,
    ) -> Result<Vec<(ModeKey, &ModeConfig)>, ConfigError> {
        match only {
            Some(mode) => Ok(vec![(mode.clone(), self.mode(year, mode)?)]),
            None => Ok(self
                .modes_for(year)?
                .iter()
                .map(|(k, v)| (k.clone(), v))
                .collect()),
        }
    }
}

/// Minimum ledger-owner count a league needs to count toward season totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeThresholds {
    by_mode: BTreeMap<ModeKey, usize>,
}

impl Default for ModeThresholds {
    fn default() -> Self {
        Self {
            by_mode: DEFAULT_THRESHOLDS
                .iter()
                .map(|(mode, min)| (ModeKey::new(*mode), *min))
                .collect(),
        }
    }
}

impl ModeThresholds {
    /// Thresholds with no defaults at all; every mode admits everything.
    pub fn empty() -> Self {
        Self {
            by_mode: BTreeMap::new(),
        }
    }

    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (ModeKey, usize)>,
    {
        self.by_mode.extend(overrides);
        self
    }

    /// Unknown modes fall back to 0, i.e. every league is eligible.
    pub fn threshold(&self, mode: &ModeKey) -> usize {
        self.by_mode.get(mode).copied().unwrap_or(0)
    }

    /// All-or-nothing eligibility: the whole league counts or none of it does.
    pub fn admits(&self, mode: &ModeKey, owner_count: usize) -> bool {
        owner_count >= self.threshold(mode)
    }

    /// Parse a `MODE=COUNT` override from the command line.
    pub fn parse_override(raw: &str) -> Result<(ModeKey, usize), ConfigError> {
        let invalid = || ConfigError::InvalidThreshold {
            raw: raw.to_string(),
        };
        let (mode, count) = raw.split_once('=').ok_or_else(invalid)?;
        let mode = mode.trim();
        if mode.is_empty() {
            return Err(invalid());
        }
        let count = count.trim().parse::<usize>().map_err(|_| invalid())?;
        Ok((ModeKey::new(mode), count))
    }
}

/// Tuning for every remote call made during a run.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    /// In-flight league fetches across the entire run.
    pub concurrency: usize,
    pub max_attempts: u32,
    /// Backoff before retry `n` is `backoff_base * n`.
    pub backoff_base: Duration,
    pub timeout: Duration,
    /// Upper bound on weekly pagination per league.
    pub max_weeks: u16,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: SLEEPER_BASE_URL.to_string(),
            concurrency: 5,
            max_attempts: 3,
            backoff_base: Duration::from_millis(500),
            timeout: Duration::from_secs(20),
            max_weeks: 25,
        }
    }
}

impl FetchSettings {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Flag, then `SLEEPER_FFL_BASE_URL`, then the public API.
    pub fn resolve_base_url(self, flag: Option<String>) -> Self {
        match flag.or_else(|| std::env::var(BASE_URL_ENV_VAR).ok()) {
            Some(url) => self.with_base_url(url),
            None => self,
        }
    }
}

/// Default league map location: `<config dir>/sleeper-ffl/leagues.json`.
pub fn default_league_map_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".config");
        home
    });
    base.join("sleeper-ffl").join("leagues.json")
}

/// Resolve the league map path from the flag, the environment, or the default location.
pub fn resolve_league_map_path(flag: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Ok(path) = std::env::var(LEAGUE_MAP_ENV_VAR) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    let default_path = default_league_map_path();
    if default_path.exists() {
        Ok(default_path)
    } else {
        Err(ConfigError::MissingLeagueMap {
            env_var: LEAGUE_MAP_ENV_VAR.to_string(),
            default_path: default_path.display().to_string(),
        })
    }
}
