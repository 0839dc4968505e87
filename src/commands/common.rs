//! Common utilities and helper functions shared across commands.

use tracing::{debug, warn};

use crate::{
    cli::GlobalOpts,
    core::config::{resolve_league_map_path, FetchSettings, LeagueMap, ModeThresholds},
    sleeper::SleeperApi,
    Result,
};

/// Context containing common resources needed by the networked commands
pub struct CommandContext {
    pub map: LeagueMap,
    pub settings: FetchSettings,
    pub thresholds: ModeThresholds,
    pub api: SleeperApi,
}

impl CommandContext {
    /// Load the league map and build the API client from global options
    pub fn new(global: &GlobalOpts) -> Result<Self> {
        let path = resolve_league_map_path(global.leagues.clone())?;
        debug!(path = %path.display(), "loading league map");
        let map = LeagueMap::from_path(&path)?;

        let settings = fetch_settings(global);
        let thresholds = ModeThresholds::default()
            .with_overrides(map.thresholds.clone())
            .with_overrides(parse_threshold_overrides(&global.min_rosters));
        let api = SleeperApi::new(&settings)?;

        Ok(Self {
            map,
            settings,
            thresholds,
            api,
        })
    }
}

pub fn fetch_settings(global: &GlobalOpts) -> FetchSettings {
    let mut settings = FetchSettings::default().resolve_base_url(global.base_url.clone());
    settings.concurrency = global.concurrency.max(1);
    settings
}

/// Parse repeated `MODE=N` flags. Malformed entries are logged and ignored.
pub fn parse_threshold_overrides(raw: &[String]) -> Vec<(crate::ModeKey, usize)> {
    raw.iter()
        .filter_map(|r| match ModeThresholds::parse_override(r) {
            Ok(pair) => Some(pair),
            Err(err) => {
                warn!(error = %err, "ignoring threshold override");
                None
            }
        })
        .collect()
}
