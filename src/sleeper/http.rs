//! Sleeper endpoint functions on top of [`RemoteClient`].

use crate::{
    core::{config::FetchSettings, http::RemoteClient},
    error::RemoteError,
    sleeper::types::{LeagueInfo, Matchup, Page, Roster, User},
    LeagueId, Result, Week,
};

#[cfg(test)]
mod tests;

/// Read-only access to the league endpoints of the Sleeper API.
#[derive(Debug, Clone)]
pub struct SleeperApi {
    client: RemoteClient,
    base_url: String,
}

impl SleeperApi {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        Ok(Self::with_client(RemoteClient::new(settings)?, &settings.base_url))
    }

    pub fn with_client(client: RemoteClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn league_url(&self, league_id: &LeagueId) -> String {
        format!("{}/league/{}", self.base_url, league_id)
    }

    pub async fn league(&self, league_id: &LeagueId) -> std::result::Result<LeagueInfo, RemoteError> {
        self.client.get_json(&self.league_url(league_id)).await
    }

    pub async fn users(&self, league_id: &LeagueId) -> std::result::Result<Vec<User>, RemoteError> {
        let url = format!("{}/users", self.league_url(league_id));
        Ok(self.client.get_json::<Page<User>>(&url).await?.items)
    }

    pub async fn rosters(&self, league_id: &LeagueId) -> std::result::Result<Vec<Roster>, RemoteError> {
        let url = format!("{}/rosters", self.league_url(league_id));
        Ok(self.client.get_json::<Page<Roster>>(&url).await?.items)
    }

    /// An empty result means the league's season has no data for `week`.
    pub async fn matchups(
        &self,
        league_id: &LeagueId,
        week: Week,
    ) -> std::result::Result<Vec<Matchup>, RemoteError> {
        let url = format!("{}/matchups/{}", self.league_url(league_id), week);
        Ok(self.client.get_json::<Page<Matchup>>(&url).await?.items)
    }
}
