use crate::cli::types::UserId;
use serde::{Deserialize, Deserializer, Serialize};


/// Sleeper sends `null` for empty arrays in a few places.
fn de_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<Vec<T>> = Deserialize::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

/// Owner ids arrive as `null`, missing, or occasionally an empty string.
fn de_owner_id<'de, D>(deserializer: D) -> Result<Option<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(UserId))
}

/// `GET /league/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeagueInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub total_rosters: Option<u32>,
}

/// One entry of `GET /league/{id}/users`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub user_id: UserId,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Authoritative season points, split into whole and hundredths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RosterSettings {
    #[serde(default)]
    pub fpts: i64,
    #[serde(default)]
    pub fpts_decimal: i64,
}

/// One entry of `GET /league/{id}/rosters`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Roster {
    pub roster_id: u32,
    #[serde(default, deserialize_with = "de_owner_id")]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub settings: RosterSettings,
}

impl Roster {
    pub fn is_owned(&self) -> bool {
        self.owner_id.is_some()
    }
}

/// One entry of `GET /league/{id}/matchups/{week}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Matchup {
    pub roster_id: u32,
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub starters_points: Vec<f64>,
}

/// A list endpoint body that may be `null`.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        de_null_as_empty(deserializer).map(|items| Page { items })
    }
}
