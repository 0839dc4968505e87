//! One league's metadata, users, and rosters, fetched together.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::{
    cli::types::UserId,
    core::config::LeagueRef,
    error::LeagueFetchError,
    sleeper::{
        types::{LeagueInfo, Roster, User},
        SleeperApi,
    },
};

/// Roster ownership for one league.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueFullness {
    pub total_rosters: u32,
    pub owned_rosters: u32,
    pub is_full: bool,
}

impl LeagueFullness {
    pub fn new(total_rosters: u32, owned_rosters: u32) -> Self {
        Self {
            total_rosters,
            owned_rosters,
            is_full: owned_rosters == total_rosters && total_rosters > 0,
        }
    }
}

/// Everything needed to resolve owners for one league. Immutable once built.
#[derive(Debug, Clone)]
pub struct LeagueBundle {
    pub league_ref: LeagueRef,
    pub league_name: String,
    pub rosters: Vec<Roster>,
    pub fullness: LeagueFullness,
    name_by_user_id: HashMap<UserId, String>,
    owner_by_roster_id: HashMap<u32, UserId>,
}

impl LeagueBundle {
    pub fn from_parts(
        league_ref: LeagueRef,
        info: LeagueInfo,
        users: Vec<User>,
        rosters: Vec<Roster>,
    ) -> Self {
        let name_by_user_id: HashMap<UserId, String> = users
            .into_iter()
            .map(|u| (u.user_id, u.display_name.unwrap_or_default()))
            .collect();

        let owner_by_roster_id: HashMap<u32, UserId> = rosters
            .iter()
            .filter_map(|r| r.owner_id.clone().map(|owner| (r.roster_id, owner)))
            .collect();

        let owned = rosters.iter().filter(|r| r.is_owned()).count() as u32;
        let total = info.total_rosters.unwrap_or(rosters.len() as u32);

        let league_name = info
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("League {}", league_ref.league_id));

        Self {
            league_ref,
            league_name,
            rosters,
            fullness: LeagueFullness::new(total, owned),
            name_by_user_id,
            owner_by_roster_id,
        }
    }

    pub fn owner_id(&self, roster_id: u32) -> Option<&UserId> {
        self.owner_by_roster_id.get(&roster_id)
    }

    /// The user's display name as Sleeper reports it, possibly blank.
    pub fn display_name(&self, user_id: &UserId) -> Option<&str> {
        self.name_by_user_id.get(user_id).map(String::as_str)
    }

    /// Name used to key ledger entries: the display name, or the user id
    /// when the display name is blank.
    pub fn ledger_name<'b>(&'b self, user_id: &'b UserId) -> Option<&'b str> {
        self.display_name(user_id).map(|name| {
            if name.trim().is_empty() {
                user_id.as_str()
            } else {
                name
            }
        })
    }

    /// Roster → owner → ledger name. `None` for unclaimed rosters and
    /// owners missing from the user list.
    pub fn owner_name(&self, roster_id: u32) -> Option<&str> {
        self.owner_id(roster_id)
            .and_then(|owner| self.ledger_name(owner))
    }

    /// Distinct resolvable owners in roster order, one per ledger name.
    ///
    /// These are exactly the owners that receive a ledger entry for this league.
    pub fn ledger_owners(&self) -> Vec<(&UserId, &str)> {
        let mut seen = HashSet::new();
        self.rosters
            .iter()
            .filter_map(|r| {
                let owner = r.owner_id.as_ref()?;
                let name = self.ledger_name(owner)?;
                seen.insert(name).then_some((owner, name))
            })
            .collect()
    }
}

/// Fetch league info, users, and rosters concurrently. Any one failing fails the bundle.
pub async fn fetch_league_bundle(
    api: &SleeperApi,
    league_ref: &LeagueRef,
) -> Result<LeagueBundle, LeagueFetchError> {
    let league_id = &league_ref.league_id;
    let (info, users, rosters) = tokio::try_join!(
        api.league(league_id),
        api.users(league_id),
        api.rosters(league_id),
    )
    .map_err(|cause| LeagueFetchError {
        league_id: league_id.to_string(),
        cause,
    })?;

    let bundle = LeagueBundle::from_parts(league_ref.clone(), info, users, rosters);
    debug!(
        league_id = %league_id,
        league = %bundle.league_name,
        owned = bundle.fullness.owned_rosters,
        total = bundle.fullness.total_rosters,
        "fetched league bundle"
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sleeper::types::RosterSettings, LeagueId, ModeKey, Season};

    fn league_ref() -> LeagueRef {
        LeagueRef {
            league_id: LeagueId::new("500"),
            year: Season::new(2025),
            mode: ModeKey::new("big_game"),
            division: "Pokemon".to_string(),
        }
    }

    fn roster(id: u32, owner: Option<&str>) -> Roster {
        Roster {
            roster_id: id,
            owner_id: owner.map(UserId::new),
            settings: RosterSettings::default(),
        }
    }

    fn user(id: &str, name: &str) -> User {
        User {
            user_id: UserId::new(id),
            display_name: Some(name.to_string()),
        }
    }

    #[test]
    fn test_fullness_invariant() {
        assert!(LeagueFullness::new(8, 8).is_full);
        assert!(!LeagueFullness::new(8, 5).is_full);
        assert!(!LeagueFullness::new(0, 0).is_full);
    }

    #[test]
    fn test_bundle_maps_and_fullness() {
        let info = LeagueInfo {
            name: Some("Pikachu League".into()),
            total_rosters: Some(3),
        };
        let bundle = LeagueBundle::from_parts(
            league_ref(),
            info,
            vec![user("u1", "ash"), user("u2", "misty")],
            vec![roster(1, Some("u1")), roster(2, Some("u2")), roster(3, None)],
        );

        assert_eq!(bundle.league_name, "Pikachu League");
        assert_eq!(bundle.fullness, LeagueFullness::new(3, 2));
        assert_eq!(bundle.owner_name(1), Some("ash"));
        assert_eq!(bundle.owner_name(3), None);
        assert_eq!(bundle.owner_name(99), None);
    }

    #[test]
    fn test_total_rosters_falls_back_to_roster_count() {
        let info = LeagueInfo {
            name: None,
            total_rosters: None,
        };
        let bundle = LeagueBundle::from_parts(
            league_ref(),
            info,
            vec![user("u1", "ash")],
            vec![roster(1, Some("u1")), roster(2, Some("u1"))],
        );
        assert_eq!(bundle.league_name, "League 500");
        assert!(bundle.fullness.is_full);
        assert_eq!(bundle.fullness.total_rosters, 2);
    }

    #[test]
    fn test_ledger_owners_skip_unresolved_and_duplicates() {
        let info = LeagueInfo {
            name: Some("L".into()),
            total_rosters: Some(4),
        };
        let bundle = LeagueBundle::from_parts(
            league_ref(),
            info,
            vec![user("u1", "ash"), user("u2", "misty")],
            vec![
                roster(1, Some("u1")),
                roster(2, Some("ghost")),
                roster(3, Some("u1")),
                roster(4, Some("u2")),
            ],
        );

        let owners: Vec<&str> = bundle.ledger_owners().into_iter().map(|(_, n)| n).collect();
        assert_eq!(owners, vec!["ash", "misty"]);
    }

    #[test]
    fn test_blank_display_names_fall_back_to_user_id() {
        let info = LeagueInfo {
            name: Some("L".into()),
            total_rosters: Some(3),
        };
        let bundle = LeagueBundle::from_parts(
            league_ref(),
            info,
            vec![
                user("u1", ""),
                user("u2", "  "),
                User {
                    user_id: UserId::new("u3"),
                    display_name: None,
                },
            ],
            vec![roster(1, Some("u1")), roster(2, Some("u2")), roster(3, Some("u3"))],
        );

        let owners: Vec<&str> = bundle.ledger_owners().into_iter().map(|(_, n)| n).collect();
        assert_eq!(owners, vec!["u1", "u2", "u3"]);
        assert_eq!(bundle.owner_name(2), Some("u2"));
        assert_eq!(bundle.display_name(&UserId::new("u1")), Some(""));
    }
}
