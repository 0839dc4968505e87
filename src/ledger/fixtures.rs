//! Mock Sleeper leagues for tests.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::{
    core::config::{FetchSettings, LeagueRef},
    sleeper::SleeperApi,
    LeagueId, ModeKey, Season,
};

pub fn api_for(server: &MockServer) -> SleeperApi {
    let settings = FetchSettings {
        max_attempts: 2,
        backoff_base: Duration::from_millis(1),
        ..FetchSettings::default()
    }
    .with_base_url(server.uri());
    SleeperApi::new(&settings).unwrap()
}

pub fn league_ref(id: &str, mode: &str, division: &str) -> LeagueRef {
    LeagueRef {
        league_id: LeagueId::new(id),
        year: Season::new(2025),
        mode: ModeKey::new(mode),
        division: division.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct MockRoster {
    pub roster_id: u32,
    pub owner: Option<String>,
    pub fpts: i64,
    pub fpts_decimal: i64,
}

/// A league served from a [`MockServer`]: info, users, rosters, and weeks of matchups.
#[derive(Debug, Clone)]
pub struct MockLeague {
    pub id: String,
    pub name: String,
    pub total_rosters: u32,
    pub users: Vec<(String, String)>,
    pub rosters: Vec<MockRoster>,
    /// `weeks[i]` holds `(roster_id, starters_points)` for week `i + 1`.
    pub weeks: Vec<Vec<(u32, Vec<f64>)>>,
    /// Added latency on the league info response.
    pub delay: Option<Duration>,
}

impl MockLeague {
    /// `owned` of `total` rosters claimed by users `{id}-u{n}` named `{name}-owner{n}`.
    pub fn with_owners(id: &str, name: &str, total: u32, owned: u32) -> Self {
        let users = (1..=owned)
            .map(|n| (format!("{id}-u{n}"), format!("{name}-owner{n}")))
            .collect();
        let rosters = (1..=total)
            .map(|n| MockRoster {
                roster_id: n,
                owner: (n <= owned).then(|| format!("{id}-u{n}")),
                fpts: 100 + n as i64,
                fpts_decimal: n as i64,
            })
            .collect();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            total_rosters: total,
            users,
            rosters,
            weeks: Vec::new(),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add `count` weeks where every roster scores `[10.0, week]`.
    pub fn with_weeks(mut self, count: u16) -> Self {
        self.weeks = (1..=count)
            .map(|w| {
                self.rosters
                    .iter()
                    .map(|r| (r.roster_id, vec![10.0, w as f64]))
                    .collect()
            })
            .collect();
        self
    }

    fn base(&self) -> String {
        format!("/league/{}", self.id)
    }

    fn rosters_json(&self) -> Value {
        Value::Array(
            self.rosters
                .iter()
                .map(|r| {
                    json!({
                        "roster_id": r.roster_id,
                        "owner_id": r.owner,
                        "settings": { "fpts": r.fpts, "fpts_decimal": r.fpts_decimal }
                    })
                })
                .collect(),
        )
    }

    fn week_json(week: &[(u32, Vec<f64>)]) -> Value {
        Value::Array(
            week.iter()
                .map(|(roster_id, pts)| json!({"roster_id": roster_id, "starters_points": pts}))
                .collect(),
        )
    }

    /// Mount info, users, and rosters.
    pub async fn mount_bundle(&self, server: &MockServer) {
        let info = ResponseTemplate::new(200)
            .set_body_json(json!({"name": self.name, "total_rosters": self.total_rosters}));
        Mock::given(method("GET"))
            .and(path(self.base()))
            .respond_with(match self.delay {
                Some(delay) => info.set_delay(delay),
                None => info,
            })
            .mount(server)
            .await;

        let users: Vec<Value> = self
            .users
            .iter()
            .map(|(id, name)| json!({"user_id": id, "display_name": name}))
            .collect();
        Mock::given(method("GET"))
            .and(path(format!("{}/users", self.base())))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(users)))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("{}/rosters", self.base())))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.rosters_json()))
            .mount(server)
            .await;
    }

    /// Mount each week plus the terminating empty week, expecting exactly `times` calls each.
    pub async fn mount_weeks(&self, server: &MockServer, times: u64) {
        for (i, week) in self.weeks.iter().enumerate() {
            Mock::given(method("GET"))
                .and(path(format!("{}/matchups/{}", self.base(), i + 1)))
                .respond_with(ResponseTemplate::new(200).set_body_json(Self::week_json(week)))
                .expect(times)
                .mount(server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path(format!(
                "{}/matchups/{}",
                self.base(),
                self.weeks.len() + 1
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(times)
            .mount(server)
            .await;
    }

    pub async fn mount(&self, server: &MockServer) {
        self.mount_bundle(server).await;
        self.mount_weeks(server, 1).await;
    }
}
