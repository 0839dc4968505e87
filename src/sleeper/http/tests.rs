//! Unit tests for Sleeper endpoint functions

use super::*;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn api_for(server: &MockServer) -> SleeperApi {
    let settings = FetchSettings {
        max_attempts: 2,
        backoff_base: Duration::from_millis(1),
        ..FetchSettings::default()
    }
    .with_base_url(server.uri());
    SleeperApi::new(&settings).unwrap()
}

#[cfg(test)]
mod http_tests {
    use super::*;

    #[tokio::test]
    async fn test_league_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/league/100"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"name": "Mini Game 101", "total_rosters": 12})),
            )
            .mount(&server)
            .await;

        let info = api_for(&server).league(&LeagueId::new("100")).await.unwrap();
        assert_eq!(info.name.as_deref(), Some("Mini Game 101"));
        assert_eq!(info.total_rosters, Some(12));
    }

    #[tokio::test]
    async fn test_users_and_rosters_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/league/100/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"user_id": "u1", "display_name": "alpha"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/league/100/rosters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"roster_id": 1, "owner_id": "u1", "settings": {"fpts": 10, "fpts_decimal": 5}},
                {"roster_id": 2, "owner_id": null, "settings": {}}
            ])))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let league_id = LeagueId::new("100");
        let users = api.users(&league_id).await.unwrap();
        let rosters = api.rosters(&league_id).await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(rosters.len(), 2);
        assert!(rosters[0].is_owned());
        assert!(!rosters[1].is_owned());
    }

    #[tokio::test]
    async fn test_matchups_null_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/league/100/matchups/18"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
            .mount(&server)
            .await;

        let m = api_for(&server)
            .matchups(&LeagueId::new("100"), Week::new(18))
            .await
            .unwrap();
        assert!(m.is_empty());
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/league/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "x"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = RemoteClient::new(&FetchSettings::default()).unwrap();
        let api = SleeperApi::with_client(client, &format!("{}/", server.uri()));
        assert!(api.league(&LeagueId::new("7")).await.is_ok());
    }

    #[tokio::test]
    async fn test_endpoint_failure_surfaces_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/league/100/rosters"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let err = api_for(&server)
            .rosters(&LeagueId::new("100"))
            .await
            .unwrap_err();
        assert_eq!(err.attempts, 2);
        assert!(err.url.ends_with("/league/100/rosters"));
    }
}
