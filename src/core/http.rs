//! HTTP utilities: the single I/O boundary to remote services.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    core::config::FetchSettings,
    error::{RemoteError, RemoteErrorKind},
    Result,
};

/// GET-only JSON client with a per-request timeout and bounded, linearly
/// increasing retry backoff.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: Client,
    max_attempts: u32,
    backoff_base: Duration,
}

impl RemoteClient {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("sleeper-ffl/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            http,
            max_attempts: settings.max_attempts.max(1),
            backoff_base: settings.backoff_base,
        })
    }

    /// Fetch and decode `url`, retrying transient failures up to the attempt budget.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> std::result::Result<T, RemoteError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.get_once(url).await {
                Ok(value) => return Ok(value),
                Err(kind) if kind.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.backoff_base * attempt;
                    debug!(url, attempt, delay_ms = delay.as_millis() as u64, error = %kind, "retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(kind) => {
                    warn!(url, attempts = attempt, error = %kind, "giving up");
                    return Err(RemoteError {
                        url: url.to_string(),
                        attempts: attempt,
                        kind,
                    });
                }
            }
        }
    }

    /// Single-shot fetch for sequential probing: any failure means "absent".
    pub async fn probe_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        match self.get_once(url).await {
            Ok(value) => Some(value),
            Err(kind) => {
                debug!(url, error = %kind, "probe stopped");
                None
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> std::result::Result<T, RemoteErrorKind> {
        let res = self.http.get(url).send().await?.error_for_status()?;
        Ok(res.json::<T>().await?)
    }
}
