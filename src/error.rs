//! Error types for the Sleeper league aggregation pipeline

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, SleeperError>;

#[derive(Error, Debug)]
pub enum SleeperError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    LeagueFetch(#[from] LeagueFetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not write {path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Roster {roster_id} has fractional points {fraction} outside 0..=99")]
    InvalidFraction { roster_id: u32, fraction: i64 },

    #[error("Roster {roster_id} has whole points {whole} too large to represent")]
    PointsOverflow { roster_id: u32, whole: i64 },
}

/// Why a single remote call gave up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteErrorKind {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("undecodable body: {0}")]
    Decode(String),
}

impl RemoteErrorKind {
    /// Decode failures are not retried; the body will not change.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, RemoteErrorKind::Decode(_))
    }
}

impl From<reqwest::Error> for RemoteErrorKind {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteErrorKind::Timeout
        } else if let Some(status) = err.status() {
            RemoteErrorKind::Status(status.as_u16())
        } else if err.is_decode() {
            RemoteErrorKind::Decode(err.to_string())
        } else {
            RemoteErrorKind::Transport(err.to_string())
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("GET {url} failed after {attempts} attempt(s): {kind}")]
pub struct RemoteError {
    pub url: String,
    pub attempts: u32,
    pub kind: RemoteErrorKind,
}

/// One league's bundle could not be assembled. Isolated to that league.
#[derive(Error, Debug, Clone)]
#[error("League {league_id} could not be fetched: {cause}")]
pub struct LeagueFetchError {
    pub league_id: String,
    #[source]
    pub cause: RemoteError,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Year {year} not found in league map")]
    MissingYear { year: u16 },

    #[error("Mode {mode} not configured for year {year}")]
    MissingMode { year: u16, mode: String },

    #[error("League map not provided and {env_var} not set; looked for {default_path}")]
    MissingLeagueMap {
        env_var: String,
        default_path: String,
    },

    #[error("Could not read league map {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed league map {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Mode key must not be blank")]
    BlankMode,

    #[error("Invalid threshold override '{raw}', expected MODE=COUNT")]
    InvalidThreshold { raw: String },
}
