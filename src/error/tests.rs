//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod sleeper_error_tests {
    use super::*;

    fn remote(kind: RemoteErrorKind) -> RemoteError {
        RemoteError {
            url: "https://api.sleeper.app/v1/league/1".to_string(),
            attempts: 3,
            kind,
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = SleeperError::from(json_error);

        match err {
            SleeperError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err = SleeperError::from(io_error);

        match err {
            SleeperError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_remote_error_display() {
        let err = remote(RemoteErrorKind::Status(503));
        let s = err.to_string();
        assert!(s.contains("league/1"));
        assert!(s.contains("3 attempt"));
        assert!(s.contains("503"));
    }

    #[test]
    fn test_decode_is_not_retryable() {
        assert!(RemoteErrorKind::Status(500).is_retryable());
        assert!(RemoteErrorKind::Timeout.is_retryable());
        assert!(RemoteErrorKind::Transport("reset".into()).is_retryable());
        assert!(!RemoteErrorKind::Decode("eof".into()).is_retryable());
    }

    #[test]
    fn test_league_fetch_error_keeps_cause() {
        let err = LeagueFetchError {
            league_id: "1078876267329482752".to_string(),
            cause: remote(RemoteErrorKind::Timeout),
        };

        assert!(err.to_string().contains("1078876267329482752"));
        let error_trait: &dyn std::error::Error = &err;
        assert!(error_trait.source().is_some());

        let wrapped = SleeperError::from(err);
        match wrapped {
            SleeperError::LeagueFetch(inner) => assert_eq!(inner.cause.kind, RemoteErrorKind::Timeout),
            _ => panic!("Expected LeagueFetch error variant"),
        }
    }

    #[test]
    fn test_missing_year_message() {
        let err = ConfigError::MissingYear { year: 2031 };
        assert_eq!(err.to_string(), "Year 2031 not found in league map");
    }

    #[test]
    fn test_invalid_threshold_message() {
        let err = ConfigError::InvalidThreshold {
            raw: "dynasty".to_string(),
        };
        assert!(err.to_string().contains("MODE=COUNT"));
    }

    #[test]
    fn test_invalid_fraction_message() {
        let err = SleeperError::InvalidFraction {
            roster_id: 4,
            fraction: 150,
        };
        let s = err.to_string();
        assert!(s.contains("Roster 4"));
        assert!(s.contains("150"));
    }

    #[test]
    fn test_points_overflow_message() {
        let err = SleeperError::PointsOverflow {
            roster_id: 2,
            whole: i64::MAX,
        };
        assert!(err.to_string().contains(&i64::MAX.to_string()));
    }

    #[test]
    fn test_result_type_alias_error() {
        fn test_function() -> Result<String> {
            Err(ConfigError::MissingYear { year: 2020 }.into())
        }

        match test_function().unwrap_err() {
            SleeperError::Config(ConfigError::MissingYear { year }) => assert_eq!(year, 2020),
            _ => panic!("Expected MissingYear error"),
        }
    }
}
