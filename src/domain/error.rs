//! Domain error types.

use crate::domain::universe::UniverseError;

/// Top-level error type for pullback.
#[derive(Debug, thiserror::Error)]
pub enum PullbackError {
    #[error("insufficient history: {field} is undefined")]
    InsufficientHistory { field: &'static str },

    #[error("malformed bar at index {index}: {reason}")]
    MalformedBar { index: usize, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {code} on {exchange}")]
    NoData { code: String, exchange: String },

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PullbackError {
    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            PullbackError::Io(_) => 1,
            PullbackError::ConfigParse { .. }
            | PullbackError::ConfigMissing { .. }
            | PullbackError::ConfigInvalid { .. } => 2,
            PullbackError::Data { .. } => 3,
            PullbackError::Universe(_) => 4,
            PullbackError::NoData { .. } => 5,
            PullbackError::InsufficientHistory { .. } | PullbackError::MalformedBar { .. } => 6,
        }
    }
}

impl From<&PullbackError> for std::process::ExitCode {
    fn from(err: &PullbackError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_bar_message_names_index() {
        let err = PullbackError::MalformedBar {
            index: 7,
            reason: "close must be positive".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed bar at index 7: close must be positive"
        );
    }

    #[test]
    fn insufficient_history_message() {
        let err = PullbackError::InsufficientHistory { field: "ema_slow" };
        assert_eq!(err.to_string(), "insufficient history: ema_slow is undefined");
    }

    #[test]
    fn exit_codes_by_category() {
        let config = PullbackError::ConfigMissing {
            section: "backtest".into(),
            key: "exchange".into(),
        };
        assert_eq!(config.exit_status(), 2);

        let data = PullbackError::Data {
            reason: "boom".into(),
        };
        assert_eq!(data.exit_status(), 3);

        let no_data = PullbackError::NoData {
            code: "AAPL".into(),
            exchange: "NASDAQ".into(),
        };
        assert_eq!(no_data.exit_status(), 5);

        let bar = PullbackError::MalformedBar {
            index: 0,
            reason: "x".into(),
        };
        assert_eq!(bar.exit_status(), 6);
    }

    #[test]
    fn universe_error_converts() {
        let err: PullbackError = UniverseError::EmptyToken.into();
        assert!(matches!(err, PullbackError::Universe(UniverseError::EmptyToken)));
        assert_eq!(err.exit_status(), 4);
    }
}
