//! Configuration validation.
//!
//! Validates all config fields before a backtest runs.

use crate::domain::error::PullbackError;
use crate::domain::indicator::ema::EmaSeed;
use crate::domain::strategy::{DEFAULT_FAST_PERIOD, DEFAULT_SLOW_PERIOD, DEFAULT_VOLUME_LOOKBACK};
use crate::domain::universe::parse_codes;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), PullbackError> {
    validate_data_path(config)?;
    validate_dates(config)?;
    validate_exchange(config)?;
    validate_codes(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), PullbackError> {
    let fast = validate_period(config, "fast_period", DEFAULT_FAST_PERIOD as i64)?;
    let slow = validate_period(config, "slow_period", DEFAULT_SLOW_PERIOD as i64)?;
    validate_period(config, "volume_lookback", DEFAULT_VOLUME_LOOKBACK as i64)?;
    if fast >= slow {
        return Err(PullbackError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "fast_period".to_string(),
            reason: "fast_period must be less than slow_period".to_string(),
        });
    }
    validate_ema_seed(config)?;
    Ok(())
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), PullbackError> {
    match config.get_string("data", "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(PullbackError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), PullbackError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(PullbackError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

pub fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, PullbackError> {
    match value {
        None => Err(PullbackError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            PullbackError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            }
        }),
    }
}

fn validate_exchange(config: &dyn ConfigPort) -> Result<(), PullbackError> {
    match config.get_string("backtest", "exchange") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(PullbackError::ConfigMissing {
            section: "backtest".to_string(),
            key: "exchange".to_string(),
        }),
    }
}

fn validate_codes(config: &dyn ConfigPort) -> Result<(), PullbackError> {
    let codes = config.get_string("backtest", "codes");
    let code = config.get_string("backtest", "code");

    match (codes, code) {
        (Some(c), _) if !c.trim().is_empty() => {
            parse_codes(&c)?;
            Ok(())
        }
        (_, Some(c)) if !c.trim().is_empty() => Ok(()),
        _ => Err(PullbackError::ConfigMissing {
            section: "backtest".to_string(),
            key: "code".to_string(),
        }),
    }
}

fn validate_period(config: &dyn ConfigPort, key: &str, default: i64) -> Result<i64, PullbackError> {
    let invalid = |reason: String| PullbackError::ConfigInvalid {
        section: "strategy".to_string(),
        key: key.to_string(),
        reason,
    };
    let value = match config.get_string("strategy", key) {
        None => default,
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| invalid(format!("{} must be a whole number, got '{}'", key, raw)))?,
    };
    if value < 1 {
        return Err(invalid(format!("{} must be at least 1", key)));
    }
    Ok(value)
}

fn validate_ema_seed(config: &dyn ConfigPort) -> Result<(), PullbackError> {
    if let Some(s) = config.get_string("strategy", "ema_seed") {
        s.parse::<EmaSeed>()
            .map_err(|reason| PullbackError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "ema_seed".to_string(),
                reason,
            })?;
    }
    Ok(())
}
