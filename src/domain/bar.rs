//! Indicator-enriched bar consumed by the signal engine.
//!
//! A [`Bar`] is one trading day of OHLCV data together with the two moving
//! averages and the rolling mean volume as of that day's close. Indicator
//! fields are `None` while their lookback is still warming up; such bars are
//! never tradeable.

use crate::domain::error::PullbackError;
use crate::domain::ohlcv::{OhlcvBar, first_bad_price};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub vol_mean: Option<f64>,
}

/// The three indicator values of a fully warmed-up bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicators {
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub vol_mean: f64,
}

impl Bar {
    pub fn from_ohlcv(
        bar: &OhlcvBar,
        ema_fast: Option<f64>,
        ema_slow: Option<f64>,
        vol_mean: Option<f64>,
    ) -> Self {
        Self {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            ema_fast,
            ema_slow,
            vol_mean,
        }
    }

    /// All indicator values, or `None` if any is still undefined.
    pub fn indicators(&self) -> Option<Indicators> {
        Some(Indicators {
            ema_fast: self.ema_fast?,
            ema_slow: self.ema_slow?,
            vol_mean: self.vol_mean?,
        })
    }
}

/// Check one bar against the stream invariants: finite positive prices,
/// non-negative volume, and a date strictly after `previous`.
pub fn validate_bar(index: usize, bar: &Bar, previous: Option<&Bar>) -> Result<(), PullbackError> {
    if let Some(field) = first_bad_price(bar.open, bar.high, bar.low, bar.close) {
        return Err(PullbackError::MalformedBar {
            index,
            reason: format!("{field} must be a positive finite price"),
        });
    }
    if bar.volume < 0 {
        return Err(PullbackError::MalformedBar {
            index,
            reason: format!("negative volume {}", bar.volume),
        });
    }
    if let Some(prev) = previous {
        if bar.date <= prev.date {
            return Err(PullbackError::MalformedBar {
                index,
                reason: format!("date {} does not follow {}", bar.date, prev.date),
            });
        }
    }
    Ok(())
}
