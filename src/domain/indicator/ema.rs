//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), EMA[i] = C[i]*k + EMA[i-1]*(1-k). Two seedings:
//!
//! - [`EmaSeed::Sma`]: seed with the SMA of the first n closes; the first
//!   (n-1) bars are invalid.
//! - [`EmaSeed::FirstClose`] (default): EMA[0] = C[0] and every bar is valid,
//!   the recursive form used by pandas `ewm(span=n, adjust=False)`.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmaSeed {
    Sma,
    #[default]
    FirstClose,
}

impl fmt::Display for EmaSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmaSeed::Sma => write!(f, "sma"),
            EmaSeed::FirstClose => write!(f, "first_close"),
        }
    }
}

impl FromStr for EmaSeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sma" => Ok(EmaSeed::Sma),
            "first_close" => Ok(EmaSeed::FirstClose),
            other => Err(format!("unknown EMA seed '{}' (expected sma or first_close)", other)),
        }
    }
}

pub fn calculate_ema(bars: &[OhlcvBar], period: usize, seed: EmaSeed) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries {
            indicator_type: IndicatorType::Ema(period),
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = 0.0;
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        let valid = match seed {
            EmaSeed::Sma if i < period - 1 => {
                sum += bar.close;
                false
            }
            EmaSeed::Sma if i == period - 1 => {
                sum += bar.close;
                ema = sum / period as f64;
                true
            }
            EmaSeed::FirstClose if i == 0 => {
                ema = bar.close;
                true
            }
            _ => {
                ema = bar.close * k + ema * (1.0 - k);
                true
            }
        };
        values.push(IndicatorPoint {
            date: bar.date,
            valid,
            value: if valid { ema } else { 0.0 },
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        values,
    }
}
