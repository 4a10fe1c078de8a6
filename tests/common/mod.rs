#![allow(dead_code)]

use chrono::NaiveDate;
use pullback::domain::backtest::BacktestConfig;
pub use pullback::domain::bar::Bar;
use pullback::domain::error::PullbackError;
pub use pullback::domain::ohlcv::OhlcvBar;
use pullback::ports::data_port::DataPort;
use std::collections::HashMap;
use std::path::Path;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        code: &str,
        _exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, PullbackError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(PullbackError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(code)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self, _exchange: &str) -> Result<Vec<String>, PullbackError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        code: &str,
        _exchange: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, PullbackError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(PullbackError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(code) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive calendar days starting 2024-01-01.
pub fn day(index: usize) -> NaiveDate {
    date(2024, 1, 1) + chrono::Duration::days(index as i64)
}

pub fn make_ohlcv(code: &str, index: usize, close: f64, volume: i64) -> OhlcvBar {
    OhlcvBar {
        code: code.to_string(),
        exchange: "NASDAQ".to_string(),
        date: day(index),
        open: close,
        high: close * 1.01,
        low: close * 0.99,
        close,
        volume,
    }
}

pub fn make_series(code: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_ohlcv(code, i, c, 1_000))
        .collect()
}

/// A warmed-up bar with every indicator set.
pub fn make_bar(index: usize, close: f64, fast: f64, slow: f64, volume: i64, vol_mean: f64) -> Bar {
    Bar {
        date: day(index),
        open: close,
        high: close + 0.5,
        low: close - 0.5,
        close,
        volume,
        ema_fast: Some(fast),
        ema_slow: Some(slow),
        vol_mean: Some(vol_mean),
    }
}

/// A bar whose indicators are still warming up.
pub fn make_cold_bar(index: usize, close: f64) -> Bar {
    Bar {
        date: day(index),
        open: close,
        high: close + 0.5,
        low: close - 0.5,
        close,
        volume: 1_000,
        ema_fast: None,
        ema_slow: None,
        vol_mean: None,
    }
}

/// Five bars whose last bar is a fast-EMA pullback entry: previous close 10
/// over fast 9 and slow 8, two-back close 8.5 under fast 9.2, current close
/// 10.5 with the slow EMA rising to 8.2 on above-average volume.
pub fn pullback_window() -> Vec<Bar> {
    vec![
        make_bar(0, 9.5, 9.3, 7.8, 900, 1_000.0),
        make_bar(1, 9.6, 9.3, 7.9, 900, 1_000.0),
        make_bar(2, 8.5, 9.2, 7.95, 900, 1_000.0),
        make_bar(3, 10.0, 9.0, 8.0, 900, 1_000.0),
        make_bar(4, 10.5, 9.0, 8.2, 1_200, 1_000.0),
    ]
}

/// The pullback window followed by a hold bar and a close under the fast EMA.
pub fn round_trip_stream() -> Vec<Bar> {
    let mut bars = pullback_window();
    bars.push(make_bar(5, 11.0, 9.8, 8.4, 1_000, 1_000.0));
    bars.push(make_bar(6, 9.0, 9.5, 8.5, 1_000, 1_000.0));
    bars.push(make_bar(7, 9.1, 9.4, 8.55, 900, 1_000.0));
    bars
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig {
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
    }
}

pub fn write_quotes_csv(dir: &Path, code: &str, exchange: &str, bars: &[OhlcvBar]) {
    let mut content = String::from("date,open,high,low,close,volume\n");
    for b in bars {
        content.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.date.format("%Y-%m-%d"),
            b.open,
            b.high,
            b.low,
            b.close,
            b.volume
        ));
    }
    std::fs::write(dir.join(format!("{}_{}.csv", code, exchange)), content).unwrap();
}
