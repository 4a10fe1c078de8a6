//! Raw OHLCV bar as delivered by a data port.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub code: String,
    pub exchange: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Name of the first price that is non-finite or not strictly positive.
pub fn first_bad_price(open: f64, high: f64, low: f64, close: f64) -> Option<&'static str> {
    [("open", open), ("high", high), ("low", low), ("close", close)]
        .into_iter()
        .find(|(_, v)| !v.is_finite() || *v <= 0.0)
        .map(|(name, _)| name)
}
