//! OHLCV data access port trait.

use crate::domain::error::PullbackError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for `code` within the inclusive date range, ascending by date.
    fn fetch_ohlcv(
        &self,
        code: &str,
        exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, PullbackError>;

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, PullbackError>;

    /// First date, last date and bar count, or `None` when there is no data.
    fn get_data_range(
        &self,
        code: &str,
        exchange: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, PullbackError>;
}
