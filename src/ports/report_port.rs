//! Trade log report port trait.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::PullbackError;

/// Port for writing the trade events of one or more runs.
pub trait ReportPort {
    fn write(
        &self,
        runs: &[(String, BacktestResult)],
        output_path: &str,
    ) -> Result<(), PullbackError>;
}
