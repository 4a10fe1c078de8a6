//! CSV trade log writer.
//!
//! One row per trade event: `code,kind,bar_index,date,price`, runs in the
//! order given and events in emission order.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::PullbackError;
use crate::domain::position::TradeKind;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::io::Write;

const HEADER: [&str; 5] = ["code", "kind", "bar_index", "date", "price"];

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

#[derive(Debug, Serialize)]
struct TradeRow<'a> {
    code: &'a str,
    kind: TradeKind,
    bar_index: usize,
    date: String,
    price: f64,
}

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize the trade log into any writer. The header is written even
    /// when there are no events.
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        runs: &[(String, BacktestResult)],
    ) -> Result<(), PullbackError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(HEADER).map_err(csv_error)?;

        for (code, result) in runs {
            for event in &result.events {
                wtr.serialize(TradeRow {
                    code,
                    kind: event.kind,
                    bar_index: event.bar_index,
                    date: event.date.format("%Y-%m-%d").to_string(),
                    price: event.price,
                })
                .map_err(csv_error)?;
            }
        }
        wtr.flush()?;
        Ok(())
    }
}

fn csv_error(e: csv::Error) -> PullbackError {
    PullbackError::Data {
        reason: format!("CSV write error: {}", e),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        runs: &[(String, BacktestResult)],
        output_path: &str,
    ) -> Result<(), PullbackError> {
        let file = std::fs::File::create(output_path)?;
        self.write_to(file, runs)?;
        tracing::info!(path = output_path, "trade log written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::{Position, TradeEvent};
    use chrono::NaiveDate;

    fn result(events: Vec<TradeEvent>, position: Position) -> BacktestResult {
        BacktestResult {
            events,
            position,
            bars_processed: 10,
        }
    }

    fn event(kind: TradeKind, bar_index: usize, day: u32, price: f64) -> TradeEvent {
        TradeEvent {
            kind,
            bar_index,
            date: NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
            price,
        }
    }

    #[test]
    fn writes_rows_in_order() {
        let runs = vec![
            (
                "AAPL".to_string(),
                result(
                    vec![
                        event(TradeKind::Entry, 4, 5, 10.5),
                        event(TradeKind::Exit, 6, 9, 9.25),
                    ],
                    Position::flat(),
                ),
            ),
            (
                "MSFT".to_string(),
                result(vec![event(TradeKind::Entry, 2, 3, 300.0)], Position::long(2)),
            ),
        ];

        let mut buf = Vec::new();
        CsvReportAdapter::new().write_to(&mut buf, &runs).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "code,kind,bar_index,date,price");
        assert_eq!(lines[1], "AAPL,ENTRY,4,2024-07-05,10.5");
        assert_eq!(lines[2], "AAPL,EXIT,6,2024-07-09,9.25");
        assert_eq!(lines[3], "MSFT,ENTRY,2,2024-07-03,300.0");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn empty_log_still_has_header() {
        let runs = vec![("AAPL".to_string(), result(vec![], Position::flat()))];
        let mut buf = Vec::new();
        CsvReportAdapter::new().write_to(&mut buf, &runs).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "code,kind,bar_index,date,price\n");
    }

    #[test]
    fn write_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trades.csv");
        let runs = vec![(
            "AAPL".to_string(),
            result(vec![event(TradeKind::Entry, 1, 2, 1.0)], Position::long(1)),
        )];

        CsvReportAdapter::new()
            .write(&runs, path.to_str().unwrap())
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("AAPL,ENTRY,1,2024-07-02,1.0"));
    }
}
