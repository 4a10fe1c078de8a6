//! CSV file data adapter.
//!
//! One file per symbol, `<base>/<CODE>_<EXCHANGE>.csv`, with a header row and
//! columns `date,open,high,low,close,volume` (ISO dates).

use crate::domain::error::PullbackError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str, exchange: &str) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", code, exchange))
    }

    fn read_all(&self, code: &str, exchange: &str) -> Result<Vec<OhlcvBar>, PullbackError> {
        let path = self.csv_path(code, exchange);
        let content = fs::read_to_string(&path).map_err(|e| PullbackError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| PullbackError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = field(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                PullbackError::Data {
                    reason: format!("invalid date format '{}': {}", date_str, e),
                }
            })?;

            bars.push(OhlcvBar {
                code: code.to_string(),
                exchange: exchange.to_string(),
                date,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_volume(field(&record, 5, "volume")?)?,
            });
        }

        bars.sort_by_key(|b| b.date);
        tracing::debug!(path = %path.display(), bars = bars.len(), "loaded csv");
        Ok(bars)
    }
}

fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'r str, PullbackError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| PullbackError::Data {
            reason: format!("missing {} column", name),
        })
}

fn parse_field<T>(record: &csv::StringRecord, index: usize, name: &str) -> Result<T, PullbackError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    field(record, index, name)?
        .parse()
        .map_err(|e| PullbackError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

/// Volumes exported as floats ("1234.0") are accepted when they are whole and
/// fit in an `i64`.
fn parse_volume(raw: &str) -> Result<i64, PullbackError> {
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(v);
    }
    // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
    let in_range = |v: f64| (i64::MIN as f64..i64::MAX as f64).contains(&v);
    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && in_range(v) => Ok(v as i64),
        _ => Err(PullbackError::Data {
            reason: format!("invalid volume value: {}", raw),
        }),
    }
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        code: &str,
        exchange: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, PullbackError> {
        let mut bars = self.read_all(code, exchange)?;
        bars.retain(|b| b.date >= start_date && b.date <= end_date);
        Ok(bars)
    }

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, PullbackError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| PullbackError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let suffix = format!("_{}.csv", exchange);
        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| PullbackError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(code) = name_str.strip_suffix(&suffix) {
                symbols.push(code.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        code: &str,
        exchange: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, PullbackError> {
        if !self.csv_path(code, exchange).exists() {
            return Ok(None);
        }
        let bars = self.read_all(code, exchange)?;
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
