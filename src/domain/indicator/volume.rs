//! Rolling mean volume.
//!
//! VOLMEAN(n)[i] = mean(V[max(0, i-n+1)..=i]). Partial windows at the start of
//! the series average whatever bars exist, so every point is valid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_volume_mean(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 {
        return IndicatorSeries {
            indicator_type: IndicatorType::VolumeMean(period),
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        sum += bar.volume as f64;
        if i >= period {
            sum -= bars[i - period].volume as f64;
        }
        let count = (i + 1).min(period);
        values.push(IndicatorPoint {
            date: bar.date,
            valid: true,
            value: sum / count as f64,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::VolumeMean(period),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_bars(volumes: &[i64]) -> Vec<OhlcvBar> {
        volumes
            .iter()
            .enumerate()
            .map(|(i, &volume)| OhlcvBar {
                code: "TEST".into(),
                exchange: "TEST".into(),
                date: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                open: 10.0,
                high: 10.0,
                low: 10.0,
                close: 10.0,
                volume,
            })
            .collect()
    }

    #[test]
    fn partial_window_averages_available_bars() {
        let bars = make_bars(&[100, 200, 300]);
        let series = calculate_volume_mean(&bars, 5);

        assert!(series.values.iter().all(|p| p.valid));
        assert_relative_eq!(series.values[0].value, 100.0);
        assert_relative_eq!(series.values[1].value, 150.0);
        assert_relative_eq!(series.values[2].value, 200.0);
    }

    #[test]
    fn full_window_rolls() {
        let bars = make_bars(&[100, 200, 300, 400, 500]);
        let series = calculate_volume_mean(&bars, 3);

        assert_relative_eq!(series.values[2].value, 200.0);
        assert_relative_eq!(series.values[3].value, 300.0);
        assert_relative_eq!(series.values[4].value, 400.0);
    }

    #[test]
    fn period_one_is_the_volume() {
        let bars = make_bars(&[7, 9, 11]);
        let series = calculate_volume_mean(&bars, 1);
        let got: Vec<f64> = series.values.iter().map(|p| p.value).collect();
        assert_eq!(got, vec![7.0, 9.0, 11.0]);
    }

    #[test]
    fn zero_period_is_empty() {
        let bars = make_bars(&[1, 2]);
        let series = calculate_volume_mean(&bars, 0);
        assert!(series.values.is_empty());
        assert_eq!(series.indicator_type, IndicatorType::VolumeMean(0));
    }
}
