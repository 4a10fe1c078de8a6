//! Indicator computation and bar stream assembly.

use crate::domain::bar::Bar;
use crate::domain::indicator::ema::{EmaSeed, calculate_ema};
use crate::domain::indicator::volume::calculate_volume_mean;
use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::strategy::StrategyParams;
use std::collections::HashMap;

pub fn compute_indicator(
    bars: &[OhlcvBar],
    indicator_type: &IndicatorType,
    seed: EmaSeed,
) -> IndicatorSeries {
    match indicator_type {
        IndicatorType::Ema(period) => calculate_ema(bars, *period, seed),
        IndicatorType::VolumeMean(period) => calculate_volume_mean(bars, *period),
    }
}

pub fn compute_indicators(
    bars: &[OhlcvBar],
    indicator_types: &[IndicatorType],
    seed: EmaSeed,
) -> HashMap<IndicatorType, IndicatorSeries> {
    let mut out = HashMap::with_capacity(indicator_types.len());
    for it in indicator_types {
        if !out.contains_key(it) {
            out.insert(it.clone(), compute_indicator(bars, it, seed));
        }
    }
    out
}

/// Attach the strategy's indicators to every OHLCV bar. Warm-up points become
/// `None` fields on the resulting [`Bar`]s.
pub fn build_bar_stream(ohlcv: &[OhlcvBar], params: &StrategyParams) -> Vec<Bar> {
    let indicators = compute_indicators(ohlcv, &params.indicators(), params.ema_seed);
    let lookup = |it: &IndicatorType, i: usize| indicators.get(it).and_then(|s| s.value_at(i));

    ohlcv
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            Bar::from_ohlcv(
                bar,
                lookup(&params.fast(), i),
                lookup(&params.slow(), i),
                lookup(&params.volume(), i),
            )
        })
        .collect()
}
