//! Strategy parameters for the 8/21 EMA pullback rules.

use crate::domain::indicator::IndicatorType;
use crate::domain::indicator::ema::EmaSeed;

pub const DEFAULT_FAST_PERIOD: usize = 8;
pub const DEFAULT_SLOW_PERIOD: usize = 21;
pub const DEFAULT_VOLUME_LOOKBACK: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyParams {
    pub fast_period: usize,
    pub slow_period: usize,
    pub volume_lookback: usize,
    pub ema_seed: EmaSeed,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
            volume_lookback: DEFAULT_VOLUME_LOOKBACK,
            ema_seed: EmaSeed::default(),
        }
    }
}

impl StrategyParams {
    pub fn fast(&self) -> IndicatorType {
        IndicatorType::Ema(self.fast_period)
    }

    pub fn slow(&self) -> IndicatorType {
        IndicatorType::Ema(self.slow_period)
    }

    pub fn volume(&self) -> IndicatorType {
        IndicatorType::VolumeMean(self.volume_lookback)
    }

    /// Indicators the bar stream needs, fast EMA first.
    pub fn indicators(&self) -> Vec<IndicatorType> {
        vec![self.fast(), self.slow(), self.volume()]
    }
}
