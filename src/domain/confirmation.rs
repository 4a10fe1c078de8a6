//! Confirmation scorer.
//!
//! Counts the secondary conditions that back up a pullback entry:
//!
//! - **volume**: the bar's volume is at or above its trailing mean volume
//! - **slope**: the slow EMA is higher than on the previous bar
//!
//! The volume check is a threshold comparison against the trailing mean, kept
//! exactly as the rule set states it even though the rule is described as
//! "light pullback volume".

use crate::domain::bar::Bar;
use crate::domain::error::PullbackError;

/// Score at which every confirmation holds.
pub const MAX_SCORE: u8 = 2;

/// Number of satisfied confirmations for `bar`, in `0..=MAX_SCORE`.
///
/// Both bars need `ema_slow` and `vol_mean`; otherwise this fails with
/// [`PullbackError::InsufficientHistory`].
pub fn score(bar: &Bar, previous: &Bar) -> Result<u8, PullbackError> {
    let slow = require(bar.ema_slow, "ema_slow")?;
    let vol_mean = require(bar.vol_mean, "vol_mean")?;
    let prev_slow = require(previous.ema_slow, "ema_slow")?;
    require(previous.vol_mean, "vol_mean")?;

    let mut count = 0;
    if volume_confirms(bar.volume, vol_mean) {
        count += 1;
    }
    if slope_confirms(slow, prev_slow) {
        count += 1;
    }
    Ok(count)
}

pub fn volume_confirms(volume: i64, vol_mean: f64) -> bool {
    volume as f64 >= vol_mean
}

pub fn slope_confirms(ema_slow: f64, prev_ema_slow: f64) -> bool {
    ema_slow > prev_ema_slow
}

fn require(value: Option<f64>, field: &'static str) -> Result<f64, PullbackError> {
    value.ok_or(PullbackError::InsufficientHistory { field })
}
