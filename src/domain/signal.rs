//! Entry signal evaluator.
//!
//! A flat position is opened when all three gates pass, evaluated in order:
//!
//! 1. **Trend alignment** on the previous bar: close above both EMAs and the
//!    fast EMA above the slow EMA. The current bar's averages are never used
//!    here.
//! 2. **Confirmation**: [`confirmation::score`] of the current bar against the
//!    previous one must be [`MAX_SCORE`].
//! 3. **Pullback touch** on the fast EMA: the close two bars back sat at or
//!    below that bar's fast EMA, and the current close is above the previous
//!    bar's fast EMA.
//!
//! Windows that are too short, or whose last three bars are not fully warmed
//! up, yield [`EntrySignal::NoAction`]; missing history is not an error here.

use crate::domain::bar::{Bar, Indicators};
use crate::domain::confirmation::{self, MAX_SCORE};
use crate::domain::position::Position;

/// Bars needed to evaluate an entry: two-back, previous, current.
pub const ENTRY_LOOKBACK: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySignal {
    Enter,
    NoAction,
}

/// Decide whether to enter on the last bar of `window`.
pub fn evaluate_entry(window: &[Bar], position: &Position) -> EntrySignal {
    if !position.is_flat() || window.len() < ENTRY_LOOKBACK {
        return EntrySignal::NoAction;
    }
    let [two_back, previous, current] = &window[window.len() - ENTRY_LOOKBACK..] else {
        return EntrySignal::NoAction;
    };
    let (Some(two_back_ind), Some(prev_ind), Some(_)) = (
        two_back.indicators(),
        previous.indicators(),
        current.indicators(),
    ) else {
        return EntrySignal::NoAction;
    };

    if !trend_aligned(previous.close, &prev_ind) {
        return EntrySignal::NoAction;
    }

    match confirmation::score(current, previous) {
        Ok(MAX_SCORE) => {}
        _ => return EntrySignal::NoAction,
    }

    if fast_touch(two_back, &two_back_ind, current, &prev_ind) {
        return EntrySignal::Enter;
    }

    // Slow-EMA touch: the second entry scenario of the rule set. The trend gate
    // puts price above both averages before any touch is checked, so the rules
    // never act on it. Evaluated but inert; it never opens a position.
    if slow_touch(two_back, &two_back_ind, current, &prev_ind) {
        return EntrySignal::NoAction;
    }

    EntrySignal::NoAction
}

pub fn trend_aligned(close: f64, ind: &Indicators) -> bool {
    close > ind.ema_fast && close > ind.ema_slow && ind.ema_fast > ind.ema_slow
}

pub fn fast_touch(
    two_back: &Bar,
    two_back_ind: &Indicators,
    current: &Bar,
    prev_ind: &Indicators,
) -> bool {
    two_back.close <= two_back_ind.ema_fast && current.close > prev_ind.ema_fast
}

pub fn slow_touch(
    two_back: &Bar,
    two_back_ind: &Indicators,
    current: &Bar,
    prev_ind: &Indicators,
) -> bool {
    two_back.close <= two_back_ind.ema_slow && current.close > prev_ind.ema_slow
}
