//! Exit signal evaluator.
//!
//! A long position is closed on a close at or below the bar's own fast EMA.
//! The written rule asks for a decisive close below *both* EMAs; the trading
//! behavior this engine reproduces exits on the fast EMA alone, and that is
//! what is implemented.

use crate::domain::bar::Bar;
use crate::domain::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    Exit,
    NoAction,
}

pub fn evaluate_exit(bar: &Bar, position: &Position) -> ExitSignal {
    if !position.is_long() {
        return ExitSignal::NoAction;
    }
    match bar.ema_fast {
        Some(fast) if bar.close <= fast => ExitSignal::Exit,
        _ => ExitSignal::NoAction,
    }
}
