//! Position state machine and the per-bar event loop.
//!
//! [`SignalEngine`] owns the run's single [`Position`] and its append-only
//! trade log. Each [`SignalEngine::step`] sees only the bars up to and
//! including the one being decided, so no decision can depend on later data.

use crate::domain::bar::{Bar, validate_bar};
use crate::domain::error::PullbackError;
use crate::domain::exit::{ExitSignal, evaluate_exit};
use crate::domain::position::{Position, PositionStatus, TradeEvent, TradeKind};
use crate::domain::signal::{EntrySignal, evaluate_entry};
use chrono::NaiveDate;

/// Date range of a run. Bars outside it are never fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktestConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct SignalEngine {
    position: Position,
    events: Vec<TradeEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub events: Vec<TradeEvent>,
    pub position: Position,
    pub bars_processed: usize,
}

impl BacktestResult {
    pub fn final_status(&self) -> PositionStatus {
        self.position.status()
    }

    pub fn entries(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == TradeKind::Entry)
            .count()
    }

    pub fn exits(&self) -> usize {
        self.events.iter().filter(|e| e.kind == TradeKind::Exit).count()
    }
}

impl SignalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn events(&self) -> &[TradeEvent] {
        &self.events
    }

    /// Decide on the last bar of `window`, which sits at `bar_index` in the
    /// stream. Emits at most one event.
    ///
    /// A long position consults only the exit rule; closing ends the bar, so
    /// there is no same-bar re-entry. A flat position consults only the entry
    /// rule.
    pub fn step(&mut self, bar_index: usize, window: &[Bar]) -> Option<TradeEvent> {
        let bar = window.last()?;

        let kind = if self.position.is_long() {
            match evaluate_exit(bar, &self.position) {
                ExitSignal::Exit => {
                    self.position.close();
                    TradeKind::Exit
                }
                ExitSignal::NoAction => return None,
            }
        } else {
            match evaluate_entry(window, &self.position) {
                EntrySignal::Enter => {
                    self.position.open(bar_index);
                    TradeKind::Entry
                }
                EntrySignal::NoAction => return None,
            }
        };

        let event = TradeEvent {
            kind,
            bar_index,
            date: bar.date,
            price: bar.close,
        };
        self.events.push(event.clone());
        Some(event)
    }

    /// Feed every bar of `bars` in order, validating each as it arrives.
    ///
    /// A malformed bar aborts the run. An open position at the end of the
    /// stream is left open.
    pub fn run(mut self, bars: &[Bar]) -> Result<BacktestResult, PullbackError> {
        for (i, bar) in bars.iter().enumerate() {
            let previous = i.checked_sub(1).map(|p| &bars[p]);
            validate_bar(i, bar, previous)?;
            self.step(i, &bars[..=i]);
        }
        Ok(BacktestResult {
            events: self.events,
            position: self.position,
            bars_processed: bars.len(),
        })
    }
}

/// Run a fresh engine over `bars`.
pub fn run_backtest(bars: &[Bar]) -> Result<BacktestResult, PullbackError> {
    SignalEngine::new().run(bars)
}
