//! Position state and trade events.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    Flat,
    Long,
}

impl fmt::Display for PositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionStatus::Flat => write!(f, "FLAT"),
            PositionStatus::Long => write!(f, "LONG"),
        }
    }
}

/// The single position tracked over a run. `entry_bar_index` is `Some` exactly
/// while the position is long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    entry_bar_index: Option<usize>,
}

impl Position {
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn long(entry_bar_index: usize) -> Self {
        Self {
            entry_bar_index: Some(entry_bar_index),
        }
    }

    pub fn status(&self) -> PositionStatus {
        match self.entry_bar_index {
            Some(_) => PositionStatus::Long,
            None => PositionStatus::Flat,
        }
    }

    pub fn is_long(&self) -> bool {
        self.entry_bar_index.is_some()
    }

    pub fn is_flat(&self) -> bool {
        self.entry_bar_index.is_none()
    }

    pub fn entry_bar_index(&self) -> Option<usize> {
        self.entry_bar_index
    }

    pub(crate) fn open(&mut self, bar_index: usize) {
        self.entry_bar_index = Some(bar_index);
    }

    pub(crate) fn close(&mut self) {
        self.entry_bar_index = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeKind {
    Entry,
    Exit,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeKind::Entry => write!(f, "ENTRY"),
            TradeKind::Exit => write!(f, "EXIT"),
        }
    }
}

/// One position transition. `price` is the signal bar's close.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeEvent {
    pub kind: TradeKind,
    pub bar_index: usize,
    pub date: NaiveDate,
    pub price: f64,
}
