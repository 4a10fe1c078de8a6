//! Core domain types and logic.

pub mod ohlcv;
pub mod bar;
pub mod position;
pub mod confirmation;
pub mod signal;
pub mod exit;
pub mod backtest;
pub mod indicator;
pub mod indicator_helpers;
pub mod strategy;
pub mod universe;
pub mod config_validation;
pub mod error;
