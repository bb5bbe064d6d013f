// In crates/strategies/src/lib.rs

use core_types::{IndicatorRow, Signal, SignalRow};

pub mod error;
pub mod factory;
pub mod indicators;
pub mod rsi_macd_ema;
pub mod sentiment;
pub mod types;

pub use error::{Error, Result};
pub use indicators::IndicatorEngine;
pub use sentiment::{apply_sentiment, ConstantSentiment, SentimentSource};

/// The universal interface for a signal rule.
///
/// A strategy maps one bar's indicator values to a `Signal`. It holds no
/// per-bar state, so assessing the same row twice always yields the same
/// answer.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    fn assess(&self, row: &IndicatorRow) -> Signal;

    /// Labels every row of an indicator table, preserving order.
    fn label(&self, rows: &[IndicatorRow]) -> Vec<SignalRow> {
        rows.iter()
            .map(|row| SignalRow {
                indicators: *row,
                signal: self.assess(row),
            })
            .collect()
    }
}
