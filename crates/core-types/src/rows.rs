// In crates/core-types/src/rows.rs

use crate::types::{Bar, Signal};
use serde::Serialize;

/// A bar augmented with its derived indicator values.
///
/// `None` marks an indicator that is still inside its warm-up period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorRow {
    #[serde(flatten)]
    pub bar: Bar,
    pub rsi: Option<f64>,
    pub macd_diff: Option<f64>,
    /// The trend EMA (20 periods by default).
    pub ema: Option<f64>,
    /// `close > ema`, or `false` while the EMA is undefined.
    pub above_ema: bool,
}

/// An indicator row with the signal assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalRow {
    #[serde(flatten)]
    pub indicators: IndicatorRow,
    pub signal: Signal,
}

impl SignalRow {
    pub fn close(&self) -> f64 {
        self.indicators.bar.close
    }
}

/// A signal row that has been judged against the close `horizon` bars later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredRow {
    #[serde(flatten)]
    pub row: SignalRow,
    pub future_close: f64,
    pub correct: bool,
}
