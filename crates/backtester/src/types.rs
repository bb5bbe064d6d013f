// In crates/backtester/src/types.rs

use core_types::ScoredRow;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BacktestSettings {
    /// How many bars ahead a signal is judged against.
    pub horizon: usize,
    /// Score the sentiment-adjusted signals (true) or the bare rule output (false).
    pub include_sentiment: bool,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            horizon: 2,
            include_sentiment: true,
        }
    }
}

/// Summary of how often past signals called the direction correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct AccuracyReport {
    pub horizon: usize,
    pub scored_rows: usize,
    pub correct_rows: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub hold_signals: usize,
    /// Percentage of correct rows rounded to 2 dp; `None` when nothing could be scored.
    pub accuracy: Option<Decimal>,
}

impl AccuracyReport {
    /// The accuracy percentage, reading an empty window as 0.
    pub fn percentage(&self) -> Decimal {
        self.accuracy.unwrap_or(Decimal::ZERO)
    }

    pub fn has_data(&self) -> bool {
        self.accuracy.is_some()
    }
}

/// The scored rows together with their summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestResult {
    pub scored: Vec<ScoredRow>,
    pub report: AccuracyReport,
}
