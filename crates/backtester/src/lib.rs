pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{AccuracyReport, BacktestResult, BacktestSettings};

use core_types::{ScoredRow, Signal, SignalRow};
use rust_decimal::Decimal;

/// Judges each labelled row against the close a fixed number of bars later.
#[derive(Debug, Clone)]
pub struct Backtester {
    horizon: usize,
}

impl Backtester {
    pub fn new(horizon: usize) -> Result<Self> {
        if horizon == 0 {
            return Err(Error::InvalidHorizon);
        }
        Ok(Self { horizon })
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Scores a labelled table.
    ///
    /// The last `horizon` rows have no future close and are dropped before
    /// scoring. A `Hold` row makes no directional claim and is never correct.
    pub fn run(&self, rows: &[SignalRow]) -> BacktestResult {
        let scorable = rows.len().saturating_sub(self.horizon);

        // --- 1. Score every row that has a future close ---
        let scored: Vec<ScoredRow> = rows[..scorable]
            .iter()
            .zip(rows.iter().skip(self.horizon))
            .map(|(row, future)| {
                let close = row.close();
                let future_close = future.close();
                let correct = match row.signal {
                    Signal::Buy => future_close > close,
                    Signal::Sell => future_close < close,
                    Signal::Hold => false,
                };
                ScoredRow { row: *row, future_close, correct }
            })
            .collect();

        // --- 2. Summarise ---
        let correct_rows = scored.iter().filter(|s| s.correct).count();
        let count = |signal: Signal| scored.iter().filter(|s| s.row.signal == signal).count();

        let accuracy = (!scored.is_empty()).then(|| {
            (Decimal::from(correct_rows) * Decimal::ONE_HUNDRED / Decimal::from(scored.len()))
                .round_dp(2)
        });

        let report = AccuracyReport {
            horizon: self.horizon,
            scored_rows: scored.len(),
            correct_rows,
            buy_signals: count(Signal::Buy),
            sell_signals: count(Signal::Sell),
            hold_signals: count(Signal::Hold),
            accuracy,
        };

        tracing::debug!(
            horizon = self.horizon,
            scored = report.scored_rows,
            correct = report.correct_rows,
            accuracy = ?report.accuracy,
            "Backtest finished."
        );

        BacktestResult { scored, report }
    }
}

impl Default for Backtester {
    fn default() -> Self {
        Self { horizon: BacktestSettings::default().horizon }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use core_types::{Bar, IndicatorRow};
    use rust_decimal_macros::dec;

    fn labelled(closes: &[f64], signals: &[Signal]) -> Vec<SignalRow> {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 9, 15, 0).unwrap();
        closes
            .iter()
            .zip(signals)
            .enumerate()
            .map(|(i, (close, signal))| SignalRow {
                indicators: IndicatorRow {
                    bar: Bar {
                        timestamp: start + Duration::minutes(5 * i as i64),
                        open: *close,
                        high: *close,
                        low: *close,
                        close: *close,
                        volume: 0.0,
                    },
                    rsi: None,
                    macd_diff: None,
                    ema: None,
                    above_ema: false,
                },
                signal: *signal,
            })
            .collect()
    }

    #[test]
    fn test_five_bar_scenario_scores_zero() {
        use core_types::Signal::*;
        let rows = labelled(&[100.0, 102.0, 99.0, 105.0, 101.0], &[Buy, Hold, Sell, Buy, Sell]);
        let result = Backtester::default().run(&rows);

        assert_eq!(result.scored.len(), 3);
        let futures: Vec<f64> = result.scored.iter().map(|s| s.future_close).collect();
        assert_eq!(futures, vec![99.0, 105.0, 101.0]);
        assert!(result.scored.iter().all(|s| !s.correct));
        assert_eq!(result.report.accuracy, Some(dec!(0.00)));
    }

    #[test]
    fn test_all_matching_directions_score_hundred() {
        use core_types::Signal::*;
        let rows = labelled(&[100.0, 100.0, 101.0, 99.0, 102.0, 98.0], &[Buy, Sell, Buy, Sell, Hold, Hold]);
        let report = Backtester::default().run(&rows).report;
        assert_eq!(report.scored_rows, 4);
        assert_eq!(report.accuracy, Some(dec!(100)));
    }

    #[test]
    fn test_hold_is_never_correct() {
        let rows = labelled(&[100.0, 100.0, 110.0, 90.0], &[Signal::Hold; 4]);
        let report = Backtester::default().run(&rows).report;
        assert_eq!(report.correct_rows, 0);
        assert_eq!(report.hold_signals, 2);
        assert_eq!(report.percentage(), Decimal::ZERO);
    }

    #[test]
    fn test_flat_future_is_not_correct() {
        use core_types::Signal::*;
        let rows = labelled(&[100.0, 100.0, 100.0, 100.0], &[Buy, Sell, Buy, Sell]);
        let report = Backtester::default().run(&rows).report;
        assert_eq!(report.accuracy, Some(dec!(0)));
    }

    #[test]
    fn test_accuracy_is_rounded_to_two_places() {
        use core_types::Signal::*;
        // Rows 0 and 1 are correct, row 2 is not: 2/3 = 66.666...
        let rows = labelled(&[100.0, 100.0, 101.0, 105.0, 95.0], &[Buy, Buy, Buy, Hold, Hold]);
        let report = Backtester::default().run(&rows).report;
        assert_eq!(report.scored_rows, 3);
        assert_eq!(report.correct_rows, 2);
        assert_eq!(report.accuracy, Some(dec!(66.67)));
        assert_eq!(report.buy_signals, 3);
    }

    #[test]
    fn test_short_window_has_no_data() {
        for len in 0..=2 {
            let closes = vec![100.0; len];
            let signals = vec![Signal::Buy; len];
            let result = Backtester::default().run(&labelled(&closes, &signals));
            assert!(result.scored.is_empty());
            assert_eq!(result.report.accuracy, None);
            assert!(!result.report.has_data());
            assert_eq!(result.report.percentage(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_custom_horizon() {
        use core_types::Signal::*;
        let rows = labelled(&[100.0, 90.0, 110.0], &[Buy, Buy, Buy]);
        let result = Backtester::new(1).unwrap().run(&rows);
        assert_eq!(result.scored.len(), 2);
        assert!(!result.scored[0].correct);
        assert!(result.scored[1].correct);
        assert_eq!(result.report.accuracy, Some(dec!(50)));
    }

    #[test]
    fn test_zero_horizon_is_rejected() {
        assert!(matches!(Backtester::new(0), Err(Error::InvalidHorizon)));
    }

    #[test]
    fn test_accuracy_within_bounds() {
        use core_types::Signal::*;
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + ((i * 7) % 11) as f64).collect();
        let signals: Vec<Signal> = (0..50).map(|i| [Buy, Sell, Hold][i % 3]).collect();
        let pct = Backtester::default().run(&labelled(&closes, &signals)).report.percentage();
        assert!(pct >= Decimal::ZERO && pct <= Decimal::ONE_HUNDRED);
    }
}
