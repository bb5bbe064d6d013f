// In crates/strategies/src/rsi_macd_ema.rs

use crate::types::RsiMacdEmaSettings;
use crate::Strategy;
use core_types::{IndicatorRow, Signal};

/// Confluence rule over RSI, MACD histogram and the trend EMA.
///
/// - Buy when RSI is oversold, the MACD histogram is positive and price is above the EMA.
/// - Sell when RSI is overbought, the MACD histogram is negative and price is below the EMA.
/// - Hold otherwise, including whenever RSI or MACD is still warming up.
#[derive(Debug, Clone)]
pub struct RsiMacdEma {
    settings: RsiMacdEmaSettings,
}

impl RsiMacdEma {
    pub fn new(settings: RsiMacdEmaSettings) -> Self {
        Self { settings }
    }
}

impl Default for RsiMacdEma {
    fn default() -> Self {
        Self::new(RsiMacdEmaSettings::default())
    }
}

impl Strategy for RsiMacdEma {
    fn name(&self) -> &'static str {
        "RsiMacdEma"
    }

    fn assess(&self, row: &IndicatorRow) -> Signal {
        let oversold = matches!(row.rsi, Some(rsi) if rsi < self.settings.rsi_oversold);
        let overbought = matches!(row.rsi, Some(rsi) if rsi > self.settings.rsi_overbought);
        let momentum_up = matches!(row.macd_diff, Some(diff) if diff > 0.0);
        let momentum_down = matches!(row.macd_diff, Some(diff) if diff < 0.0);

        // Buy is checked first.
        if oversold && momentum_up && row.above_ema {
            Signal::Buy
        } else if overbought && momentum_down && !row.above_ema {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::Bar;

    fn row(rsi: Option<f64>, macd_diff: Option<f64>, above_ema: bool) -> IndicatorRow {
        IndicatorRow {
            bar: Bar {
                timestamp: Utc::now(),
                open: 100.0,
                high: 100.0,
                low: 100.0,
                close: 100.0,
                volume: 0.0,
            },
            rsi,
            macd_diff,
            ema: Some(100.0),
            above_ema,
        }
    }

    #[test]
    fn test_buy_condition() {
        let strategy = RsiMacdEma::default();
        assert_eq!(strategy.assess(&row(Some(25.0), Some(0.5), true)), Signal::Buy);
    }

    #[test]
    fn test_sell_condition() {
        let strategy = RsiMacdEma::default();
        assert_eq!(strategy.assess(&row(Some(75.0), Some(-0.2), false)), Signal::Sell);
    }

    #[test]
    fn test_neutral_rsi_holds() {
        let strategy = RsiMacdEma::default();
        for (macd, above) in [(Some(1.0), true), (Some(-1.0), false), (None, true)] {
            assert_eq!(strategy.assess(&row(Some(50.0), macd, above)), Signal::Hold);
        }
    }

    #[test]
    fn test_undefined_indicators_never_fire() {
        let strategy = RsiMacdEma::default();
        assert_eq!(strategy.assess(&row(None, Some(0.5), true)), Signal::Hold);
        assert_eq!(strategy.assess(&row(Some(25.0), None, true)), Signal::Hold);
        assert_eq!(strategy.assess(&row(None, Some(-0.5), false)), Signal::Hold);
        assert_eq!(strategy.assess(&row(Some(75.0), None, false)), Signal::Hold);
    }

    #[test]
    fn test_each_condition_is_required() {
        let strategy = RsiMacdEma::default();
        // Oversold but price below the EMA.
        assert_eq!(strategy.assess(&row(Some(25.0), Some(0.5), false)), Signal::Hold);
        // Overbought but price above the EMA.
        assert_eq!(strategy.assess(&row(Some(75.0), Some(-0.2), true)), Signal::Hold);
        // Zero histogram is neither positive nor negative.
        assert_eq!(strategy.assess(&row(Some(25.0), Some(0.0), true)), Signal::Hold);
        assert_eq!(strategy.assess(&row(Some(75.0), Some(0.0), false)), Signal::Hold);
        // Thresholds are strict.
        assert_eq!(strategy.assess(&row(Some(30.0), Some(0.5), true)), Signal::Hold);
        assert_eq!(strategy.assess(&row(Some(70.0), Some(-0.5), false)), Signal::Hold);
    }

    #[test]
    fn test_nan_inputs_hold() {
        let strategy = RsiMacdEma::default();
        assert_eq!(strategy.assess(&row(Some(f64::NAN), Some(0.5), true)), Signal::Hold);
        assert_eq!(strategy.assess(&row(Some(25.0), Some(f64::NAN), true)), Signal::Hold);
    }

    #[test]
    fn test_overlapping_thresholds_prefer_buy() {
        // With crossed thresholds a row can satisfy both RSI conditions.
        let strategy = RsiMacdEma::new(RsiMacdEmaSettings {
            rsi_oversold: 80.0,
            rsi_overbought: 20.0,
        });
        assert_eq!(strategy.assess(&row(Some(50.0), Some(0.5), true)), Signal::Buy);
    }

    #[test]
    fn test_assess_is_idempotent() {
        let strategy = RsiMacdEma::default();
        let r = row(Some(28.0), Some(0.1), true);
        assert_eq!(strategy.assess(&r), strategy.assess(&r));
    }

    #[test]
    fn test_label_preserves_order_and_length() {
        let strategy = RsiMacdEma::default();
        let rows = vec![
            row(Some(25.0), Some(0.5), true),
            row(Some(50.0), Some(0.5), true),
            row(Some(75.0), Some(-0.2), false),
        ];
        let labelled = strategy.label(&rows);
        let signals: Vec<Signal> = labelled.iter().map(|r| r.signal).collect();
        assert_eq!(signals, vec![Signal::Buy, Signal::Hold, Signal::Sell]);
        assert_eq!(labelled[1].indicators, rows[1]);
    }
}
