// In crates/strategies/src/indicators.rs

use crate::error::{Error, Result};
use crate::types::IndicatorSettings;
use core_types::{IndicatorRow, Series};
use ta::indicators::ExponentialMovingAverage as Ema;
use ta::Next;

/// Computes RSI, MACD histogram and the trend EMA over the close prices of a series.
///
/// The engine holds unfed indicator prototypes and clones them for every
/// computation, so `compute` is a pure function of its input.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    settings: IndicatorSettings,
    macd_fast: Ema,
    macd_slow: Ema,
    macd_signal: Ema,
    trend: Ema,
}

impl IndicatorEngine {
    pub fn new(settings: IndicatorSettings) -> Result<Self> {
        settings.validate()?;

        let ema = |period: u32| {
            Ema::new(period as usize).map_err(|e| {
                Error::InvalidSettings(format!("invalid EMA period {period}: {e:?}"))
            })
        };

        Ok(Self {
            macd_fast: ema(settings.macd_fast)?,
            macd_slow: ema(settings.macd_slow)?,
            macd_signal: ema(settings.macd_signal)?,
            trend: ema(settings.ema_period)?,
            settings,
        })
    }

    pub fn settings(&self) -> &IndicatorSettings {
        &self.settings
    }

    /// Produces exactly one `IndicatorRow` per bar, in order.
    ///
    /// Series that are too short for a warm-up simply leave the affected
    /// indicator undefined; this never fails.
    pub fn compute(&self, series: &Series) -> Vec<IndicatorRow> {
        let closes = series.closes();
        let rsi = self.rsi(&closes);
        let macd_diff = self.macd_diff(&closes);
        let ema = warmed_ema(&self.trend, self.settings.ema_period as usize, &closes);

        series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| IndicatorRow {
                bar: *bar,
                rsi: rsi[i],
                macd_diff: macd_diff[i],
                ema: ema[i],
                above_ema: ema[i].is_some_and(|e| bar.close > e),
            })
            .collect()
    }

    /// Relative strength index with Wilder smoothing; defined once `rsi_period` price changes exist.
    ///
    /// Both averages start as the simple mean of the first `rsi_period`
    /// changes, then follow `avg = (prev * (n - 1) + current) / n`.
    fn rsi(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let period = self.settings.rsi_period as usize;
        let mut values = vec![None; closes.len()];
        if closes.len() <= period {
            return values;
        }

        let n = period as f64;
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;

        for i in 1..closes.len() {
            let change = closes[i] - closes[i - 1];
            let (gain, loss) = (change.max(0.0), (-change).max(0.0));

            if i <= period {
                avg_gain += gain / n;
                avg_loss += loss / n;
            } else {
                avg_gain = (avg_gain * (n - 1.0) + gain) / n;
                avg_loss = (avg_loss * (n - 1.0) + loss) / n;
            }

            if i >= period {
                values[i] = Some(rsi_value(avg_gain, avg_loss));
            }
        }
        values
    }

    /// MACD line minus its signal line.
    fn macd_diff(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let fast = warmed_ema(&self.macd_fast, self.settings.macd_fast as usize, closes);
        let slow = warmed_ema(&self.macd_slow, self.settings.macd_slow as usize, closes);
        let signal_period = self.settings.macd_signal as usize;

        // The signal line starts on the first defined MACD value.
        let mut signal = self.macd_signal.clone();
        let mut seen = 0usize;

        fast.iter()
            .zip(slow.iter())
            .map(|(fast, slow)| match (fast, slow) {
                (Some(fast), Some(slow)) => {
                    let macd = fast - slow;
                    let signal_line = signal.next(macd);
                    seen += 1;
                    (seen >= signal_period).then_some(macd - signal_line)
                }
                _ => None,
            })
            .collect()
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// Runs a fresh copy of `proto` over `values`, masking the first `period - 1` outputs.
fn warmed_ema(proto: &Ema, period: usize, values: &[f64]) -> Vec<Option<f64>> {
    let mut ema = proto.clone();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let value = ema.next(*v);
            (i + 1 >= period).then_some(value)
        })
        .collect()
}
