// In crates/strategies/src/types.rs

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Lookback periods for the indicator engine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IndicatorSettings {
    pub rsi_period: u32,
    pub macd_fast: u32,
    pub macd_slow: u32,
    pub macd_signal: u32,
    pub ema_period: u32,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            ema_period: 20,
        }
    }
}

impl IndicatorSettings {
    /// Longest lookback any indicator accepts.
    pub const MAX_PERIOD: u32 = 10_000;

    pub fn validate(&self) -> Result<()> {
        if self.rsi_period < 1
            || self.macd_fast < 1
            || self.macd_slow < 1
            || self.macd_signal < 1
            || self.ema_period < 1
        {
            return Err(Error::InvalidSettings(
                "indicator periods must be greater than 0".into(),
            ));
        }
        let longest = [
            self.rsi_period,
            self.macd_fast,
            self.macd_slow,
            self.macd_signal,
            self.ema_period,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        if longest > Self::MAX_PERIOD {
            return Err(Error::InvalidSettings(format!(
                "indicator periods must not exceed {} (got {longest})",
                Self::MAX_PERIOD
            )));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(Error::InvalidSettings(format!(
                "macd_fast ({}) must be shorter than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        Ok(())
    }
}

/// Thresholds for the RSI/MACD/EMA confluence rule.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RsiMacdEmaSettings {
    #[serde(default = "default_oversold")]
    pub rsi_oversold: f64,
    #[serde(default = "default_overbought")]
    pub rsi_overbought: f64,
}

impl Default for RsiMacdEmaSettings {
    fn default() -> Self {
        Self {
            rsi_oversold: default_oversold(),
            rsi_overbought: default_overbought(),
        }
    }
}

fn default_oversold() -> f64 { 30.0 }
fn default_overbought() -> f64 { 70.0 }

/// Selects and parameterises the sentiment source.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SentimentSettings {
    pub source: String,
    /// Used by the `constant` source: 1 = bullish, -1 = bearish, 0 = neutral.
    pub score: i8,
}

impl Default for SentimentSettings {
    fn default() -> Self {
        Self {
            source: "constant".to_string(),
            score: 1,
        }
    }
}
