// In crates/core-types/src/types.rs

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An instrument identifier as understood by the data provider (e.g., "^NSEBANK").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The sampling interval of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "60m", alias = "1h")]
    SixtyMinutes,
}

impl Interval {
    /// All supported intervals, shortest first.
    pub const ALL: [Interval; 3] = [
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::SixtyMinutes,
    ];

    /// The interval code sent to the data provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::SixtyMinutes => "60m",
        }
    }

    /// The human-facing label shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::SixtyMinutes => "1h",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "5m" => Ok(Interval::FiveMinutes),
            "15m" => Ok(Interval::FifteenMinutes),
            "60m" | "1h" => Ok(Interval::SixtyMinutes),
            other => Err(Error::UnknownInterval(other.to_string())),
        }
    }
}

/// How far back the provider should look when fetching a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Lookback {
    days: u32,
}

impl Lookback {
    pub fn days(days: u32) -> Result<Self> {
        if days == 0 {
            return Err(Error::InvalidLookback("0d".to_string()));
        }
        Ok(Self { days })
    }

    pub fn num_days(&self) -> u32 {
        self.days
    }

    /// The `range` query value understood by the chart endpoint.
    pub fn as_range(&self) -> String {
        format!("{}d", self.days)
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self { days: 7 }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.days)
    }
}

impl FromStr for Lookback {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let days = s
            .trim()
            .strip_suffix('d')
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| Error::InvalidLookback(s.to_string()))?;
        Lookback::days(days).map_err(|_| Error::InvalidLookback(s.to_string()))
    }
}

impl TryFrom<String> for Lookback {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Lookback> for String {
    fn from(value: Lookback) -> Self {
        value.to_string()
    }
}

/// One OHLCV row of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// An ordered, validated sequence of bars for one instrument and interval.
///
/// A `Series` can only be built through [`Series::new`], so every instance
/// holds strictly increasing timestamps and finite prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    symbol: Symbol,
    interval: Interval,
    bars: Vec<Bar>,
}

impl Series {
    pub fn new(symbol: Symbol, interval: Interval, bars: Vec<Bar>) -> Result<Self> {
        for (index, bar) in bars.iter().enumerate() {
            for (field, value) in [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
                ("volume", bar.volume),
            ] {
                if !value.is_finite() {
                    return Err(Error::NonFiniteValue { index, field });
                }
            }
            if bar.volume < 0.0 {
                return Err(Error::NegativeVolume { index });
            }
            if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
                return Err(Error::UnorderedTimestamps { index });
            }
        }

        Ok(Self { symbol, interval, bars })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// The categorical decision produced for a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
            Signal::Hold => "Hold",
        };
        f.write_str(s)
    }
}

/// A run-wide market sentiment reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "i8", into = "i8")]
pub enum SentimentScore {
    Bearish,
    #[default]
    Neutral,
    Bullish,
}

impl SentimentScore {
    pub fn value(&self) -> i8 {
        match self {
            SentimentScore::Bearish => -1,
            SentimentScore::Neutral => 0,
            SentimentScore::Bullish => 1,
        }
    }
}

impl TryFrom<i8> for SentimentScore {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            -1 => Ok(SentimentScore::Bearish),
            0 => Ok(SentimentScore::Neutral),
            1 => Ok(SentimentScore::Bullish),
            other => Err(Error::InvalidSentimentScore(other)),
        }
    }
}

impl From<SentimentScore> for i8 {
    fn from(value: SentimentScore) -> Self {
        value.value()
    }
}

impl fmt::Display for SentimentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentScore::Bearish => "Bearish",
            SentimentScore::Neutral => "Neutral",
            SentimentScore::Bullish => "Bullish",
        };
        f.write_str(s)
    }
}
