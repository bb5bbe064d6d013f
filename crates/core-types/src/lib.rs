// In crates/core-types/src/lib.rs

pub mod error;
pub mod rows;
pub mod strategy;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use rows::{IndicatorRow, ScoredRow, SignalRow};
pub use strategy::StrategyConfig;
pub use types::{Bar, Interval, Lookback, SentimentScore, Series, Signal, Symbol};
