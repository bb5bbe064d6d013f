// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Bar {index} is not strictly after the previous bar")]
    UnorderedTimestamps { index: usize },

    #[error("Bar {index} has a non-finite {field} value")]
    NonFiniteValue { index: usize, field: &'static str },

    #[error("Bar {index} has a negative volume")]
    NegativeVolume { index: usize },

    #[error("Unknown interval: {0}")]
    UnknownInterval(String),

    #[error("Invalid lookback '{0}': expected a positive number of days such as '7d'")]
    InvalidLookback(String),

    #[error("Invalid sentiment score {0}: expected -1, 0 or 1")]
    InvalidSentimentScore(i8),
}

pub type Result<T> = std::result::Result<T, Error>;
