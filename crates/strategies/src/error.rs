// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid strategy settings: {0}")]
    InvalidSettings(String),

    #[error("Attempted to create unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Attempted to create unknown sentiment source: {0}")]
    UnknownSentimentSource(String),

    #[error("Failed to parse strategy params: {0}")]
    InvalidParams(#[from] toml::de::Error),

    #[error(transparent)]
    Core(#[from] core_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
