// In crates/api-client/src/error.rs

use core_types::{Interval, Symbol};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("API error: code {code}, msg: {msg}")]
    ApiError { code: String, msg: String },
    #[error("Provider returned no bars for {symbol} ({interval})")]
    EmptySeries { symbol: Symbol, interval: Interval },
    #[error("Provider returned an invalid series: {0}")]
    InvalidSeries(#[from] core_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
