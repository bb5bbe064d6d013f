// In crates/backtester/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Backtest horizon must be at least one bar")]
    InvalidHorizon,
}

pub type Result<T> = std::result::Result<T, Error>;
