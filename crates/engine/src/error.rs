// In crates/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Provider error: {0}")]
    Provider(#[from] api_client::Error),

    #[error("Strategy error: {0}")]
    Strategy(#[from] strategies::Error),

    #[error("Backtest error: {0}")]
    Backtest(#[from] backtester::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
