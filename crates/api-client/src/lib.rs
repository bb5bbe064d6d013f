// In crates/api-client/src/lib.rs

use async_trait::async_trait;
use core_types::{Interval, Lookback, Series, Symbol};

pub mod cache;
pub mod error;
pub mod types;
pub mod yahoo;

// Re-export public types
pub use cache::CachedProvider;
pub use error::{Error, Result};
pub use yahoo::{YahooClient, parse_chart};

/// A source of historical OHLCV bars.
///
/// Implementors must return a validated `Series` or an error; they never
/// return a series with zero bars.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// A short name used in logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self, symbol: &Symbol, lookback: Lookback, interval: Interval) -> Result<Series>;
}
