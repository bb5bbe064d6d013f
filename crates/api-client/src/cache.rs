// In crates/api-client/src/cache.rs

use crate::error::Result;
use crate::SeriesProvider;
use async_trait::async_trait;
use core_types::{Interval, Lookback, Series, Symbol};
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    symbol: Symbol,
    lookback: Lookback,
    interval: Interval,
}

struct CacheEntry {
    series: Series,
    expires_at: Instant,
}

/// Wraps a provider and reuses each fetched series until its TTL runs out.
///
/// Failed fetches are never stored, so the next call retries the provider.
pub struct CachedProvider<P> {
    inner: P,
    entries: DashMap<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl<P: SeriesProvider> CachedProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Drops every cached series.
    pub fn invalidate(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, key: &CacheKey) -> Option<Series> {
        let entry = self.entries.get(key)?;
        if entry.expires_at > Instant::now() {
            Some(entry.series.clone())
        } else {
            drop(entry);
            self.entries.remove(key);
            None
        }
    }
}

#[async_trait]
impl<P: SeriesProvider> SeriesProvider for CachedProvider<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn fetch(&self, symbol: &Symbol, lookback: Lookback, interval: Interval) -> Result<Series> {
        let key = CacheKey {
            symbol: symbol.clone(),
            lookback,
            interval,
        };

        if let Some(series) = self.lookup(&key) {
            tracing::debug!(symbol = %symbol, %interval, "Serving series from cache.");
            return Ok(series);
        }

        let series = self.inner.fetch(symbol, lookback, interval).await?;
        tracing::debug!(symbol = %symbol, %interval, bars = series.len(), "Caching fetched series.");
        self.entries.insert(
            key,
            CacheEntry {
                series: series.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );

        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{TimeZone, Utc};
    use core_types::Bar;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts fetches; fails while `fail` is set.
    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingProvider {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl SeriesProvider for CountingProvider {
        fn name(&self) -> &'static str {
            "Counting"
        }

        async fn fetch(&self, symbol: &Symbol, _lookback: Lookback, interval: Interval) -> Result<Series> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::EmptySeries {
                    symbol: symbol.clone(),
                    interval,
                });
            }
            let bar = Bar {
                timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                open: 1.0,
                high: 1.0,
                low: 1.0,
                close: 1.0,
                volume: 0.0,
            };
            Ok(Series::new(symbol.clone(), interval, vec![bar])?)
        }
    }

    fn symbol() -> Symbol {
        Symbol("^NSEBANK".into())
    }

    #[tokio::test]
    async fn test_second_fetch_is_served_from_cache() {
        let cache = CachedProvider::new(CountingProvider::new(false), Duration::from_secs(60));

        let first = cache.fetch(&symbol(), Lookback::default(), Interval::FiveMinutes).await.unwrap();
        let second = cache.fetch(&symbol(), Lookback::default(), Interval::FiveMinutes).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_keys_are_per_interval() {
        let cache = CachedProvider::new(CountingProvider::new(false), Duration::from_secs(60));

        for interval in Interval::ALL {
            cache.fetch(&symbol(), Lookback::default(), interval).await.unwrap();
        }

        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.len(), 3);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let cache = CachedProvider::new(CountingProvider::new(false), Duration::from_millis(10));

        cache.fetch(&symbol(), Lookback::default(), Interval::FiveMinutes).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        cache.fetch(&symbol(), Lookback::default(), Interval::FiveMinutes).await.unwrap();

        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache = CachedProvider::new(CountingProvider::new(true), Duration::from_secs(60));

        assert!(cache.fetch(&symbol(), Lookback::default(), Interval::FiveMinutes).await.is_err());
        assert!(cache.fetch(&symbol(), Lookback::default(), Interval::FiveMinutes).await.is_err());

        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_clears_entries() {
        let cache = CachedProvider::new(CountingProvider::new(false), Duration::from_secs(60));
        cache.fetch(&symbol(), Lookback::default(), Interval::FiveMinutes).await.unwrap();

        cache.invalidate();

        assert!(cache.is_empty());
        cache.fetch(&symbol(), Lookback::default(), Interval::FiveMinutes).await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }
}
