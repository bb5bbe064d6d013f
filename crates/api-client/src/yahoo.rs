// In crates/api-client/src/yahoo.rs

use crate::error::{Error, Result};
use crate::types::ChartResponse;
use crate::SeriesProvider;
use app_config::ProviderSettings;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use core_types::{Bar, Interval, Lookback, Series, Symbol};
use reqwest::Client;
use std::time::Duration;

/// HTTP client for the Yahoo Finance chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooClient {
    /// The persistent HTTP client.
    http_client: Client,
    /// The base URL, e.g. `https://query1.finance.yahoo.com`.
    base_url: String,
}

impl YahooClient {
    /// Constructs a new client from the provider settings.
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SeriesProvider for YahooClient {
    fn name(&self) -> &'static str {
        "YahooFinance"
    }

    /// Fetches OHLCV bars.
    ///
    /// This corresponds to the `GET /v8/finance/chart/{symbol}` endpoint.
    async fn fetch(&self, symbol: &Symbol, lookback: Lookback, interval: Interval) -> Result<Series> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol.0);
        let range = lookback.as_range();

        tracing::debug!(%url, %range, %interval, "Requesting chart data.");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("range", range.as_str()),
                ("interval", interval.as_str()),
                ("includePrePost", "false"),
            ])
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::RequestFailed)?;

        // Yahoo reports most failures as a JSON error object, even on 4xx responses.
        match serde_json::from_str::<ChartResponse>(&body) {
            Ok(chart) => parse_chart(chart, symbol, interval),
            Err(_) if !status.is_success() => Err(Error::ApiError {
                code: status.as_u16().to_string(),
                msg: body.chars().take(200).collect(),
            }),
            Err(e) => Err(Error::DeserializationFailed(e)),
        }
    }
}

/// Converts a chart body into a validated `Series`.
///
/// Bars with any missing price are dropped; a missing volume counts as zero.
/// A repeated timestamp keeps the latest bar, as the provider re-sends the
/// still-forming bar at the end of the array.
pub fn parse_chart(response: ChartResponse, symbol: &Symbol, interval: Interval) -> Result<Series> {
    if let Some(error) = response.chart.error {
        return Err(Error::ApiError {
            code: error.code,
            msg: error.description,
        });
    }

    let empty = || Error::EmptySeries {
        symbol: symbol.clone(),
        interval,
    };

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(empty)?;
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let mut bars: Vec<Bar> = Vec::with_capacity(timestamps.len());
    let mut dropped = 0usize;

    for (i, &ts) in timestamps.iter().enumerate() {
        let field = |column: &[Option<f64>]| column.get(i).copied().flatten();

        let (Some(open), Some(high), Some(low), Some(close), Some(timestamp)) = (
            field(&opens),
            field(&highs),
            field(&lows),
            field(&closes),
            Utc.timestamp_opt(ts, 0).single(),
        ) else {
            dropped += 1;
            continue;
        };

        let bar = Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume: field(&volumes).unwrap_or(0.0),
        };

        match bars.last_mut() {
            Some(last) if last.timestamp == timestamp => *last = bar,
            Some(last) if last.timestamp > timestamp => dropped += 1,
            _ => bars.push(bar),
        }
    }

    if dropped > 0 {
        tracing::debug!(symbol = %symbol, %interval, dropped, "Dropped incomplete bars.");
    }

    if bars.is_empty() {
        return Err(empty());
    }

    Ok(Series::new(symbol.clone(), interval, bars)?)
}
