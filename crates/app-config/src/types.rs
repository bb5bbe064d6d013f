// In crates/app-config/src/types.rs

use serde::Deserialize;

use backtester::BacktestSettings;
use core_types::{Interval, Lookback, StrategyConfig};
use strategies::types::{IndicatorSettings, SentimentSettings};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub server: ServerSettings,
    /// Settings for the market data provider.
    #[serde(default)]
    pub provider: ProviderSettings,
    /// What the dashboard shows.
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub sentiment: SentimentSettings,
    #[serde(default)]
    pub backtest: BacktestSettings,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            log_level: "info".into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ProviderSettings {
    /// Base URL of the chart API.
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// How long a fetched series is reused before refetching.
    pub cache_ttl_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".into(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
            cache_ttl_secs: 3600,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DashboardSettings {
    pub symbol: String,
    pub title: String,
    pub lookback: Lookback,
    pub intervals: Vec<Interval>,
    /// Number of most recent rows shown per interval.
    pub table_rows: usize,
    /// Offset from UTC, in minutes, used when rendering bar times (IST is 330).
    pub utc_offset_minutes: i32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            symbol: "^NSEBANK".into(),
            title: "Bank Nifty Signal Dashboard".into(),
            lookback: Lookback::default(),
            intervals: Interval::ALL.to_vec(),
            table_rows: 10,
            utc_offset_minutes: 330,
        }
    }
}
