// In crates/engine/src/lib.rs

pub mod error;
pub mod pipeline;
pub mod report;

pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineOutput};
pub use report::{DashboardSnapshot, IntervalPanel, IntervalReport, PanelOutcome, SentimentReading};

use api_client::SeriesProvider;
use app_config::{DashboardSettings, Settings};
use chrono::Utc;
use core_types::{Interval, SentimentScore, Symbol};
use std::sync::Arc;
use strategies::factory::create_sentiment_source;
use strategies::SentimentSource;

/// Runs the signal pipeline for every configured interval of one symbol.
pub struct Engine {
    provider: Arc<dyn SeriesProvider>,
    pipeline: Pipeline,
    sentiment: Box<dyn SentimentSource + Send + Sync>,
    dashboard: DashboardSettings,
}

impl Engine {
    pub fn new(
        provider: Arc<dyn SeriesProvider>,
        pipeline: Pipeline,
        sentiment: Box<dyn SentimentSource + Send + Sync>,
        dashboard: DashboardSettings,
    ) -> Self {
        Self {
            provider,
            pipeline,
            sentiment,
            dashboard,
        }
    }

    /// Builds the pipeline and sentiment source described by `settings`.
    pub fn from_settings(provider: Arc<dyn SeriesProvider>, settings: &Settings) -> Result<Self> {
        let pipeline = Pipeline::from_settings(settings)?;
        let sentiment = create_sentiment_source(&settings.sentiment)?;

        tracing::info!(
            provider = provider.name(),
            strategy = pipeline.strategy_name(),
            sentiment = sentiment.name(),
            symbol = %settings.dashboard.symbol,
            "Engine initialised."
        );

        Ok(Self::new(provider, pipeline, sentiment, settings.dashboard.clone()))
    }

    pub fn dashboard(&self) -> &DashboardSettings {
        &self.dashboard
    }

    pub fn symbol(&self) -> Symbol {
        Symbol(self.dashboard.symbol.clone())
    }

    /// Fetches and evaluates a single interval.
    pub async fn run_interval(&self, interval: Interval) -> Result<IntervalReport> {
        let score = self.sentiment.score();
        self.evaluate(interval, score).await
    }

    /// Evaluates every configured interval, in order.
    ///
    /// The sentiment is read once for the whole run. A failing interval is
    /// recorded in its own panel and does not stop the others.
    pub async fn run(&self) -> DashboardSnapshot {
        let score = self.sentiment.score();
        let mut panels = Vec::with_capacity(self.dashboard.intervals.len());

        for &interval in &self.dashboard.intervals {
            let outcome = match self.evaluate(interval, score).await {
                Ok(report) => PanelOutcome::Ready(report),
                Err(e) => {
                    tracing::warn!(%interval, error = %e, "Interval run failed.");
                    PanelOutcome::Failed { error: e.to_string() }
                }
            };
            panels.push(IntervalPanel {
                interval,
                label: interval.label(),
                outcome,
            });
        }

        DashboardSnapshot {
            symbol: self.symbol(),
            title: self.dashboard.title.clone(),
            sentiment: SentimentReading {
                source: self.sentiment.name().to_string(),
                score,
            },
            generated_at: Utc::now(),
            table_rows: self.dashboard.table_rows,
            panels,
        }
    }

    async fn evaluate(&self, interval: Interval, score: SentimentScore) -> Result<IntervalReport> {
        let symbol = self.symbol();
        let series = self
            .provider
            .fetch(&symbol, self.dashboard.lookback, interval)
            .await?;

        tracing::info!(symbol = %symbol, %interval, bars = series.len(), "Series fetched.");

        let output = self.pipeline.run(&series, score);

        Ok(IntervalReport {
            symbol,
            interval,
            strategy: self.pipeline.strategy_name().to_string(),
            sentiment: score,
            rows: output.rows,
            accuracy: output.backtest.report,
        })
    }
}
