// In crates/engine/src/pipeline.rs

use crate::error::Result;
use app_config::Settings;
use backtester::{BacktestResult, Backtester};
use core_types::{SentimentScore, Series, SignalRow};
use serde::Serialize;
use strategies::factory::create_strategy;
use strategies::{apply_sentiment, IndicatorEngine, Strategy};

/// Output of one pass over a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    /// Every bar with its indicators and final, sentiment-adjusted signal.
    pub rows: Vec<SignalRow>,
    pub backtest: BacktestResult,
}

/// Indicators, signal rule, sentiment override and accuracy estimate for one series.
///
/// A pipeline holds no per-run state; running it twice over the same series
/// yields identical output.
pub struct Pipeline {
    indicators: IndicatorEngine,
    strategy: Box<dyn Strategy + Send + Sync>,
    backtester: Backtester,
    include_sentiment: bool,
}

impl Pipeline {
    pub fn new(
        indicators: IndicatorEngine,
        strategy: Box<dyn Strategy + Send + Sync>,
        backtester: Backtester,
        include_sentiment: bool,
    ) -> Self {
        Self {
            indicators,
            strategy,
            backtester,
            include_sentiment,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let indicators = IndicatorEngine::new(settings.indicators.clone())?;
        let strategy = create_strategy(&settings.strategy)?;
        let backtester = Backtester::new(settings.backtest.horizon)?;

        Ok(Self::new(
            indicators,
            strategy,
            backtester,
            settings.backtest.include_sentiment,
        ))
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn run(&self, series: &Series, sentiment: SentimentScore) -> PipelineOutput {
        // --- 1. Indicators ---
        let indicator_rows = self.indicators.compute(series);

        // --- 2. Signal rule ---
        let labelled = self.strategy.label(&indicator_rows);

        // --- 3. Sentiment override ---
        let rows = apply_sentiment(&labelled, sentiment);

        // --- 4. Accuracy ---
        let scored_input = if self.include_sentiment { &rows } else { &labelled };
        let backtest = self.backtester.run(scored_input);

        tracing::debug!(
            symbol = %series.symbol(),
            interval = %series.interval(),
            bars = rows.len(),
            scored = backtest.report.scored_rows,
            accuracy = ?backtest.report.accuracy,
            "Pipeline run complete."
        );

        PipelineOutput { rows, backtest }
    }
}
