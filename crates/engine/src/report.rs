// In crates/engine/src/report.rs

use backtester::AccuracyReport;
use chrono::{DateTime, Utc};
use core_types::{Interval, SentimentScore, SignalRow, Symbol};
use serde::Serialize;

/// The labelled table and accuracy for one (symbol, interval) run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalReport {
    pub symbol: Symbol,
    pub interval: Interval,
    pub strategy: String,
    pub sentiment: SentimentScore,
    /// All rows, including the newest ones the estimator could not score.
    pub rows: Vec<SignalRow>,
    pub accuracy: AccuracyReport,
}

impl IntervalReport {
    /// The last `n` rows, oldest first.
    pub fn recent(&self, n: usize) -> &[SignalRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    pub fn latest(&self) -> Option<&SignalRow> {
        self.rows.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReading {
    pub source: String,
    pub score: SentimentScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelOutcome {
    Ready(IntervalReport),
    Failed { error: String },
}

/// One interval's slot on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalPanel {
    pub interval: Interval,
    pub label: &'static str,
    pub outcome: PanelOutcome,
}

impl IntervalPanel {
    pub fn report(&self) -> Option<&IntervalReport> {
        match &self.outcome {
            PanelOutcome::Ready(report) => Some(report),
            PanelOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            PanelOutcome::Ready(_) => None,
            PanelOutcome::Failed { error } => Some(error),
        }
    }
}

/// Everything a page load renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub symbol: Symbol,
    pub title: String,
    pub sentiment: SentimentReading,
    pub generated_at: DateTime<Utc>,
    /// Table length the snapshot was built for.
    pub table_rows: usize,
    pub panels: Vec<IntervalPanel>,
}

impl DashboardSnapshot {
    pub fn failed_panels(&self) -> usize {
        self.panels.iter().filter(|p| p.error().is_some()).count()
    }
}
