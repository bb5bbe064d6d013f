// In crates/strategies/src/sentiment.rs

use core_types::{SentimentScore, Signal, SignalRow};

/// A source of run-wide market sentiment.
///
/// Implementations are queried once per dashboard run; the score then
/// applies to every interval of that run.
pub trait SentimentSource {
    fn name(&self) -> &'static str;

    fn score(&self) -> SentimentScore;
}

/// A fixed sentiment reading, used until a real model is plugged in.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSentiment {
    score: SentimentScore,
}

impl ConstantSentiment {
    pub fn new(score: SentimentScore) -> Self {
        Self { score }
    }
}

impl Default for ConstantSentiment {
    fn default() -> Self {
        Self::new(SentimentScore::Bullish)
    }
}

impl SentimentSource for ConstantSentiment {
    fn name(&self) -> &'static str {
        "ConstantSentiment"
    }

    fn score(&self) -> SentimentScore {
        self.score
    }
}

/// Rewrites `Hold` according to the sentiment score. `Buy` and `Sell` pass through.
pub fn override_signal(signal: Signal, score: SentimentScore) -> Signal {
    match (signal, score) {
        (Signal::Hold, SentimentScore::Bullish) => Signal::Buy,
        (Signal::Hold, SentimentScore::Bearish) => Signal::Sell,
        (signal, _) => signal,
    }
}

/// Returns a new table with the sentiment override applied to every `Hold` row.
pub fn apply_sentiment(rows: &[SignalRow], score: SentimentScore) -> Vec<SignalRow> {
    rows.iter()
        .map(|row| SignalRow {
            signal: override_signal(row.signal, score),
            ..*row
        })
        .collect()
}
