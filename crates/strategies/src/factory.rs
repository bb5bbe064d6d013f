use crate::error::{Error, Result};
use crate::rsi_macd_ema::RsiMacdEma;
use crate::sentiment::{ConstantSentiment, SentimentSource};
use crate::types::{RsiMacdEmaSettings, SentimentSettings};
use crate::Strategy;
use core_types::{SentimentScore, StrategyConfig};

pub fn create_strategy(config: &StrategyConfig) -> Result<Box<dyn Strategy + Send + Sync>> {
    let strategy: Box<dyn Strategy + Send + Sync> = match config.name.as_str() {
        "rsi_macd_ema" => {
            let settings: RsiMacdEmaSettings = config.params.clone().try_into()?;
            Box::new(RsiMacdEma::new(settings))
        }
        unknown => return Err(Error::UnknownStrategy(unknown.to_string())),
    };

    tracing::debug!(strategy = strategy.name(), "Strategy created.");
    Ok(strategy)
}

pub fn create_sentiment_source(
    settings: &SentimentSettings,
) -> Result<Box<dyn SentimentSource + Send + Sync>> {
    match settings.source.as_str() {
        "constant" => {
            let score = SentimentScore::try_from(settings.score)?;
            Ok(Box::new(ConstantSentiment::new(score)))
        }
        unknown => Err(Error::UnknownSentimentSource(unknown.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_default_strategy() {
        let strategy = create_strategy(&StrategyConfig::default()).unwrap();
        assert_eq!(strategy.name(), "RsiMacdEma");
    }

    #[test]
    fn test_create_strategy_with_params() {
        let params: toml::Value = toml::from_str("rsi_oversold = 25.0\nrsi_overbought = 75.0").unwrap();
        let config = StrategyConfig { name: "rsi_macd_ema".into(), params };
        assert!(create_strategy(&config).is_ok());
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let config = StrategyConfig { name: "astrology".into(), ..StrategyConfig::default() };
        assert!(matches!(create_strategy(&config), Err(Error::UnknownStrategy(_))));
    }

    #[test]
    fn test_create_constant_sentiment() {
        let settings = SentimentSettings { source: "constant".into(), score: -1 };
        let source = create_sentiment_source(&settings).unwrap();
        assert_eq!(source.score(), SentimentScore::Bearish);
    }

    #[test]
    fn test_out_of_range_sentiment_is_rejected() {
        let settings = SentimentSettings { source: "constant".into(), score: 3 };
        assert!(create_sentiment_source(&settings).is_err());
    }
}
