use serde::Deserialize;
use toml::Value;

#[derive(Deserialize, Debug, Clone)]
pub struct StrategyConfig {
    pub name: String,
    // This will hold the `params = { ... }` table from the TOML
    #[serde(default = "empty_params")]
    pub params: Value,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            name: "rsi_macd_ema".to_string(),
            params: empty_params(),
        }
    }
}

fn empty_params() -> Value {
    Value::Table(toml::map::Map::new())
}
