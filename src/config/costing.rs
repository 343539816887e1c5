use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigResult};

/// Prefix of every environment variable read by [`CostingConfig::from_env`].
pub const ENV_PREFIX: &str = "CLOUDCOST_";

const MAX_PRECISION: u32 = 28;

/// Options applied when summing a resource tree's costs.
///
/// The hours-per-month conversion is fixed at [`HOURS_PER_MONTH`](crate::HOURS_PER_MONTH).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostingConfig {
    /// Decimal places component costs are rounded to; `None` keeps full precision.
    pub cost_precision: Option<u32>,
    /// Log a warning for each component whose price could not be found.
    pub warn_on_missing_price: bool,
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            cost_precision: None,
            warn_on_missing_price: true,
        }
    }
}

impl CostingConfig {
    pub fn builder() -> CostingConfigBuilder {
        CostingConfigBuilder::default()
    }

    /// Reads `CLOUDCOST_COST_PRECISION` and `CLOUDCOST_WARN_ON_MISSING_PRICE`,
    /// falling back to defaults for unset variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::Env(e)),
        })
    }

    /// Loads a JSON file such as `{"cost_precision": 6}`.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> ConfigResult<Option<String>>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(&env_key("cost_precision"))? {
            let precision = raw.trim().parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                key: env_key("cost_precision"),
                message: e.to_string(),
            })?;
            config.cost_precision = Some(precision);
        }

        if let Some(raw) = lookup(&env_key("warn_on_missing_price"))? {
            config.warn_on_missing_price = parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: env_key("warn_on_missing_price"),
                message: format!("expected a boolean, got '{}'", raw),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        match self.cost_precision {
            Some(precision) if precision > MAX_PRECISION => Err(ConfigError::InvalidValue {
                key: "cost_precision".into(),
                message: format!("must be at most {}, got {}", MAX_PRECISION, precision),
            }),
            _ => Ok(()),
        }
    }
}

fn env_key(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.to_uppercase())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct CostingConfigBuilder {
    cost_precision: Option<u32>,
    warn_on_missing_price: Option<bool>,
}

impl CostingConfigBuilder {
    pub fn cost_precision(mut self, precision: u32) -> Self {
        self.cost_precision = Some(precision);
        self
    }

    pub fn warn_on_missing_price(mut self, warn: bool) -> Self {
        self.warn_on_missing_price = Some(warn);
        self
    }

    pub fn build(self) -> ConfigResult<CostingConfig> {
        let defaults = CostingConfig::default();
        let config = CostingConfig {
            cost_precision: self.cost_precision.or(defaults.cost_precision),
            warn_on_missing_price: self
                .warn_on_missing_price
                .unwrap_or(defaults.warn_on_missing_price),
        };
        config.validate()?;
        Ok(config)
    }
}
