//! Costing configuration.
//!
//! ```rust,no_run
//! use cloudcost::config::CostingConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CostingConfig::from_env()?;
//! let config = CostingConfig::from_file("cloudcost.json")?;
//! # Ok(())
//! # }
//! ```

mod costing;

pub use costing::{CostingConfig, CostingConfigBuilder, ENV_PREFIX};

use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The key with invalid value
        key: String,
        /// Error message
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            key: "cost_precision".to_string(),
            message: "must be at most 28".to_string(),
        };
        assert!(err.to_string().contains("cost_precision"));
    }
}
