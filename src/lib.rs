//! # cloudcost
//!
//! Cost component trees and tiered usage allocation for cloud resource cost
//! models.
//!
//! Every resource definition in a cost catalog turns configuration and usage
//! estimates into billable line items. This crate provides the parts they all
//! share: the [`Resource`]/[`CostComponent`] tree with monthly quantity
//! resolution and instance-count scaling, and the allocator that splits usage
//! across graduated pricing tiers.
//!
//! ## Quick Start
//!
//! ```rust
//! use cloudcost::{CostComponent, PriceFilter, Resource, TierSchedule};
//! use rust_decimal_macros::dec;
//!
//! # fn main() -> cloudcost::Result<()> {
//! // Hot blob capacity: first 50TB, next 450TB, over 500TB
//! let schedule = TierSchedule::new(vec![51200, 512000])?;
//! let names = ["Capacity (first 50TB)", "Capacity (next 450TB)", "Capacity (over 500TB)"];
//!
//! let buckets = schedule.allocate(dec!(600000))?;
//! let components = buckets.non_zero().map(|bucket| {
//!     CostComponent::monthly(names[bucket.index], "GB", bucket.quantity)
//!         .usage_based()
//!         .with_price_filter(PriceFilter::default().start_usage_amount(bucket.start))
//! });
//!
//! let account = Resource::builder("azurerm_storage_account.logs")
//!     .cost_components(components)
//!     .build();
//!
//! assert_eq!(account.cost_components().len(), 3);
//! assert_eq!(account.cost_components()[2].monthly_quantity(), Some(dec!(88000)));
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod prelude;
pub mod schema;
pub mod tiers;

pub use config::{ConfigError, CostingConfig};
pub use schema::{
    AttributeFilter, ComponentCost, CostComponent, DAY_TO_MONTH_UNIT_MULTIPLIER, DAYS_IN_MONTH,
    HOURS_PER_MONTH,
    MONTH_TO_HOUR_MULTIPLIER, PriceFilter, PriceResolver, ProductFilter, Quantity, Resource,
    ResourceBuilder, ResourceCosts, StaticPrices,
};
pub use tiers::{TierBucket, TierBuckets, TierError, TierSchedule, calculate_tier_buckets};

use rust_decimal::Decimal;

/// Error type for cloudcost operations.
///
/// Apart from configuration loading, every variant describes a tree or tier
/// schedule that the calling resource definition assembled incorrectly.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Tier schedule or usage total is invalid.
    #[error("Tier allocation failed: {0}")]
    Tier(#[from] TierError),

    /// A component was given both an hourly and a monthly quantity.
    #[error("Cost component has both an hourly ({hourly}) and a monthly ({monthly}) quantity")]
    ConflictingQuantities { hourly: Decimal, monthly: Decimal },

    /// Quantities of this resource were already multiplied once.
    #[error("Quantities of resource '{resource}' have already been scaled")]
    AlreadyScaled { resource: String },

    /// Instance counts are never negative.
    #[error("Cannot scale resource '{resource}' by negative factor {factor}")]
    NegativeFactor { resource: String, factor: Decimal },

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// File system operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A resource tree or tier schedule was built incorrectly by its caller
    Structural,
    /// Configuration or parsing errors
    Configuration,
    /// Internal errors (IO)
    Internal,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Tier(_)
            | Error::ConflictingQuantities { .. }
            | Error::AlreadyScaled { .. }
            | Error::NegativeFactor { .. } => ErrorCategory::Structural,

            Error::Config(_) | Error::Json(_) => ErrorCategory::Configuration,

            Error::Io(_) => ErrorCategory::Internal,
        }
    }

    /// Whether the error points at a bug in the calling resource definition.
    pub fn is_programmer_error(&self) -> bool {
        self.category() == ErrorCategory::Structural
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue { key, message } => {
                Error::Config(format!("Invalid value for {}: {}", key, message))
            }
            ConfigError::Serialization(e) => Error::Json(e),
            ConfigError::Io(e) => Error::Io(e),
            ConfigError::Env(e) => Error::Config(format!("Environment error: {}", e)),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
