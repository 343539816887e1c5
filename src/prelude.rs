//! Prelude module for convenient imports.
//!
//! This module re-exports the types resource definitions use most.
//!
//! # Usage
//!
//! ```rust
//! use cloudcost::prelude::*;
//! ```

// Core types
pub use crate::Error;
pub use crate::Result;

// Cost tree
pub use crate::schema::{
    AttributeFilter, CostComponent, HOURS_PER_MONTH, PriceFilter, ProductFilter, Quantity,
    Resource, ResourceBuilder,
};

// Pricing
pub use crate::config::CostingConfig;
pub use crate::schema::{PriceResolver, ResourceCosts, StaticPrices};

// Tiers
pub use crate::tiers::{TierSchedule, calculate_tier_buckets};
