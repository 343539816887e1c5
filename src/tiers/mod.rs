//! Tiered (graduated) usage allocation.
//!
//! A graduated price sheet such as "first 50TB, next 450TB, over 500TB" is
//! described by its cumulative upper bounds, `[51200, 512000]` in GB. Allocating
//! a usage total against those bounds yields the slice of usage billed at each
//! tier's rate.
//!
//! ```rust
//! use cloudcost::tiers::calculate_tier_buckets;
//! use rust_decimal_macros::dec;
//!
//! let buckets = calculate_tier_buckets(dec!(600000), &[51200, 512000]);
//! assert_eq!(buckets, vec![dec!(51200), dec!(460800), dec!(88000)]);
//! ```

mod buckets;
mod schedule;

pub use buckets::{TierBucket, TierBuckets, calculate_tier_buckets};
pub use schedule::TierSchedule;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by an invalid tier schedule or usage total.
///
/// Both inputs come from a resource's static price sheet, so these indicate a
/// bug in the caller rather than bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TierError {
    /// Usage totals are never negative.
    #[error("usage total must not be negative, got {0}")]
    NegativeUsage(Decimal),

    /// Cumulative limits must strictly increase.
    #[error("tier limits must be strictly ascending: limit {current} at index {index} follows {previous}")]
    NonAscendingLimits {
        index: usize,
        previous: u64,
        current: u64,
    },

    /// Summing tier widths exceeded `u64`.
    #[error("tier widths overflow at index {index}")]
    WidthOverflow { index: usize },
}

/// Result type for tier operations
pub type TierResult<T> = std::result::Result<T, TierError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tier_error_display() {
        let err = TierError::NegativeUsage(dec!(-5));
        assert!(err.to_string().contains("-5"));

        let err = TierError::NonAscendingLimits {
            index: 1,
            previous: 100,
            current: 50,
        };
        assert!(err.to_string().contains("index 1"));
    }
}
