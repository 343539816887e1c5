use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TierSchedule;

/// The share of a usage total that falls in one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBucket {
    pub index: usize,
    /// Usage amount at which the tier begins, the value price sheets key on.
    pub start: u64,
    /// Exclusive upper bound; `None` for the final tier.
    pub end: Option<u64>,
    pub quantity: Decimal,
}

impl TierBucket {
    pub fn width(&self) -> Option<u64> {
        self.end.map(|end| end - self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.is_zero()
    }
}

/// Per-tier quantities produced by [`TierSchedule::allocate`].
///
/// Only an allocation can create one, so the quantities always sum to the
/// allocated total and fit their tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierBuckets {
    buckets: Vec<TierBucket>,
}

impl TierBuckets {
    pub(super) fn new(buckets: Vec<TierBucket>) -> Self {
        Self { buckets }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, tier: usize) -> Option<&TierBucket> {
        self.buckets.get(tier)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TierBucket> {
        self.buckets.iter()
    }

    /// Buckets holding some usage, in tier order.
    ///
    /// Resource definitions emit one cost component per returned bucket.
    pub fn non_zero(&self) -> impl Iterator<Item = &TierBucket> {
        self.buckets.iter().filter(|b| b.quantity > Decimal::ZERO)
    }

    pub fn quantities(&self) -> Vec<Decimal> {
        self.buckets.iter().map(|b| b.quantity).collect()
    }

    pub fn into_quantities(self) -> Vec<Decimal> {
        self.buckets.into_iter().map(|b| b.quantity).collect()
    }

    pub fn total(&self) -> Decimal {
        self.buckets.iter().map(|b| b.quantity).sum()
    }
}

impl IntoIterator for TierBuckets {
    type Item = TierBucket;
    type IntoIter = std::vec::IntoIter<TierBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

impl<'a> IntoIterator for &'a TierBuckets {
    type Item = &'a TierBucket;
    type IntoIter = std::slice::Iter<'a, TierBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Splits `total` across tiers bounded by the cumulative `tier_limits`.
///
/// Returns `tier_limits.len() + 1` quantities. Entry `i` holds the usage in
/// `[tier_limits[i - 1], tier_limits[i])`, and the last entry holds everything
/// above the final limit. An empty `tier_limits` yields `[total]`.
///
/// # Panics
///
/// Panics if `total` is negative or `tier_limits` is not strictly ascending.
/// Use [`TierSchedule`] to handle those cases as errors.
pub fn calculate_tier_buckets(total: Decimal, tier_limits: &[u64]) -> Vec<Decimal> {
    TierSchedule::new(tier_limits.to_vec())
        .and_then(|schedule| schedule.allocate(total))
        .map(TierBuckets::into_quantities)
        .unwrap_or_else(|e| panic!("invalid tier allocation of {total} over {tier_limits:?}: {e}"))
}
