use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::buckets::{TierBucket, TierBuckets};
use super::{TierError, TierResult};

/// A validated graduated pricing schedule.
///
/// Holds the cumulative upper bound of every tier except the last, which is
/// unbounded above. `[10240, 30720]` describes three tiers: `[0, 10240)`,
/// `[10240, 30720)` and `[30720, ∞)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct TierSchedule {
    limits: Vec<u64>,
}

impl TierSchedule {
    /// Builds a schedule from cumulative upper bounds.
    pub fn new(limits: Vec<u64>) -> TierResult<Self> {
        for (index, pair) in limits.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(TierError::NonAscendingLimits {
                    index: index + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        Ok(Self { limits })
    }

    /// A single tier covering all usage.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Builds a schedule from tier widths, as price sheets that read
    /// "first 10TB, next 40TB, next 100TB" are usually written.
    ///
    /// `[10240, 40960]` becomes the cumulative bounds `[10240, 51200]`.
    pub fn from_widths(widths: &[u64]) -> TierResult<Self> {
        let mut limits = Vec::with_capacity(widths.len());
        let mut upper: u64 = 0;
        for (index, &width) in widths.iter().enumerate() {
            upper = upper
                .checked_add(width)
                .ok_or(TierError::WidthOverflow { index })?;
            limits.push(upper);
        }
        Self::new(limits)
    }

    pub fn limits(&self) -> &[u64] {
        &self.limits
    }

    /// Number of tiers, always one more than the number of limits.
    pub fn tier_count(&self) -> usize {
        self.limits.len() + 1
    }

    /// Lower and upper bound of `tier`; the last tier has no upper bound.
    pub fn bounds(&self, tier: usize) -> Option<(u64, Option<u64>)> {
        if tier >= self.tier_count() {
            return None;
        }
        let start = if tier == 0 { 0 } else { self.limits[tier - 1] };
        Some((start, self.limits.get(tier).copied()))
    }

    /// Splits `total` into the portion that falls in each tier.
    ///
    /// The returned quantities sum to `total` exactly.
    pub fn allocate(&self, total: Decimal) -> TierResult<TierBuckets> {
        if total < Decimal::ZERO {
            return Err(TierError::NegativeUsage(total));
        }

        let mut buckets = Vec::with_capacity(self.tier_count());
        let mut lower = Decimal::ZERO;
        let mut start = 0;
        for (index, &limit) in self.limits.iter().enumerate() {
            let upper = Decimal::from(limit);
            buckets.push(TierBucket {
                index,
                start,
                end: Some(limit),
                quantity: (total.min(upper) - lower).max(Decimal::ZERO),
            });
            lower = upper;
            start = limit;
        }
        buckets.push(TierBucket {
            index: self.limits.len(),
            start,
            end: None,
            quantity: (total - lower).max(Decimal::ZERO),
        });

        tracing::trace!(%total, tiers = buckets.len(), "Allocated usage to tiers");
        Ok(TierBuckets::new(buckets))
    }
}

impl TryFrom<Vec<u64>> for TierSchedule {
    type Error = TierError;

    fn try_from(limits: Vec<u64>) -> TierResult<Self> {
        Self::new(limits)
    }
}

impl From<TierSchedule> for Vec<u64> {
    fn from(schedule: TierSchedule) -> Self {
        schedule.limits
    }
}
