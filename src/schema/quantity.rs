use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Hours in a billing month.
///
/// Every hourly rate in the catalog is normalized with this exact value.
pub const HOURS_PER_MONTH: Decimal = dec!(730);

/// `1 / HOURS_PER_MONTH` at full decimal precision.
pub const MONTH_TO_HOUR_MULTIPLIER: Decimal = dec!(0.0013698630136986301369863014);

/// `HOURS_PER_MONTH / 24`, rounded to 24 decimal places.
pub const DAYS_IN_MONTH: Decimal = dec!(30.416666666666666666666667);

/// `DAYS_IN_MONTH / HOURS_PER_MONTH`, rounded to 24 decimal places. Converts a
/// per-day quantity into a share of the billing month.
pub const DAY_TO_MONTH_UNIT_MULTIPLIER: Decimal = dec!(0.041666666666666666666667);

/// How much of something a cost component bills for.
///
/// A component is either measured per hour, per month, or has no estimate.
/// Unknown components are still shown, just without a cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "period", content = "value", rename_all = "snake_case")]
pub enum Quantity {
    Hourly(Decimal),
    Monthly(Decimal),
    #[default]
    Unknown,
}

impl Quantity {
    /// `Monthly` when a usage estimate is present, `Unknown` otherwise.
    pub fn monthly_or_unknown(value: Option<Decimal>) -> Self {
        value.map_or(Self::Unknown, Self::Monthly)
    }

    pub fn hourly_or_unknown(value: Option<Decimal>) -> Self {
        value.map_or(Self::Unknown, Self::Hourly)
    }

    /// Builds a quantity from separately supplied hourly and monthly values,
    /// rejecting the case where both are set.
    pub fn from_parts(hourly: Option<Decimal>, monthly: Option<Decimal>) -> Result<Self> {
        match (hourly, monthly) {
            (Some(hourly), Some(monthly)) => Err(Error::ConflictingQuantities { hourly, monthly }),
            (Some(hourly), None) => Ok(Self::Hourly(hourly)),
            (None, Some(monthly)) => Ok(Self::Monthly(monthly)),
            (None, None) => Ok(Self::Unknown),
        }
    }

    /// Quantity over a month; hourly values are multiplied by [`HOURS_PER_MONTH`].
    pub fn monthly(&self) -> Option<Decimal> {
        match self {
            Self::Hourly(hourly) => Some(*hourly * HOURS_PER_MONTH),
            Self::Monthly(monthly) => Some(*monthly),
            Self::Unknown => None,
        }
    }

    /// Quantity over an hour; monthly values are divided by [`HOURS_PER_MONTH`].
    pub fn hourly(&self) -> Option<Decimal> {
        match self {
            Self::Hourly(hourly) => Some(*hourly),
            Self::Monthly(monthly) => Some(*monthly / HOURS_PER_MONTH),
            Self::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Multiplies a known value by `factor`, keeping its period.
    pub fn scaled(self, factor: Decimal) -> Self {
        match self {
            Self::Hourly(hourly) => Self::Hourly(hourly * factor),
            Self::Monthly(monthly) => Self::Monthly(monthly * factor),
            Self::Unknown => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_resolves_to_730_hours() {
        assert_eq!(Quantity::Hourly(dec!(1)).monthly(), Some(dec!(730)));
        assert_eq!(Quantity::Hourly(dec!(2.5)).monthly(), Some(dec!(1825)));
        assert_eq!(Quantity::Hourly(dec!(0.0137)).monthly(), Some(dec!(10.001)));
    }

    #[test]
    fn test_monthly_passthrough() {
        assert_eq!(Quantity::Monthly(dec!(42.5)).monthly(), Some(dec!(42.5)));
        assert_eq!(Quantity::Monthly(dec!(730)).hourly(), Some(dec!(1)));
    }

    #[test]
    fn test_unknown_stays_unknown() {
        assert_eq!(Quantity::Unknown.monthly(), None);
        assert_eq!(Quantity::Unknown.hourly(), None);
        assert_eq!(Quantity::Unknown.scaled(dec!(3)), Quantity::Unknown);
        assert!(!Quantity::default().is_known());
    }

    #[test]
    fn test_from_parts_rejects_both() {
        let err = Quantity::from_parts(Some(dec!(1)), Some(dec!(730))).unwrap_err();
        assert!(matches!(err, Error::ConflictingQuantities { .. }));

        assert_eq!(
            Quantity::from_parts(Some(dec!(1)), None).unwrap(),
            Quantity::Hourly(dec!(1))
        );
        assert_eq!(
            Quantity::from_parts(None, Some(dec!(5))).unwrap(),
            Quantity::Monthly(dec!(5))
        );
        assert_eq!(Quantity::from_parts(None, None).unwrap(), Quantity::Unknown);
    }

    #[test]
    fn test_optional_constructors() {
        assert_eq!(
            Quantity::monthly_or_unknown(Some(dec!(3))),
            Quantity::Monthly(dec!(3))
        );
        assert_eq!(Quantity::monthly_or_unknown(None), Quantity::Unknown);
        assert_eq!(Quantity::hourly_or_unknown(None), Quantity::Unknown);
    }

    #[test]
    fn test_scaled_keeps_period() {
        assert_eq!(Quantity::Hourly(dec!(2)).scaled(dec!(3)), Quantity::Hourly(dec!(6)));
        assert_eq!(Quantity::Monthly(dec!(2)).scaled(dec!(3)), Quantity::Monthly(dec!(6)));
    }

    #[test]
    fn test_month_to_hour_multiplier() {
        assert_eq!((MONTH_TO_HOUR_MULTIPLIER * HOURS_PER_MONTH).round_dp(20), Decimal::ONE);
    }

    #[test]
    fn test_day_to_month_unit_multiplier() {
        assert_eq!(
            (DAYS_IN_MONTH / HOURS_PER_MONTH).round_dp(24),
            DAY_TO_MONTH_UNIT_MULTIPLIER
        );
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!((HOURS_PER_MONTH / dec!(24)).round_dp(24), DAYS_IN_MONTH);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Quantity::Hourly(dec!(1.5))).unwrap();
        assert_eq!(json, serde_json::json!({"period": "hourly", "value": "1.5"}));

        let json = serde_json::to_value(Quantity::Unknown).unwrap();
        assert_eq!(json, serde_json::json!({"period": "unknown"}));
    }
}
