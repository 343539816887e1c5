use rust_decimal::Decimal;
use serde::Serialize;

use super::filter::{PriceFilter, ProductFilter};
use super::quantity::Quantity;
use crate::Result;

/// One billable line item of a resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComponent {
    pub name: String,
    pub unit: String,
    /// Converts the stored quantity into the unit the price is quoted in,
    /// e.g. `10000` when the unit reads "10K operations".
    pub unit_multiplier: Decimal,
    pub quantity: Quantity,
    /// Quantity came from a usage estimate rather than static configuration.
    pub usage_based: bool,
    /// Drop the component instead of reporting it when no price matches.
    pub ignore_if_missing_price: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_filter: Option<ProductFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_filter: Option<PriceFilter>,
}

impl CostComponent {
    /// A component with no quantity estimate and a unit multiplier of one.
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            unit_multiplier: Decimal::ONE,
            quantity: Quantity::Unknown,
            usage_based: false,
            ignore_if_missing_price: false,
            product_filter: None,
            price_filter: None,
        }
    }

    pub fn hourly(name: impl Into<String>, unit: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(name, unit).with_quantity(Quantity::Hourly(quantity))
    }

    pub fn monthly(name: impl Into<String>, unit: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(name, unit).with_quantity(Quantity::Monthly(quantity))
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the quantity from separate hourly and monthly values.
    ///
    /// Fails if both are present.
    pub fn with_quantities(
        self,
        hourly: Option<Decimal>,
        monthly: Option<Decimal>,
    ) -> Result<Self> {
        Ok(self.with_quantity(Quantity::from_parts(hourly, monthly)?))
    }

    pub fn with_unit_multiplier(mut self, multiplier: Decimal) -> Self {
        self.unit_multiplier = multiplier;
        self
    }

    pub fn usage_based(mut self) -> Self {
        self.usage_based = true;
        self
    }

    pub fn ignore_if_missing_price(mut self) -> Self {
        self.ignore_if_missing_price = true;
        self
    }

    pub fn with_product_filter(mut self, filter: ProductFilter) -> Self {
        self.product_filter = Some(filter);
        self
    }

    pub fn with_price_filter(mut self, filter: PriceFilter) -> Self {
        self.price_filter = Some(filter);
        self
    }

    /// Monthly quantity used for cost summation, `None` when unknown.
    ///
    /// The unit multiplier is not applied here; it belongs to pricing.
    pub fn monthly_quantity(&self) -> Option<Decimal> {
        self.quantity.monthly()
    }

    pub fn hourly_quantity(&self) -> Option<Decimal> {
        self.quantity.hourly()
    }

    pub fn has_quantity(&self) -> bool {
        self.quantity.is_known()
    }
}
