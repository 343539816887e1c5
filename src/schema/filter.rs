//! Price lookup filters.
//!
//! These describe which catalog product and price a cost component refers to.
//! Nothing in this crate interprets them; they travel with the component to the
//! pricing resolver unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeFilter {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_regex: Option<String>,
}

impl AttributeFilter {
    pub fn exact(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            value_regex: None,
        }
    }

    pub fn regex(key: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            value_regex: Some(pattern.into()),
        }
    }
}

/// Selects a product in the pricing catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_filters: Vec<AttributeFilter>,
}

impl ProductFilter {
    pub fn new(vendor_name: impl Into<String>) -> Self {
        Self {
            vendor_name: Some(vendor_name.into()),
            ..Default::default()
        }
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn product_family(mut self, family: impl Into<String>) -> Self {
        self.product_family = Some(family.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn attribute(mut self, filter: AttributeFilter) -> Self {
        self.attribute_filters.push(filter);
        self
    }
}

/// Selects one price of a catalog product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_option: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_purchase_option: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_offering_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_usage_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_usage_amount: Option<String>,
}

impl PriceFilter {
    pub fn purchase_option(mut self, option: impl Into<String>) -> Self {
        self.purchase_option = Some(option.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Matches the price row of the tier that begins at `amount`.
    pub fn start_usage_amount(mut self, amount: u64) -> Self {
        self.start_usage_amount = Some(amount.to_string());
        self
    }

    pub fn end_usage_amount(mut self, amount: u64) -> Self {
        self.end_usage_amount = Some(amount.to_string());
        self
    }
}
