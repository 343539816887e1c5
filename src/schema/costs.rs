//! Cost summation over a priced resource tree.
//!
//! Looking prices up is left to a [`PriceResolver`]; this module only combines
//! resolved unit prices with quantities and rolls the results up the tree.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::{debug, warn};

use super::cost_component::CostComponent;
use super::quantity::HOURS_PER_MONTH;
use super::resource::Resource;
use crate::config::CostingConfig;

/// Supplies the unit price for a cost component, typically by matching its
/// product and price filters against a pricing catalog.
pub trait PriceResolver {
    /// Price per priced unit, or `None` when nothing matches.
    fn resolve(&self, component: &CostComponent) -> Option<Decimal>;
}

impl<F> PriceResolver for F
where
    F: Fn(&CostComponent) -> Option<Decimal>,
{
    fn resolve(&self, component: &CostComponent) -> Option<Decimal> {
        self(component)
    }
}

/// Fixed prices keyed by component name.
#[derive(Debug, Clone, Default)]
pub struct StaticPrices {
    prices: HashMap<String, Decimal>,
}

impl StaticPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price(mut self, component: impl Into<String>, price: Decimal) -> Self {
        self.prices.insert(component.into(), price);
        self
    }

    pub fn insert(&mut self, component: impl Into<String>, price: Decimal) {
        self.prices.insert(component.into(), price);
    }
}

impl PriceResolver for StaticPrices {
    fn resolve(&self, component: &CostComponent) -> Option<Decimal> {
        self.prices.get(&component.name).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCost {
    pub name: String,
    pub unit: String,
    pub price: Option<Decimal>,
    pub monthly_quantity: Option<Decimal>,
    pub hourly_cost: Option<Decimal>,
    pub monthly_cost: Option<Decimal>,
    pub usage_based: bool,
}

/// Costs of one resource, with its sub-resources' costs nested in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCosts {
    pub name: String,
    pub components: Vec<ComponentCost>,
    pub sub_resources: Vec<ResourceCosts>,
    /// `None` when nothing in the tree produced a cost.
    pub hourly_cost: Option<Decimal>,
    pub monthly_cost: Option<Decimal>,
    /// Part of the monthly cost that comes from usage-based components.
    pub monthly_usage_cost: Option<Decimal>,
    /// Components of this resource that had no price and were not allowed to omit one.
    pub missing_prices: Vec<String>,
}

impl ResourceCosts {
    fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Missing-price component names across the whole tree.
    pub fn all_missing_prices(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.missing_prices.iter().map(String::as_str).collect();
        for sub in &self.sub_resources {
            names.extend(sub.all_missing_prices());
        }
        names
    }

    pub fn has_cost(&self) -> bool {
        self.hourly_cost.is_some() || self.monthly_cost.is_some()
    }
}

impl Resource {
    /// Sums this tree's costs with the default [`CostingConfig`].
    pub fn calculate_costs<R>(&self, resolver: &R) -> ResourceCosts
    where
        R: PriceResolver + ?Sized,
    {
        self.calculate_costs_with(resolver, &CostingConfig::default())
    }

    /// Sums this tree's costs bottom-up.
    ///
    /// A component costs `price × unit_multiplier × monthly_quantity` per
    /// month. Components with an unknown quantity are listed without a cost.
    /// Components without a price are dropped when they allow it and reported
    /// in [`ResourceCosts::missing_prices`] otherwise.
    pub fn calculate_costs_with<R>(&self, resolver: &R, config: &CostingConfig) -> ResourceCosts
    where
        R: PriceResolver + ?Sized,
    {
        if self.no_price() {
            debug!("Skipping free resource {}", self.name());
            return ResourceCosts::empty(self.name());
        }
        if self.is_skipped() {
            debug!(
                resource = self.name(),
                reason = self.skip_message().unwrap_or_default(),
                "Skipping unsupported resource"
            );
            return ResourceCosts::empty(self.name());
        }

        let mut costs = ResourceCosts::empty(self.name());
        let mut hourly = Decimal::ZERO;
        let mut monthly = Decimal::ZERO;
        let mut usage: Option<Decimal> = None;
        let mut has_cost = false;

        for component in self.cost_components() {
            let Some(price) = resolver.resolve(component) else {
                if component.ignore_if_missing_price {
                    debug!(
                        resource = self.name(),
                        component = %component.name,
                        "Dropping component without price"
                    );
                    continue;
                }
                if config.warn_on_missing_price {
                    warn!(
                        resource = self.name(),
                        component = %component.name,
                        "No price found for cost component"
                    );
                }
                costs.missing_prices.push(component.name.clone());
                costs.components.push(component_cost(component, None, config));
                continue;
            };

            let cost = component_cost(component, Some(price), config);
            if let (Some(h), Some(m)) = (cost.hourly_cost, cost.monthly_cost) {
                has_cost = true;
                hourly += h;
                monthly += m;
                if component.usage_based {
                    usage = Some(usage.unwrap_or_default() + m);
                }
            }
            costs.components.push(cost);
        }

        for sub in self.sub_resources() {
            let sub_costs = sub.calculate_costs_with(resolver, config);
            if sub_costs.has_cost() || sub_costs.monthly_usage_cost.is_some() {
                has_cost = true;
            }
            hourly += sub_costs.hourly_cost.unwrap_or_default();
            monthly += sub_costs.monthly_cost.unwrap_or_default();
            if let Some(sub_usage) = sub_costs.monthly_usage_cost {
                usage = Some(usage.unwrap_or_default() + sub_usage);
            }
            costs.sub_resources.push(sub_costs);
        }

        if has_cost {
            costs.hourly_cost = Some(hourly);
            costs.monthly_cost = Some(monthly);
            costs.monthly_usage_cost = usage;
        }
        costs
    }
}

fn component_cost(
    component: &CostComponent,
    price: Option<Decimal>,
    config: &CostingConfig,
) -> ComponentCost {
    let monthly_quantity = component.monthly_quantity();
    let monthly_cost = price
        .zip(monthly_quantity)
        .map(|(price, quantity)| round(price * component.unit_multiplier * quantity, config));
    let hourly_cost = monthly_cost.map(|cost| round(cost / HOURS_PER_MONTH, config));

    ComponentCost {
        name: component.name.clone(),
        unit: component.unit.clone(),
        price,
        monthly_quantity,
        hourly_cost,
        monthly_cost,
        usage_based: component.usage_based,
    }
}

fn round(value: Decimal, config: &CostingConfig) -> Decimal {
    match config.cost_precision {
        Some(dp) => value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        None => value,
    }
}
