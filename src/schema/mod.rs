//! Resource cost trees.
//!
//! A [`Resource`] owns an ordered list of [`CostComponent`]s and nested
//! sub-resources (a VM's disks, a gateway's per-zone transfer tiers). Resource
//! definitions build the tree once, optionally scale it for an instance count,
//! and hand it to pricing.
//!
//! ```rust
//! use cloudcost::schema::{CostComponent, Resource};
//! use rust_decimal_macros::dec;
//!
//! # fn main() -> cloudcost::Result<()> {
//! let scale_set = Resource::builder("azurerm_linux_virtual_machine_scale_set.web")
//!     .cost_component(CostComponent::hourly("Instance usage", "hours", dec!(1)))
//!     .sub_resource(
//!         Resource::builder("os_disk")
//!             .cost_component(CostComponent::monthly("Storage (S4, LRS)", "months", dec!(1)))
//!             .build(),
//!     )
//!     .build()
//!     .multiply_quantities(dec!(3))?;
//!
//! assert_eq!(scale_set.cost_components()[0].monthly_quantity(), Some(dec!(2190)));
//! # Ok(())
//! # }
//! ```

mod cost_component;
pub mod costs;
pub mod filter;
mod quantity;
mod resource;

pub use cost_component::CostComponent;
pub use costs::{ComponentCost, PriceResolver, ResourceCosts, StaticPrices};
pub use filter::{AttributeFilter, PriceFilter, ProductFilter};
pub use quantity::{
    DAY_TO_MONTH_UNIT_MULTIPLIER, DAYS_IN_MONTH, HOURS_PER_MONTH, MONTH_TO_HOUR_MULTIPLIER, Quantity,
};
pub use resource::{Resource, ResourceBuilder};
