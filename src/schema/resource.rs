use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::cost_component::CostComponent;
use crate::{Error, Result};

/// A priced infrastructure resource and its billable parts.
///
/// Built once through [`ResourceBuilder`] and immutable afterwards, except for
/// a single [`Resource::multiply_quantities`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cost_components: Vec<CostComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sub_resources: Vec<Resource>,
    no_price: bool,
    is_skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_message: Option<String>,
    #[serde(skip)]
    scaled: bool,
}

impl Resource {
    pub fn builder(name: impl Into<String>) -> ResourceBuilder {
        ResourceBuilder::new(name)
    }

    /// A resource left out of the estimate, e.g. an unsupported SKU.
    pub fn skipped(name: impl Into<String>, message: impl Into<String>) -> Self {
        ResourceBuilder::new(name).skip(message)
    }

    /// A resource that is known to cost nothing.
    pub fn free(name: impl Into<String>) -> Self {
        ResourceBuilder::new(name).no_price()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    pub fn cost_components(&self) -> &[CostComponent] {
        &self.cost_components
    }

    pub fn sub_resources(&self) -> &[Resource] {
        &self.sub_resources
    }

    pub fn no_price(&self) -> bool {
        self.no_price
    }

    pub fn is_skipped(&self) -> bool {
        self.is_skipped
    }

    pub fn skip_message(&self) -> Option<&str> {
        self.skip_message.as_deref()
    }

    /// Whether [`Resource::multiply_quantities`] has been applied to this resource.
    pub fn is_scaled(&self) -> bool {
        self.scaled
    }

    pub fn has_usage_based_components(&self) -> bool {
        self.cost_components.iter().any(|c| c.usage_based)
            || self
                .sub_resources
                .iter()
                .any(Resource::has_usage_based_components)
    }

    /// All nested sub-resources, depth first, parents before children.
    pub fn flattened_sub_resources(&self) -> Vec<&Resource> {
        let mut flattened = Vec::with_capacity(self.sub_resources.len());
        for sub in &self.sub_resources {
            flattened.push(sub);
            flattened.extend(sub.flattened_sub_resources());
        }
        flattened
    }

    /// Multiplies every known quantity in this resource and all nested
    /// sub-resources by `factor`, for blocks that describe `factor` identical
    /// instances.
    ///
    /// Unknown quantities stay unknown; unit multipliers, filters and flags are
    /// untouched. Scaling compounds, so applying a factor `n` twice would give
    /// `n²`: the same resource accepts one call and returns
    /// [`Error::AlreadyScaled`] on the next. The guard covers only the resource
    /// it is called on. A child that was scaled before being nested is scaled
    /// again with its parent, so the factors multiply (disks per VM times VMs).
    pub fn multiply_quantities(mut self, factor: Decimal) -> Result<Self> {
        if self.scaled {
            return Err(Error::AlreadyScaled {
                resource: self.name,
            });
        }
        if factor < Decimal::ZERO {
            return Err(Error::NegativeFactor {
                resource: self.name,
                factor,
            });
        }

        debug!(resource = %self.name, %factor, "Scaling resource quantities");
        self.scale_tree(factor);
        self.scaled = true;
        Ok(self)
    }

    fn scale_tree(&mut self, factor: Decimal) {
        for component in &mut self.cost_components {
            component.quantity = component.quantity.scaled(factor);
        }
        for sub in &mut self.sub_resources {
            sub.scale_tree(factor);
        }
    }
}

/// Assembles a [`Resource`].
#[derive(Debug, Clone, Default)]
pub struct ResourceBuilder {
    name: String,
    resource_type: Option<String>,
    cost_components: Vec<CostComponent>,
    sub_resources: Vec<Resource>,
}

impl ResourceBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn cost_component(mut self, component: CostComponent) -> Self {
        self.cost_components.push(component);
        self
    }

    pub fn cost_components(mut self, components: impl IntoIterator<Item = CostComponent>) -> Self {
        self.cost_components.extend(components);
        self
    }

    pub fn sub_resource(mut self, resource: Resource) -> Self {
        self.sub_resources.push(resource);
        self
    }

    pub fn sub_resources(mut self, resources: impl IntoIterator<Item = Resource>) -> Self {
        self.sub_resources.extend(resources);
        self
    }

    pub fn build(self) -> Resource {
        Resource {
            name: self.name,
            resource_type: self.resource_type,
            cost_components: self.cost_components,
            sub_resources: self.sub_resources,
            no_price: false,
            is_skipped: false,
            skip_message: None,
            scaled: false,
        }
    }

    /// Finishes as a resource excluded from the estimate. Any components
    /// added so far are discarded.
    pub fn skip(self, message: impl Into<String>) -> Resource {
        let mut resource = self.into_terminal();
        resource.is_skipped = true;
        resource.skip_message = Some(message.into());
        resource
    }

    /// Finishes as a free resource. Any components added so far are discarded.
    pub fn no_price(self) -> Resource {
        let mut resource = self.into_terminal();
        resource.no_price = true;
        resource
    }

    fn into_terminal(self) -> Resource {
        Resource {
            name: self.name,
            resource_type: self.resource_type,
            cost_components: Vec::new(),
            sub_resources: Vec::new(),
            no_price: false,
            is_skipped: false,
            skip_message: None,
            scaled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Quantity;
    use rust_decimal_macros::dec;

    fn disk(name: &str, gb: Decimal) -> Resource {
        Resource::builder(name)
            .cost_component(CostComponent::monthly("Storage (S4, LRS)", "months", dec!(1)))
            .cost_component(CostComponent::monthly("Disk operations", "10K operations", gb).usage_based())
            .build()
    }

    #[test]
    fn test_build_preserves_order() {
        let r = Resource::builder("azurerm_storage_account.example")
            .resource_type("azurerm_storage_account")
            .cost_component(CostComponent::new("Capacity", "GB"))
            .cost_component(CostComponent::new("Write operations", "10K operations"))
            .cost_component(CostComponent::new("Read operations", "10K operations"))
            .build();

        let names: Vec<_> = r.cost_components().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Capacity", "Write operations", "Read operations"]);
        assert_eq!(r.resource_type(), Some("azurerm_storage_account"));
        assert!(!r.is_skipped());
        assert!(!r.no_price());
        assert!(!r.is_scaled());
    }

    #[test]
    fn test_multiply_scales_known_quantities() {
        let r = Resource::builder("vmss")
            .cost_component(CostComponent::hourly("Instance usage", "hours", dec!(1)))
            .cost_component(CostComponent::monthly("Data processed", "GB", dec!(2.5)))
            .cost_component(CostComponent::new("Requests", "1M requests"))
            .build()
            .multiply_quantities(dec!(4))
            .unwrap();

        let q: Vec<_> = r.cost_components().iter().map(|c| c.quantity).collect();
        assert_eq!(
            q,
            vec![
                Quantity::Hourly(dec!(4)),
                Quantity::Monthly(dec!(10)),
                Quantity::Unknown
            ]
        );
        assert!(r.is_scaled());
    }

    #[test]
    fn test_multiply_leaves_metadata_untouched() {
        let original = Resource::builder("queue")
            .cost_component(
                CostComponent::monthly("Operations", "10K operations", dec!(3))
                    .with_unit_multiplier(dec!(10000))
                    .usage_based()
                    .ignore_if_missing_price(),
            )
            .build();
        let scaled = original.clone().multiply_quantities(dec!(2)).unwrap();

        let before = &original.cost_components()[0];
        let after = &scaled.cost_components()[0];
        assert_eq!(after.unit_multiplier, before.unit_multiplier);
        assert_eq!(after.usage_based, before.usage_based);
        assert_eq!(after.ignore_if_missing_price, before.ignore_if_missing_price);
        assert_eq!(after.name, before.name);
        assert_eq!(after.monthly_quantity(), Some(dec!(6)));
    }

    #[test]
    fn test_multiply_reaches_every_depth() {
        let mut leaf = disk("level-3", dec!(1));
        for depth in (0..3).rev() {
            leaf = Resource::builder(format!("level-{depth}"))
                .cost_component(CostComponent::hourly("Compute", "hours", dec!(1)))
                .sub_resource(leaf)
                .build();
        }

        let scaled = leaf.multiply_quantities(dec!(3)).unwrap();
        assert_eq!(scaled.flattened_sub_resources().len(), 3);
        for sub in scaled.flattened_sub_resources() {
            for c in sub.cost_components() {
                let expected = match c.quantity {
                    Quantity::Hourly(_) => dec!(3) * dec!(730),
                    _ => dec!(3),
                };
                assert_eq!(c.monthly_quantity(), Some(expected), "{}", sub.name());
            }
        }
    }

    #[test]
    fn test_multiply_twice_rejected() {
        let r = disk("os_disk", dec!(1)).multiply_quantities(dec!(2)).unwrap();
        let err = r.multiply_quantities(dec!(2)).unwrap_err();
        assert!(matches!(err, Error::AlreadyScaled { resource } if resource == "os_disk"));
    }

    #[test]
    fn test_multiply_by_one_is_recorded() {
        let r = disk("os_disk", dec!(5)).multiply_quantities(Decimal::ONE).unwrap();
        assert_eq!(r.cost_components()[1].monthly_quantity(), Some(dec!(5)));
        assert!(r.is_scaled());
    }

    #[test]
    fn test_negative_factor_rejected() {
        let err = disk("os_disk", dec!(1))
            .multiply_quantities(dec!(-1))
            .unwrap_err();
        assert!(matches!(err, Error::NegativeFactor { .. }));
    }

    #[test]
    fn test_scaled_child_compounds_with_parent() {
        let disks = disk("data_disk", dec!(1)).multiply_quantities(dec!(2)).unwrap();
        let vm = Resource::builder("vm")
            .sub_resource(disks)
            .build()
            .multiply_quantities(dec!(3))
            .unwrap();
        assert_eq!(
            vm.sub_resources()[0].cost_components()[0].monthly_quantity(),
            Some(dec!(6))
        );
    }

    #[test]
    fn test_skipped_resource_is_terminal() {
        let r = Resource::builder("azurerm_app_service_plan.free")
            .cost_component(CostComponent::hourly("Instance usage", "hours", dec!(1)))
            .sub_resource(disk("disk", dec!(1)))
            .skip("Free SKU is not supported");

        assert!(r.is_skipped());
        assert_eq!(r.skip_message(), Some("Free SKU is not supported"));
        assert!(r.cost_components().is_empty());
        assert!(r.sub_resources().is_empty());

        let r = r.multiply_quantities(dec!(10)).unwrap();
        assert!(r.is_skipped());
        assert!(r.cost_components().is_empty());
    }

    #[test]
    fn test_free_resource() {
        let r = Resource::free("aws_iam_role.example");
        assert!(r.no_price());
        assert!(!r.is_skipped());
        assert!(r.cost_components().is_empty());
    }

    #[test]
    fn test_flattened_order_is_depth_first() {
        let r = Resource::builder("root")
            .sub_resource(
                Resource::builder("a")
                    .sub_resource(Resource::builder("a.1").build())
                    .build(),
            )
            .sub_resource(Resource::builder("b").build())
            .build();
        let names: Vec<_> = r.flattened_sub_resources().into_iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["a", "a.1", "b"]);
    }

    #[test]
    fn test_has_usage_based_components_checks_children() {
        let r = Resource::builder("vm").sub_resource(disk("disk", dec!(1))).build();
        assert!(r.has_usage_based_components());
        assert!(!Resource::builder("empty").build().has_usage_based_components());
    }

    #[test]
    fn test_serialize_omits_scale_marker() {
        let r = disk("disk", dec!(1)).multiply_quantities(dec!(2)).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("scaled").is_none());
        assert_eq!(json["name"], "disk");
        assert_eq!(json["costComponents"][0]["quantity"]["value"], "2");
    }
}
