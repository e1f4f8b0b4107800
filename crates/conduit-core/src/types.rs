//! Resource data model
//!
//! Resources are identified by value: two [`ItemResource`]s with the same id
//! are the same resource type. The storage network tracks quantities per
//! resource and never per slot, so nothing in here carries a position.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stack size assumed for items that do not declare one.
pub const DEFAULT_MAX_STACK_SIZE: u32 = 64;

/// Identifier of a block or device kind (e.g. `"conduit:storage_interface"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindId(String);

impl KindId {
    /// Create a kind identifier from a namespaced name.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The namespaced name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KindId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An item type together with the largest amount one slot may hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemResource {
    /// Namespaced item id
    pub id: String,
    /// Maximum stack size for this item kind
    pub max_stack_size: u32,
}

impl ItemResource {
    /// Create an item resource with the default stack size of 64.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_max_stack(id, DEFAULT_MAX_STACK_SIZE)
    }

    /// Create an item resource with an explicit stack size.
    pub fn with_max_stack(id: impl Into<String>, max_stack_size: u32) -> Self {
        Self {
            id: id.into(),
            max_stack_size,
        }
    }
}

/// A fluid type. Fluids live in the network but have no slot representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FluidResource {
    /// Namespaced fluid id
    pub id: String,
}

impl FluidResource {
    /// Create a fluid resource.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Any resource the storage network can hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// A stackable item
    Item(ItemResource),
    /// A fluid
    Fluid(FluidResource),
}

impl Resource {
    /// The item behind this resource, if it is one.
    pub fn as_item(&self) -> Option<&ItemResource> {
        match self {
            Resource::Item(item) => Some(item),
            Resource::Fluid(_) => None,
        }
    }
}

impl From<ItemResource> for Resource {
    fn from(item: ItemResource) -> Self {
        Resource::Item(item)
    }
}

impl From<FluidResource> for Resource {
    fn from(fluid: FluidResource) -> Self {
        Resource::Fluid(fluid)
    }
}

/// A resource and the quantity the network holds of it.
///
/// Stores never enumerate entries with a zero amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAmount {
    /// The resource
    pub resource: Resource,
    /// Quantity held, always greater than zero when enumerated
    pub amount: u64,
}

impl ResourceAmount {
    /// Pair a resource with an amount.
    pub fn new(resource: impl Into<Resource>, amount: u64) -> Self {
        Self {
            resource: resource.into(),
            amount,
        }
    }
}

/// An item and a count, as handed across the slot protocol.
///
/// Empty stacks are never constructed; callers see `Option<ItemStack>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// The item
    pub item: ItemResource,
    /// Number of units in this stack
    pub count: u64,
}

impl ItemStack {
    /// Build a stack, returning `None` for a zero count.
    pub fn new(item: ItemResource, count: u64) -> Option<Self> {
        (count > 0).then_some(Self { item, count })
    }

    /// The same stack with its count limited to the item's max stack size.
    /// An item that cannot stack at all yields `None`.
    pub fn capped(self) -> Option<Self> {
        let count = self.count.min(u64::from(self.item.max_stack_size));
        Self::new(self.item, count)
    }
}

/// Whether a store mutation is committed or only computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Report what would happen without mutating the store
    Simulate,
    /// Perform the mutation
    Execute,
}

impl Action {
    /// Map the foreign protocol's `simulate` flag onto an action.
    pub fn from_simulate(simulate: bool) -> Self {
        if simulate {
            Action::Simulate
        } else {
            Action::Execute
        }
    }
}

/// Identity a device presents to the store when mutating it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor(String);

impl Actor {
    /// Create an actor name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The actor name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&KindId> for Actor {
    fn from(kind: &KindId) -> Self {
        Self::new(kind.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_identity_is_value_based() {
        let a = ItemResource::new("minecraft:stone");
        let b = ItemResource::new("minecraft:stone");
        assert_eq!(Resource::from(a), Resource::from(b));
    }

    #[test]
    fn test_zero_count_stack_is_empty() {
        assert!(ItemStack::new(ItemResource::new("minecraft:dirt"), 0).is_none());
    }

    #[test]
    fn test_capped_stack_respects_max_stack_size() {
        let pearl = ItemResource::with_max_stack("minecraft:ender_pearl", 16);
        let stack = ItemStack::new(pearl, 70).unwrap().capped().unwrap();
        assert_eq!(stack.count, 16);
    }

    #[test]
    fn test_unstackable_item_caps_to_nothing() {
        let ghost = ItemResource::with_max_stack("mod:ghost", 0);
        assert_eq!(ItemStack::new(ghost, 5).unwrap().capped(), None);
    }

    #[test]
    fn test_simulate_flag_maps_to_action() {
        assert_eq!(Action::from_simulate(true), Action::Simulate);
        assert_eq!(Action::from_simulate(false), Action::Execute);
    }

    proptest::proptest! {
        #[test]
        fn capped_never_exceeds_max_stack(count in 1u64..10_000, max in 1u32..=64) {
            let item = ItemResource::with_max_stack("minecraft:cobblestone", max);
            let stack = ItemStack::new(item, count).unwrap().capped().unwrap();
            proptest::prop_assert!(stack.count <= u64::from(max));
            proptest::prop_assert_eq!(stack.count, count.min(u64::from(max)));
        }
    }

    #[test]
    fn test_fluid_is_not_an_item() {
        let water = Resource::from(FluidResource::new("minecraft:water"));
        assert!(water.as_item().is_none());
    }
}
