//! Resource store contract.
//!
//! The store is an unordered, quantity-based multiset shared by every
//! participant of a storage network. Each call is atomic with respect to its
//! own [`Action`], but nothing holds across calls: another participant may
//! mutate the store between two calls from the same caller.

use crate::types::{Action, Actor, Resource, ResourceAmount};
use std::sync::Arc;

/// Operations Conduit requires from a storage network's resource store.
pub trait ResourceStoreEffects: Send + Sync {
    /// Snapshot of every resource with a non-zero amount.
    ///
    /// Order is whatever the store yields and may differ between calls once
    /// contents change.
    fn enumerate_all(&self) -> Vec<ResourceAmount>;

    /// Insert up to `amount` of `resource`, returning how much was (or would
    /// be, for [`Action::Simulate`]) accepted.
    fn insert(&self, resource: &Resource, amount: u64, action: Action, actor: &Actor) -> u64;

    /// Extract up to `amount` of `resource`, returning how much was (or would
    /// be) removed.
    fn extract(&self, resource: &Resource, amount: u64, action: Action, actor: &Actor) -> u64;
}

impl<T: ResourceStoreEffects + ?Sized> ResourceStoreEffects for Arc<T> {
    fn enumerate_all(&self) -> Vec<ResourceAmount> {
        (**self).enumerate_all()
    }

    fn insert(&self, resource: &Resource, amount: u64, action: Action, actor: &Actor) -> u64 {
        (**self).insert(resource, amount, action, actor)
    }

    fn extract(&self, resource: &Resource, amount: u64, action: Action, actor: &Actor) -> u64 {
        (**self).extract(resource, amount, action, actor)
    }
}
