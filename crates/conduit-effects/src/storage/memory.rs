//! In-memory resource store for testing and simulations

use conduit_core::effects::ResourceStoreEffects;
use conduit_core::{Action, Actor, Resource, ResourceAmount};
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::trace;

#[derive(Debug, Default)]
struct StoreState {
    amounts: IndexMap<Resource, u64>,
    last_actor: Option<Actor>,
}

fn saturating_total(amounts: &IndexMap<Resource, u64>) -> u64 {
    amounts.values().copied().fold(0, u64::saturating_add)
}

/// Insertion-ordered store with an optional total capacity.
///
/// Enumeration order follows first insertion; a resource that drains to zero
/// is removed and goes to the back if it is inserted again.
#[derive(Debug, Default)]
pub struct MemoryResourceStore {
    state: RwLock<StoreState>,
    capacity: Option<u64>,
}

impl MemoryResourceStore {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that holds at most `capacity` units in total
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            state: RwLock::default(),
            capacity: Some(capacity),
        }
    }

    /// Create an unbounded store pre-filled with `contents`
    pub fn with_contents(contents: impl IntoIterator<Item = ResourceAmount>) -> Self {
        let store = Self::new();
        for entry in contents {
            store.set_amount(entry.resource, entry.amount);
        }
        store
    }

    /// Overwrite the amount held for `resource`, bypassing capacity.
    ///
    /// Stands in for mutations made by other network participants.
    pub fn set_amount(&self, resource: impl Into<Resource>, amount: u64) {
        let resource = resource.into();
        let mut state = self.state.write();
        if amount == 0 {
            state.amounts.shift_remove(&resource);
        } else {
            state.amounts.insert(resource, amount);
        }
    }

    /// Amount held for `resource`
    pub fn amount_of(&self, resource: &Resource) -> u64 {
        self.state.read().amounts.get(resource).copied().unwrap_or(0)
    }

    /// Number of distinct resources held
    pub fn distinct_count(&self) -> usize {
        self.state.read().amounts.len()
    }

    /// Total units across all resources
    pub fn total_units(&self) -> u64 {
        saturating_total(&self.state.read().amounts)
    }

    /// Actor of the last committed mutation
    pub fn last_actor(&self) -> Option<Actor> {
        self.state.read().last_actor.clone()
    }
}

impl ResourceStoreEffects for MemoryResourceStore {
    fn enumerate_all(&self) -> Vec<ResourceAmount> {
        self.state
            .read()
            .amounts
            .iter()
            .filter(|(_, amount)| **amount > 0)
            .map(|(resource, amount)| ResourceAmount::new(resource.clone(), *amount))
            .collect()
    }

    fn insert(&self, resource: &Resource, amount: u64, action: Action, actor: &Actor) -> u64 {
        let mut state = self.state.write();
        let accepted = match self.capacity {
            Some(capacity) => {
                let used = saturating_total(&state.amounts);
                amount.min(capacity.saturating_sub(used))
            }
            None => amount,
        };

        if action == Action::Execute && accepted > 0 {
            let held = state.amounts.entry(resource.clone()).or_insert(0);
            *held = held.saturating_add(accepted);
            state.last_actor = Some(actor.clone());
            trace!(actor = actor.name(), ?resource, accepted, "store insert");
        }
        accepted
    }

    fn extract(&self, resource: &Resource, amount: u64, action: Action, actor: &Actor) -> u64 {
        let mut state = self.state.write();
        let held = state.amounts.get(resource).copied().unwrap_or(0);
        let extracted = amount.min(held);

        if action == Action::Execute && extracted > 0 {
            if extracted == held {
                state.amounts.shift_remove(resource);
            } else {
                state.amounts.insert(resource.clone(), held - extracted);
            }
            state.last_actor = Some(actor.clone());
            trace!(actor = actor.name(), ?resource, extracted, "store extract");
        }
        extracted
    }
}
