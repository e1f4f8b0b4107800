//! Slot-indexed view over a storage network
//!
//! The storage network holds quantities per resource; the inventory protocol
//! addresses numbered slots. [`SlotViewAdapter`] bridges the two by treating
//! the n-th item of an enumeration as slot n, followed by one overflow slot
//! that accepts insertions.
//!
//! Slot counts are requested far more often than contents, so the count is
//! cached for [`CACHE_WINDOW`]. Contents, insertion and extraction always
//! enumerate the store afresh: a stale slot to resource mapping could send an
//! extraction to the wrong resource once other participants change the
//! network. Slot `i` is therefore only meaningful within a single call.

use conduit_core::effects::{PhysicalTime, PhysicalTimeEffects, ResourceStoreEffects};
use conduit_core::{Action, Actor, ItemResource, ItemStack, Resource};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// How long a sampled slot count is reused.
pub const CACHE_WINDOW: Duration = Duration::from_millis(1_000);

/// Capacity reported for the overflow slot.
pub const OVERFLOW_SLOT_CAPACITY: u32 = 64;

/// Resolves the store a view should talk to, if any.
///
/// `None` means unreachable: not attached, not powered, or the network has
/// no store. Every view operation degrades to its empty result in that case.
pub trait StorageAccess: Send + Sync {
    /// The reachable store, if any.
    fn storage(&self) -> Option<Arc<dyn ResourceStoreEffects>>;
}

impl<T: StorageAccess + ?Sized> StorageAccess for Arc<T> {
    fn storage(&self) -> Option<Arc<dyn ResourceStoreEffects>> {
        (**self).storage()
    }
}

/// The slot-indexed inventory protocol.
pub trait SlotInventory {
    /// Number of addressable slots, including the overflow slot.
    fn slot_count(&mut self) -> usize;

    /// Largest stack `slot` may report.
    fn slot_capacity(&self, slot: usize) -> u32;

    /// Whether `item` may be inserted at `slot`.
    fn is_valid_destination(&self, slot: usize, item: &ItemResource) -> bool;

    /// What `slot` holds right now.
    fn contents_of(&self, slot: usize) -> Option<ItemStack>;

    /// Insert up to `quantity` units of `item`, returning the accepted amount.
    /// The caller keeps the remainder.
    fn insert(&self, slot: usize, item: &ItemResource, quantity: i64, action: Action) -> u64;

    /// Extract up to `max_quantity` units of whatever `slot` holds.
    fn extract(&self, slot: usize, max_quantity: i64, action: Action) -> Option<ItemStack>;
}

/// Cached slot count and when it was sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheState {
    cached_count: usize,
    last_sample: Option<PhysicalTime>,
}

impl CacheState {
    /// Whether the cached count may be reused at `now`.
    pub fn is_fresh(&self, now: PhysicalTime) -> bool {
        self.last_sample
            .is_some_and(|sampled| now.saturating_since(sampled) < CACHE_WINDOW)
    }

    /// Number of item slots at the last sample, excluding the overflow slot.
    pub fn cached_count(&self) -> usize {
        self.cached_count
    }

    /// When the count was last sampled, if ever.
    pub fn last_sample(&self) -> Option<PhysicalTime> {
        self.last_sample
    }
}

/// Slot view over whatever store `access` currently resolves to.
pub struct SlotViewAdapter {
    access: Arc<dyn StorageAccess>,
    clock: Arc<dyn PhysicalTimeEffects>,
    actor: Actor,
    cache: CacheState,
}

impl SlotViewAdapter {
    /// Create a view mutating the store as `actor`.
    pub fn new(
        access: Arc<dyn StorageAccess>,
        clock: Arc<dyn PhysicalTimeEffects>,
        actor: Actor,
    ) -> Self {
        Self {
            access,
            clock,
            actor,
            cache: CacheState::default(),
        }
    }

    /// Current cache bookkeeping.
    pub fn cache_state(&self) -> CacheState {
        self.cache
    }

    /// Actor presented to the store.
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Insert a whole stack and return what did not fit.
    pub fn insert_stack(&self, slot: usize, stack: ItemStack, action: Action) -> Option<ItemStack> {
        let requested = i64::try_from(stack.count).unwrap_or(i64::MAX);
        let accepted = self.insert(slot, &stack.item, requested, action);
        ItemStack::new(stack.item, stack.count.saturating_sub(accepted))
    }

    fn refresh(&mut self, now: PhysicalTime) {
        let count = match self.access.storage() {
            Some(store) => items_in(store.as_ref()).len(),
            None => 0,
        };
        trace!(
            previous = self.cache.cached_count,
            count,
            ts_ms = now.ts_ms,
            "slot count resampled"
        );
        self.cache = CacheState {
            cached_count: count,
            last_sample: Some(now),
        };
    }

    fn item_at(&self, store: &dyn ResourceStoreEffects, slot: usize) -> Option<(ItemResource, u64)> {
        items_in(store).into_iter().nth(slot)
    }
}

impl SlotInventory for SlotViewAdapter {
    fn slot_count(&mut self) -> usize {
        let now = self.clock.physical_time();
        if !self.cache.is_fresh(now) {
            self.refresh(now);
        }
        self.cache.cached_count + 1
    }

    fn slot_capacity(&self, slot: usize) -> u32 {
        self.access
            .storage()
            .and_then(|store| self.item_at(store.as_ref(), slot))
            .map_or(OVERFLOW_SLOT_CAPACITY, |(item, _)| item.max_stack_size)
    }

    fn is_valid_destination(&self, _slot: usize, _item: &ItemResource) -> bool {
        self.access.storage().is_some()
    }

    fn contents_of(&self, slot: usize) -> Option<ItemStack> {
        let store = self.access.storage()?;
        let (item, amount) = self.item_at(store.as_ref(), slot)?;
        ItemStack::new(item, amount).and_then(ItemStack::capped)
    }

    fn insert(&self, _slot: usize, item: &ItemResource, quantity: i64, action: Action) -> u64 {
        let Ok(quantity) = u64::try_from(quantity) else {
            return 0;
        };
        if quantity == 0 {
            return 0;
        }
        let Some(store) = self.access.storage() else {
            return 0;
        };
        store.insert(&Resource::Item(item.clone()), quantity, action, &self.actor)
    }

    fn extract(&self, slot: usize, max_quantity: i64, action: Action) -> Option<ItemStack> {
        let max_quantity = u64::try_from(max_quantity).ok().filter(|q| *q > 0)?;
        let store = self.access.storage()?;
        let (item, _) = self.item_at(store.as_ref(), slot)?;
        let extracted = store.extract(
            &Resource::Item(item.clone()),
            max_quantity,
            action,
            &self.actor,
        );
        ItemStack::new(item, extracted)
    }
}

/// Items of an enumeration in store order; other resource kinds have no slot.
fn items_in(store: &dyn ResourceStoreEffects) -> Vec<(ItemResource, u64)> {
    store
        .enumerate_all()
        .into_iter()
        .filter(|entry| entry.amount > 0)
        .filter_map(|entry| match entry.resource {
            Resource::Item(item) => Some((item, entry.amount)),
            Resource::Fluid(_) => None,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use conduit_core::FluidResource;
    use conduit_effects::{MemoryResourceStore, SimulatedClock};
    use parking_lot::RwLock;

    /// Access whose reachability the test flips directly.
    struct Toggle(RwLock<Option<Arc<MemoryResourceStore>>>);

    impl StorageAccess for Toggle {
        fn storage(&self) -> Option<Arc<dyn ResourceStoreEffects>> {
            self.0
                .read()
                .clone()
                .map(|s| s as Arc<dyn ResourceStoreEffects>)
        }
    }

    struct Fixture {
        store: Arc<MemoryResourceStore>,
        access: Arc<Toggle>,
        clock: SimulatedClock,
        view: SlotViewAdapter,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryResourceStore::new());
        let access = Arc::new(Toggle(RwLock::new(Some(store.clone()))));
        let clock = SimulatedClock::new(10_000);
        let view = SlotViewAdapter::new(
            access.clone(),
            Arc::new(clock.clone()),
            Actor::new("conduit:test"),
        );
        Fixture {
            store,
            access,
            clock,
            view,
        }
    }

    fn item(id: &str) -> ItemResource {
        ItemResource::new(id)
    }

    #[test]
    fn test_first_call_samples_even_at_clock_zero() {
        let store = Arc::new(MemoryResourceStore::new());
        store.set_amount(item("a:x"), 1);
        let access = Arc::new(Toggle(RwLock::new(Some(store))));
        let mut view = SlotViewAdapter::new(
            access,
            Arc::new(SimulatedClock::new_at_epoch()),
            Actor::new("conduit:test"),
        );
        assert_eq!(view.slot_count(), 2);
    }

    #[test]
    fn test_count_is_cached_within_window() {
        let mut f = fixture();
        assert_eq!(f.view.cache_state().last_sample(), None);
        f.store.set_amount(item("a:one"), 3);
        assert_eq!(f.view.slot_count(), 2);
        assert_eq!(
            f.view.cache_state().last_sample(),
            Some(PhysicalTime::from_millis(10_000))
        );

        f.store.set_amount(item("a:two"), 3);
        f.clock.advance_ms(999);
        assert_eq!(f.view.slot_count(), 2);
        assert_eq!(f.view.cache_state().cached_count(), 1);

        f.clock.advance_ms(1);
        assert_eq!(f.view.slot_count(), 3);
        let cache = f.view.cache_state();
        assert_eq!(cache.cached_count(), 2);
        assert_eq!(cache.last_sample(), Some(PhysicalTime::from_millis(11_000)));
    }

    #[test]
    fn test_unreachable_store_has_only_overflow_slot() {
        let mut f = fixture();
        f.store.set_amount(item("a:one"), 3);
        *f.access.0.write() = None;

        assert_eq!(f.view.slot_count(), 1);
        assert_eq!(f.view.contents_of(0), None);
        assert!(!f.view.is_valid_destination(0, &item("a:one")));
        assert_eq!(f.view.insert(0, &item("a:one"), 5, Action::Execute), 0);
        assert_eq!(f.view.extract(0, 5, Action::Execute), None);
        assert_eq!(f.store.amount_of(&item("a:one").into()), 3);
    }

    #[test]
    fn test_fluids_have_no_slot() {
        let mut f = fixture();
        f.store.set_amount(FluidResource::new("minecraft:water"), 1_000);
        f.store.set_amount(item("a:one"), 3);

        assert_eq!(f.view.slot_count(), 2);
        assert_eq!(f.view.contents_of(0).unwrap().item, item("a:one"));
        assert_eq!(f.view.contents_of(1), None);
    }

    #[test]
    fn test_contents_are_capped_at_max_stack() {
        let f = fixture();
        let pearl = ItemResource::with_max_stack("minecraft:ender_pearl", 16);
        f.store.set_amount(pearl.clone(), 40);
        assert_eq!(f.view.contents_of(0), ItemStack::new(pearl, 16));
    }

    #[test]
    fn test_unstackable_item_shows_an_empty_slot() {
        let mut f = fixture();
        f.store.set_amount(ItemResource::with_max_stack("mod:ghost", 0), 9);
        assert_eq!(f.view.slot_count(), 2);
        assert_eq!(f.view.contents_of(0), None);
        assert_eq!(f.view.slot_capacity(0), 0);
    }

    #[test]
    fn test_slot_capacity() {
        let f = fixture();
        f.store.set_amount(ItemResource::with_max_stack("minecraft:egg", 16), 2);
        assert_eq!(f.view.slot_capacity(0), 16);
        assert_eq!(f.view.slot_capacity(1), OVERFLOW_SLOT_CAPACITY);
        assert_eq!(f.view.slot_capacity(500), OVERFLOW_SLOT_CAPACITY);
    }

    #[test]
    fn test_non_positive_quantities_are_noops() {
        let f = fixture();
        f.store.set_amount(item("a:one"), 3);
        assert_eq!(f.view.insert(0, &item("a:one"), 0, Action::Execute), 0);
        assert_eq!(f.view.insert(0, &item("a:one"), -4, Action::Execute), 0);
        assert_eq!(f.view.extract(0, 0, Action::Execute), None);
        assert_eq!(f.view.extract(0, -1, Action::Execute), None);
        assert_eq!(f.store.amount_of(&item("a:one").into()), 3);
    }

    #[test]
    fn test_insert_ignores_target_slot() {
        let f = fixture();
        assert_eq!(f.view.insert(42, &item("a:one"), 8, Action::Execute), 8);
        assert_eq!(f.store.amount_of(&item("a:one").into()), 8);
        assert_eq!(f.store.last_actor().as_ref(), Some(f.view.actor()));
    }

    #[test]
    fn test_insert_stack_returns_remainder() {
        let store = Arc::new(MemoryResourceStore::with_capacity(10));
        let access = Arc::new(Toggle(RwLock::new(Some(store))));
        let view = SlotViewAdapter::new(
            access,
            Arc::new(SimulatedClock::default()),
            Actor::new("conduit:test"),
        );
        let stack = ItemStack::new(item("a:one"), 25).unwrap();
        let remainder = view.insert_stack(0, stack, Action::Execute);
        assert_eq!(remainder, ItemStack::new(item("a:one"), 15));
    }

    #[test]
    fn test_extract_resolves_slot_freshly() {
        let mut f = fixture();
        f.store.set_amount(item("a:one"), 3);
        f.store.set_amount(item("a:two"), 5);
        assert_eq!(f.view.slot_count(), 3);

        // Another participant drains the first resource; slot 0 now means a:two.
        f.store.set_amount(item("a:one"), 0);
        let extracted = f.view.extract(0, 64, Action::Execute).unwrap();
        assert_eq!(extracted, ItemStack::new(item("a:two"), 5).unwrap());
        assert_eq!(f.view.extract(1, 64, Action::Execute), None);
    }
}
