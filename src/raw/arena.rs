use alloc::collections::TryReserveError;
use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes.
///
/// Slots are only ever appended. Freeing one leaves a tombstone behind, so a
/// handle to a freed element keeps reading as absent until the arena is cleared.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    live: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new(), live: 0 }
    }

    /// Reserves room for exactly `capacity` elements, reporting allocation failure
    /// instead of aborting.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        Ok(Self { slots, live: 0 })
    }

    pub(crate) const fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.live
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        // Strict less-than keeps the element count within Handle::MAX.
        assert!(
            self.slots.len() < Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(Some(element));
        self.live += 1;
        Handle::from_index(self.slots.len() - 1)
    }

    /// Returns true if `handle` refers to a live element.
    #[inline]
    pub(crate) const fn contains(&self, handle: Handle) -> bool {
        let index = handle.to_index();
        let slots = self.slots.as_slice();
        index < slots.len() && slots[index].is_some()
    }

    #[inline]
    pub(crate) fn try_get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.to_index()).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.try_get(handle).expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Drops the element behind `handle`, leaving its slot tombstoned.
    pub(crate) fn free(&mut self, handle: Handle) {
        let element = self.slots[handle.to_index()].take().expect("`Arena::free()` - `handle` is invalid!");
        self.live -= 1;
        drop(element);
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }
}
