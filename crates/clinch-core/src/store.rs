//! Render-side parameter storage.
//!
//! One atomic slot per descriptor, seeded with defaults. This is the single
//! synchronization point of the whole core: the control context writes into
//! it, the render callback reads from it once per block, and neither side
//! ever takes a lock the other could hold.
//!
//! Writes clamp into the descriptor's range and bump a per-slot change epoch.
//! The control surface compares epochs to pick up host-automation writes in
//! a coalesced fashion: if the host wrote a slot N times between two polls,
//! exactly one refresh fires with the latest value.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::lockfree::AtomicFloat;
use crate::param::{ParameterAddress, ValueRange};
use crate::tree::ParameterTree;

struct Slot {
    // AtomicFloat is cache-line aligned, so adjacent slots never share a line.
    value: AtomicFloat,
    epoch: AtomicU32,
}

/// Current parameter values as seen by the render engine.
pub struct RenderParameterStore {
    slots: Vec<Slot>,
    ranges: Vec<ValueRange>,
    by_address: HashMap<ParameterAddress, usize>,
}

impl RenderParameterStore {
    /// Create a store for a validated tree, every slot at its default.
    pub fn new(tree: &ParameterTree) -> Self {
        let mut slots = Vec::with_capacity(tree.len());
        let mut ranges = Vec::with_capacity(tree.len());
        let mut by_address = HashMap::with_capacity(tree.len());

        for (index, spec) in tree.params().enumerate() {
            slots.push(Slot {
                value: AtomicFloat::new(spec.default),
                epoch: AtomicU32::new(0),
            });
            ranges.push(spec.range);
            by_address.insert(spec.address, index);
        }

        Self {
            slots,
            ranges,
            by_address,
        }
    }

    /// Dense slot index for an address.
    ///
    /// # Panics
    ///
    /// Panics on an unknown address. The tree's shape is fixed and validated
    /// at construction, so an unknown address is a programming error, not a
    /// recoverable condition.
    pub fn slot_index(&self, address: ParameterAddress) -> usize {
        match self.by_address.get(&address) {
            Some(&index) => index,
            None => panic!("no parameter at address {address}"),
        }
    }

    /// Clamp `value` into the parameter's range and store it.
    ///
    /// Safe to call from the control context or the render callback; never
    /// blocks either. Out-of-range values clamp, they do not error; a NaN
    /// lands at the range minimum.
    pub fn write(&self, address: ParameterAddress, value: f32) -> f32 {
        self.write_indexed(self.slot_index(address), value)
    }

    /// [`write`](Self::write) by pre-resolved slot index. Returns the
    /// clamped value that was stored.
    #[inline]
    pub fn write_indexed(&self, index: usize, value: f32) -> f32 {
        let clamped = self.ranges[index].clamp(value);
        let slot = &self.slots[index];
        // Value first, then epoch: a reader that observes the new epoch is
        // guaranteed to observe the new value.
        slot.value.set(clamped);
        slot.epoch.fetch_add(1, Ordering::Release);
        clamped
    }

    /// Current value at an address.
    pub fn read(&self, address: ParameterAddress) -> f32 {
        self.read_indexed(self.slot_index(address))
    }

    /// Lock-free read by slot index: bounded time, no allocation, no system
    /// calls. This is the per-block render-path read.
    #[inline]
    pub fn read_indexed(&self, index: usize) -> f32 {
        self.slots[index].value.get()
    }

    /// Change epoch for a slot. Bumped on every write.
    #[inline]
    pub fn epoch_indexed(&self, index: usize) -> u32 {
        self.slots[index].epoch.load(Ordering::Acquire)
    }

    /// Range the slot clamps into.
    pub fn range_indexed(&self, index: usize) -> ValueRange {
        self.ranges[index]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
