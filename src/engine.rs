//! Engine shell: owns the tree, the store, and the meter, and hands each
//! execution context its view of them.

use std::sync::Arc;

use clinch_bridge::ControlSurface;
use clinch_core::{
    GainReductionMeter, GroupSpec, MeterTap, ParameterAddress, ParameterSnapshot, ParameterTree,
    RenderParameterStore, Result,
};

/// One plugin instance's parameter and telemetry bridge.
///
/// Construction validates the parameter tree and asserts every default into
/// the render-side store; the engine never starts with an invalid tree.
/// Afterwards the engine hands out two views: [`publish`](Self::publish) for
/// the control context and [`render_handle`](Self::render_handle) for the
/// render context.
///
/// # Example
///
/// ```
/// use clinch::{params, ClinchEngine};
///
/// let engine = ClinchEngine::new(params::parameter_tree()).unwrap();
/// let surface = engine.publish();
/// let render = engine.render_handle();
///
/// // Control context: knob edit.
/// surface.root().parameter("compress").set_value(7.0);
///
/// // Render context: per-block reads and metering publish.
/// let slot = render.slot_index(params::address::COMPRESS);
/// assert_eq!(render.parameter(slot), 7.0);
/// render.publish_gain_reduction(4.2);
///
/// assert_eq!(surface.gain_reduction_db(), 4.2);
/// ```
pub struct ClinchEngine {
    tree: Arc<ParameterTree>,
    store: Arc<RenderParameterStore>,
    meter: Arc<GainReductionMeter>,
}

impl ClinchEngine {
    /// Build and validate the parameter tree, create the store (defaults
    /// asserted) and the metering channel. Fatal on any tree invariant
    /// violation.
    pub fn new(root: GroupSpec) -> Result<Self> {
        let tree = Arc::new(ParameterTree::build(root)?);
        let store = Arc::new(RenderParameterStore::new(&tree));
        let meter = Arc::new(GainReductionMeter::new());
        tracing::debug!(parameters = tree.len(), "parameter tree validated");
        Ok(Self { tree, store, meter })
    }

    /// The validated tree, shared read-only.
    pub fn tree(&self) -> &Arc<ParameterTree> {
        &self.tree
    }

    /// The render-side store.
    pub fn store(&self) -> &Arc<RenderParameterStore> {
        &self.store
    }

    /// Publish the tree to a control surface.
    ///
    /// Each publication builds a fresh observable mirror seeded from the
    /// store, so a surface created after host state restore already shows
    /// the restored values. The metering tap inside holds only a weak
    /// reference to this engine's meter.
    pub fn publish(&self) -> ControlSurface {
        ControlSurface::new(
            Arc::clone(&self.tree),
            Arc::clone(&self.store),
            MeterTap::new(&self.meter),
        )
    }

    /// The render context's view: indexed parameter reads and the metering
    /// publish slot.
    pub fn render_handle(&self) -> RenderHandle {
        let bypass_slot = self
            .tree
            .params()
            .enumerate()
            .find(|(_, spec)| spec.flags.bypass)
            .map(|(index, _)| index);
        RenderHandle {
            store: Arc::clone(&self.store),
            meter: Arc::clone(&self.meter),
            bypass_slot,
        }
    }

    /// Host automation entry: clamp and store a value change. The surface's
    /// next [`sync`](ControlSurface::sync) picks it up, coalesced. Returns
    /// the clamped value.
    pub fn set_parameter(&self, address: ParameterAddress, value: f32) -> f32 {
        let clamped = self.store.write(address, value);
        tracing::trace!(address, value = clamped, "host parameter change");
        clamped
    }

    /// Current value at an address.
    pub fn parameter(&self, address: ParameterAddress) -> f32 {
        self.store.read(address)
    }

    /// Capture current parameter state for host persistence.
    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot::capture(&self.tree, &self.store)
    }

    /// Restore saved parameter state. Unknown identifiers are skipped;
    /// returns how many values were applied.
    pub fn restore(&self, snapshot: &ParameterSnapshot) -> usize {
        let applied = snapshot.apply(&self.tree, &self.store);
        tracing::debug!(applied, "restored parameter snapshot");
        applied
    }
}

/// Render-context view of the engine.
///
/// Everything here is render-callback safe: bounded time, no allocation, no
/// locks, no system calls. Resolve addresses to slot indexes once at
/// initialization, then read by index per block.
pub struct RenderHandle {
    store: Arc<RenderParameterStore>,
    meter: Arc<GainReductionMeter>,
    bypass_slot: Option<usize>,
}

impl RenderHandle {
    /// Resolve an address to its dense slot index. Do this at render setup,
    /// not per block.
    ///
    /// # Panics
    ///
    /// Panics on an unknown address (programming error against a validated
    /// tree).
    pub fn slot_index(&self, address: ParameterAddress) -> usize {
        self.store.slot_index(address)
    }

    /// Per-block parameter read.
    #[inline]
    pub fn parameter(&self, slot: usize) -> f32 {
        self.store.read_indexed(slot)
    }

    /// Apply a host-scheduled parameter event inside the render block.
    /// Clamps like every other write.
    #[inline]
    pub fn apply_event(&self, address: ParameterAddress, value: f32) {
        self.store.write(address, value);
    }

    /// Whether the bypass switch is engaged (`value >= 0.5`). Always `false`
    /// for a tree without a bypass-flagged parameter.
    #[inline]
    pub fn is_bypassed(&self) -> bool {
        match self.bypass_slot {
            Some(slot) => self.store.read_indexed(slot) >= 0.5,
            None => false,
        }
    }

    /// Publish the block's gain-reduction level in dB.
    #[inline]
    pub fn publish_gain_reduction(&self, db: f32) {
        self.meter.publish(db);
    }
}
