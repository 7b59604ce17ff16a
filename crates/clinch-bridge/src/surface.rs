//! The published control surface.
//!
//! A [`ControlSurface`] is everything the presentation layer receives at
//! construction: the observable root group, per-address parameter access,
//! and the metering tap. Handed over explicitly — no component reaches into
//! ambient global state.

use std::collections::HashMap;
use std::sync::Arc;

use clinch_core::{MeterTap, ParameterAddress, ParameterTree, RenderParameterStore};

use crate::group::ObservableGroup;
use crate::observable::ObservableParameter;

/// Control-context view of one engine instance.
pub struct ControlSurface {
    root: Arc<ObservableGroup>,
    params: Vec<Arc<ObservableParameter>>,
    by_address: HashMap<ParameterAddress, usize>,
    tap: MeterTap,
}

impl ControlSurface {
    /// Publish a validated tree to the control context.
    ///
    /// Builds the observable mirror of the tree with every proxy cache
    /// seeded from the store, so host-restored values are visible before
    /// the first sync.
    pub fn new(
        tree: Arc<ParameterTree>,
        store: Arc<RenderParameterStore>,
        tap: MeterTap,
    ) -> Self {
        let mut params = Vec::with_capacity(tree.len());
        let root = ObservableGroup::build(tree.root(), &tree, &store, &mut params);

        let by_address = params
            .iter()
            .enumerate()
            .map(|(index, param)| (param.spec().address, index))
            .collect();

        tracing::debug!(
            parameters = params.len(),
            "published parameter tree to control surface"
        );

        Self {
            root,
            params,
            by_address,
            tap,
        }
    }

    /// Root of the observable group hierarchy.
    pub fn root(&self) -> &Arc<ObservableGroup> {
        &self.root
    }

    /// All parameter proxies in declaration order.
    pub fn parameters(&self) -> &[Arc<ObservableParameter>] {
        &self.params
    }

    /// Proxy by host automation address.
    ///
    /// # Panics
    ///
    /// Panics on an unknown address; the surface shape is fixed at
    /// publication from a validated tree.
    pub fn parameter(&self, address: ParameterAddress) -> &Arc<ObservableParameter> {
        match self.by_address.get(&address) {
            Some(&index) => &self.params[index],
            None => panic!("control surface has no parameter at address {address}"),
        }
    }

    /// Pull every proxy whose store slot changed since its last refresh.
    ///
    /// Call at display cadence from the control thread. Host automation
    /// writes landing between two calls coalesce into one notification per
    /// parameter carrying the latest value. Returns the number of
    /// parameters that changed.
    pub fn sync(&self) -> usize {
        let mut changed = 0;
        for param in &self.params {
            if param.refresh_from_store() {
                changed += 1;
            }
        }
        if changed > 0 {
            tracing::trace!(changed, "synced automation changes to control surface");
        }
        changed
    }

    /// Direct external-change entry: the engine reports `address` changed
    /// for a reason other than a surface edit. Converges store and cache and
    /// fires observers once.
    pub fn observe_external_change(&self, address: ParameterAddress, value: f32) {
        self.parameter(address).observe_external_change(value);
    }

    /// The gain-reduction tap for display polling.
    pub fn meter(&self) -> &MeterTap {
        &self.tap
    }

    /// Latest gain reduction in dB (0.0 when the engine is gone).
    pub fn gain_reduction_db(&self) -> f32 {
        self.tap.sample()
    }
}
