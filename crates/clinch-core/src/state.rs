//! Parameter state snapshots.
//!
//! Identifier-keyed save/restore of current parameter values, the piece the
//! host uses to persist and recall plugin state. Identifiers rather than
//! addresses so presets stay readable and survive address-table growth;
//! values unknown to this plugin version are ignored on apply, and every
//! applied value is clamped by the store.

use serde::{Deserialize, Serialize};

use crate::store::RenderParameterStore;
use crate::tree::ParameterTree;

/// One saved parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterState {
    pub identifier: String,
    pub value: f32,
}

/// A saved set of parameter values, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSnapshot {
    pub values: Vec<ParameterState>,
}

impl ParameterSnapshot {
    /// Capture the store's current values.
    pub fn capture(tree: &ParameterTree, store: &RenderParameterStore) -> Self {
        let values = tree
            .params()
            .map(|spec| ParameterState {
                identifier: spec.identifier.to_string(),
                value: store.read(spec.address),
            })
            .collect();
        Self { values }
    }

    /// Write the saved values back into the store.
    ///
    /// Unknown identifiers are skipped (preset saved by a different plugin
    /// version); known values clamp into the current range. Returns how many
    /// values were applied.
    pub fn apply(&self, tree: &ParameterTree, store: &RenderParameterStore) -> usize {
        let mut applied = 0;
        for state in &self.values {
            if let Some(spec) = tree.resolve_id(&state.identifier) {
                store.write(spec.address, state.value);
                applied += 1;
            }
        }
        applied
    }
}
