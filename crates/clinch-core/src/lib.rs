//! Parameter tree, render-side store, and metering channel for the Clinch
//! dynamics plugin.
//!
//! This crate is the real-time half of the plugin's control bridge:
//!
//! - [`ParameterTree`]: declarative, validated-once parameter hierarchy
//! - [`RenderParameterStore`]: lock-free per-address value slots, the only
//!   synchronization point between the control and render contexts
//! - [`GainReductionMeter`] / [`MeterTap`]: single-slot telemetry channel
//!   from the render callback to a polling display
//! - [`ParameterSnapshot`]: identifier-keyed host state save/restore
//!
//! Two execution contexts are assumed throughout. The render context reads
//! parameter slots once per block and publishes one metering value per
//! block; it never blocks, allocates, or takes a lock. The control context
//! writes parameter values, polls the meter, and may do all of those things.
//! Everything except the store is immutable after construction or owned by
//! exactly one context.

pub mod error;
pub use error::{Error, Result};

pub(crate) mod lockfree;
pub use lockfree::AtomicFloat;

pub mod param;
pub use param::{ParameterAddress, ParameterFlags, ParameterSpec, ParameterUnit, ValueRange};

pub mod tree;
pub use tree::{GroupSpec, ParameterTree, TreeNode};

pub mod store;
pub use store::RenderParameterStore;

pub mod metering;
pub use metering::{GainReductionMeter, MeterTap};

pub mod state;
pub use state::{ParameterSnapshot, ParameterState};
