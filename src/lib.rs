//! # Clinch - dynamics plugin parameter bridge
//!
//! Real-time parameter and telemetry bridge between a dynamics plugin's
//! control surface and its audio render engine.
//!
//! ## Architecture
//!
//! Clinch is an umbrella crate that coordinates:
//! - **clinch-core** - Parameter tree, lock-free render-side store,
//!   gain-reduction metering channel, state snapshots
//! - **clinch-bridge** - Observable parameter proxies, groups, and the
//!   dependency-injected control surface
//!
//! Two execution contexts meet here. The render context reads parameter
//! slots and publishes one metering value per processed block; it never
//! blocks, allocates, or takes a lock. The control context edits values,
//! registers observers, and polls the meter at display rate.
//!
//! ## Quick Start
//!
//! ```
//! use clinch::{params, ClinchEngine};
//!
//! let engine = ClinchEngine::new(params::parameter_tree()).unwrap();
//!
//! // Control surface for the UI, render handle for the audio callback.
//! let surface = engine.publish();
//! let render = engine.render_handle();
//!
//! // Knob edit propagates to the render side, clamped.
//! surface.root().parameter("compress").set_value(12.0);
//! let slot = render.slot_index(params::address::COMPRESS);
//! assert_eq!(render.parameter(slot), 10.0);
//!
//! // Host automation propagates back, coalesced, on the next sync.
//! engine.set_parameter(params::address::SPEED, 8.0);
//! surface.sync();
//! assert_eq!(surface.parameter(params::address::SPEED).current_value(), 8.0);
//! ```

/// Re-export of clinch-core for direct access
pub use clinch_core as core;

/// Re-export of clinch-bridge for direct access
pub use clinch_bridge as bridge;

pub use clinch_core::{
    // Lock-free primitives
    AtomicFloat,
    Error,
    // Metering channel
    GainReductionMeter,
    GroupSpec,
    MeterTap,
    ParameterAddress,
    ParameterFlags,
    // State snapshots
    ParameterSnapshot,
    // Descriptors and tree
    ParameterSpec,
    ParameterState,
    ParameterTree,
    ParameterUnit,
    // Render-side store
    RenderParameterStore,
    Result,
    TreeNode,
    ValueRange,
};

pub use clinch_bridge::{
    ControlSurface, GroupChild, ObservableGroup, ObservableParameter, ObserverToken,
};

mod engine;
pub use engine::{ClinchEngine, RenderHandle};

pub mod params;

/// Common imports for plugin shells and control surfaces.
pub mod prelude {
    pub use crate::{
        ClinchEngine, ControlSurface, GroupSpec, MeterTap, ObservableParameter, ParameterSpec,
        ParameterTree, ParameterUnit, RenderHandle, ValueRange,
    };
}
