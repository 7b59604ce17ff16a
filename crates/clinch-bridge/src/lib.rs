//! Observable parameter proxies and control surface for the Clinch dynamics
//! plugin.
//!
//! The control-context half of the plugin's parameter bridge:
//!
//! - [`ObservableParameter`]: cached mirror of one render-side value with
//!   write-through edits and token-based change observers
//! - [`ObservableGroup`]: navigable mirror of the parameter tree's shape
//! - [`ControlSurface`]: the dependency-injected bundle the presentation
//!   layer receives — observable root group, per-address access, and the
//!   gain-reduction [`MeterTap`](clinch_core::MeterTap)
//!
//! Everything here runs on the control context. The render thread is only
//! ever touched through `clinch-core`'s lock-free store and meter.

pub mod observable;
pub use observable::{ObservableParameter, ObserverToken};

pub mod group;
pub use group::{GroupChild, ObservableGroup};

pub mod surface;
pub use surface::ControlSurface;
