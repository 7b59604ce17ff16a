//! End-to-end bridge scenarios: control surface edits, host automation,
//! metering lifecycle, and state persistence against the full engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;
use clinch::{params, ClinchEngine};

fn test_engine() -> ClinchEngine {
    ClinchEngine::new(params::parameter_tree()).expect("plugin tree must validate")
}

#[test]
fn test_knob_edit_reaches_render_side_clamped() {
    let engine = test_engine();
    let surface = engine.publish();
    let render = engine.render_handle();
    let compress = render.slot_index(params::address::COMPRESS);

    // Range [0, 10], default 5: an over-range edit clamps, UI and engine agree.
    surface.root().parameter("compress").set_value(12.0);
    assert_relative_eq!(surface.parameter(params::address::COMPRESS).current_value(), 10.0);
    assert_relative_eq!(render.parameter(compress), 10.0);
}

#[test]
fn test_edit_notifies_exactly_once_with_clamped_value() {
    let engine = test_engine();
    let surface = engine.publish();
    let param = surface.parameter(params::address::COMPRESS);

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_in = Arc::clone(&fired);
    param.add_observer(move |value| {
        assert_relative_eq!(value, 10.0);
        fired_in.fetch_add(1, Ordering::SeqCst);
    });

    param.set_value(12.0);
    surface.sync();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_host_automation_coalesces_into_latest_value() {
    let engine = test_engine();
    let surface = engine.publish();
    let speed = surface.parameter(params::address::SPEED);

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_in = Arc::clone(&fired);
    speed.add_observer(move |_| {
        fired_in.fetch_add(1, Ordering::SeqCst);
    });

    // Three automation points land between two display syncs.
    engine.set_parameter(params::address::SPEED, 1.0);
    engine.set_parameter(params::address::SPEED, 6.0);
    engine.set_parameter(params::address::SPEED, 8.0);

    assert_eq!(surface.sync(), 1);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_relative_eq!(speed.current_value(), 8.0);
}

#[test]
fn test_external_change_matches_local_edit_behavior() {
    let engine = test_engine();
    let surface = engine.publish();
    let mix = surface.parameter(params::address::MIX);

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_in = Arc::clone(&fired);
    mix.add_observer(move |_| {
        fired_in.fetch_add(1, Ordering::SeqCst);
    });

    surface.observe_external_change(params::address::MIX, 0.25);
    assert_relative_eq!(mix.current_value(), 0.25);
    assert_relative_eq!(engine.parameter(params::address::MIX), 0.25);

    // No second, stale notification on the next sync.
    assert_eq!(surface.sync(), 0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_boolean_convenience_read() {
    let engine = test_engine();
    let surface = engine.publish();
    let bypass = surface.root().parameter("bypass");

    assert!(!bypass.is_on());
    bypass.set_value(1.0);
    assert!(bypass.is_on());
    assert!(engine.render_handle().is_bypassed());
}

#[test]
fn test_nan_automation_never_leaves_range() {
    let engine = test_engine();
    let surface = engine.publish();
    let bypass = surface.root().parameter("bypass");

    // A malformed host write clamps like any other out-of-range value; the
    // bypass must not spuriously engage.
    engine.set_parameter(params::address::BYPASS, f32::NAN);
    surface.sync();
    assert_eq!(engine.parameter(params::address::BYPASS), 0.0);
    assert!(!bypass.is_on());
    assert!(!engine.render_handle().is_bypassed());

    engine.set_parameter(params::address::OUTPUT_GAIN, f32::NAN);
    assert_eq!(engine.parameter(params::address::OUTPUT_GAIN), -24.0);
}

#[test]
fn test_metering_level_semantics() {
    let engine = test_engine();
    let surface = engine.publish();
    let render = engine.render_handle();

    // Nothing published yet.
    assert_relative_eq!(surface.gain_reduction_db(), 0.0);

    render.publish_gain_reduction(7.5);
    assert_relative_eq!(surface.gain_reduction_db(), 7.5);

    // Overwrite-on-write: only the latest level survives.
    render.publish_gain_reduction(2.0);
    render.publish_gain_reduction(11.25);
    assert_relative_eq!(surface.gain_reduction_db(), 11.25);
}

#[test]
fn test_meter_survives_engine_teardown() {
    let engine = test_engine();
    let surface = engine.publish();
    engine.render_handle().publish_gain_reduction(7.5);
    assert_relative_eq!(surface.gain_reduction_db(), 7.5);

    // The surface must not keep the engine alive, and sampling after
    // teardown falls over to the default instead of dangling.
    drop(engine);
    assert_relative_eq!(surface.gain_reduction_db(), 0.0);
}

#[test]
fn test_publication_after_restore_shows_restored_values() {
    let engine = test_engine();
    engine.set_parameter(params::address::COMPRESS, 9.0);
    engine.set_parameter(params::address::BYPASS, 1.0);
    let saved = engine.snapshot();

    let fresh = test_engine();
    assert_eq!(fresh.restore(&saved), 6);

    // A surface published after restore is already converged.
    let surface = fresh.publish();
    assert_relative_eq!(surface.parameter(params::address::COMPRESS).current_value(), 9.0);
    assert!(surface.root().parameter("bypass").is_on());
    assert_eq!(surface.sync(), 0);
}

#[test]
fn test_observer_token_cancellation() {
    let engine = test_engine();
    let surface = engine.publish();
    let gate = surface.parameter(params::address::GATE);

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_in = Arc::clone(&fired);
    let token = gate.add_observer(move |_| {
        fired_in.fetch_add(1, Ordering::SeqCst);
    });

    gate.set_value(3.0);
    gate.remove_observer(token);
    gate.set_value(6.0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}
