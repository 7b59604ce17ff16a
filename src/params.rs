//! Parameter declaration for the Clinch dynamics plugin.
//!
//! Addresses are the host automation wire format. Saved automation refers to
//! them by number, so a shipped address must never be renumbered; new
//! parameters append new addresses.

use clinch_core::{
    GroupSpec, ParameterAddress, ParameterFlags, ParameterSpec, ParameterUnit, ValueRange,
};

/// Stable automation addresses.
pub mod address {
    use super::ParameterAddress;

    pub const COMPRESS: ParameterAddress = 0;
    pub const SPEED: ParameterAddress = 1;
    pub const GATE: ParameterAddress = 2;
    pub const OUTPUT_GAIN: ParameterAddress = 3;
    pub const MIX: ParameterAddress = 4;
    pub const BYPASS: ParameterAddress = 5;
}

/// The plugin's full parameter tree: a single "global" group.
pub fn parameter_tree() -> GroupSpec {
    GroupSpec::new("global", "Global")
        .parameter(ParameterSpec::new(
            address::COMPRESS,
            "compress",
            "Compress",
            ParameterUnit::Generic,
            ValueRange::new(0.0, 10.0),
            5.0,
        ))
        .parameter(ParameterSpec::new(
            address::SPEED,
            "speed",
            "Speed",
            ParameterUnit::Generic,
            ValueRange::new(0.0, 10.0),
            3.0,
        ))
        .parameter(ParameterSpec::new(
            address::GATE,
            "gate",
            "Gate",
            ParameterUnit::Generic,
            ValueRange::new(0.0, 10.0),
            0.0,
        ))
        .parameter(ParameterSpec::new(
            address::OUTPUT_GAIN,
            "output_gain",
            "Output",
            ParameterUnit::Decibels,
            ValueRange::new(-24.0, 24.0),
            0.0,
        ))
        .parameter(ParameterSpec::new(
            address::MIX,
            "mix",
            "Mix",
            ParameterUnit::Generic,
            ValueRange::new(0.0, 1.0),
            1.0,
        ))
        .parameter(
            ParameterSpec::toggle(address::BYPASS, "bypass", "Bypass", false).with_flags(
                ParameterFlags {
                    bypass: true,
                    ..Default::default()
                },
            ),
        )
}
