//! Error types for clinch-core.
//!
//! Every variant is a parameter-tree configuration error. The tree is
//! validated exactly once at engine construction; a failure here is fatal —
//! the engine must not start with an invalid tree. Nothing past construction
//! is fallible: out-of-range writes clamp, and metering reads fall over to a
//! default.

use thiserror::Error;

/// Error type for clinch-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("duplicate parameter address {address} (identifier \"{identifier}\")")]
    DuplicateAddress { address: u64, identifier: String },

    #[error("duplicate parameter identifier \"{identifier}\"")]
    DuplicateIdentifier { identifier: String },

    #[error("duplicate identifier \"{identifier}\" among children of group \"{group}\"")]
    DuplicateChild { group: String, identifier: String },

    #[error("invalid range for \"{identifier}\": min {min} > max {max}")]
    InvalidRange {
        identifier: String,
        min: f32,
        max: f32,
    },

    #[error("default {default} for \"{identifier}\" outside range [{min}, {max}]")]
    DefaultOutOfRange {
        identifier: String,
        default: f32,
        min: f32,
        max: f32,
    },

    #[error("parameter tree declares no parameters")]
    EmptyTree,
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
