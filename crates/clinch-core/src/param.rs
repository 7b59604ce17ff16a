//! Parameter descriptors: identity, unit, range, default, and capability flags.
//!
//! A [`ParameterSpec`] is pure data. The numeric [`ParameterAddress`] is the
//! wire-level key the host uses for automation and must stay stable across
//! plugin versions; the string identifier is the stable key for lookup and
//! state serialization.

/// Stable numeric key for host automation. Never renumber a shipped address.
pub type ParameterAddress = u64;

/// Unit a parameter value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterUnit {
    /// Dimensionless knob value (default)
    #[default]
    Generic,
    /// Gain in decibels
    Decibels,
    /// On/off switch: 0 = off, anything else = on
    Boolean,
    /// Frequency in Hz
    Hertz,
    /// Time in seconds
    Seconds,
    /// 0-100 percent
    Percent,
}

/// Capability flags for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterFlags {
    /// Value can be read by host and control surface.
    pub readable: bool,
    /// Value can be written by host and control surface.
    pub writable: bool,
    /// Parameter is the plugin's bypass switch.
    pub bypass: bool,
}

impl Default for ParameterFlags {
    fn default() -> Self {
        Self {
            readable: true,
            writable: true,
            bypass: false,
        }
    }
}

/// Inclusive value range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    /// Create a range. Validity (`min <= max`) is enforced when the tree is
    /// built, not here, so a bad declaration surfaces as a configuration
    /// error instead of a panic mid-declaration.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// 0.0 to 1.0.
    pub const fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Clamp into the range. NaN lands at `min` (ranges are validated finite
    /// when the tree is built), so no write path can park a value outside the
    /// range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        // f32::max / f32::min return the non-NaN operand.
        value.max(self.min).min(self.max)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max && self.min.is_finite() && self.max.is_finite()
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::unit()
    }
}

/// Immutable declaration of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    /// Host automation address, unique within the tree.
    pub address: ParameterAddress,
    /// Stable string key, unique within the tree.
    pub identifier: &'static str,
    /// Display label.
    pub name: &'static str,
    /// Display unit.
    pub unit: ParameterUnit,
    /// Inclusive value range.
    pub range: ValueRange,
    /// Default value; must lie within `range`.
    pub default: f32,
    /// Capability flags.
    pub flags: ParameterFlags,
}

impl ParameterSpec {
    /// Create a parameter with default flags (readable + writable).
    pub const fn new(
        address: ParameterAddress,
        identifier: &'static str,
        name: &'static str,
        unit: ParameterUnit,
        range: ValueRange,
        default: f32,
    ) -> Self {
        Self {
            address,
            identifier,
            name,
            unit,
            range,
            default,
            flags: ParameterFlags {
                readable: true,
                writable: true,
                bypass: false,
            },
        }
    }

    /// Create a boolean on/off parameter over the unit range.
    pub const fn toggle(
        address: ParameterAddress,
        identifier: &'static str,
        name: &'static str,
        default_on: bool,
    ) -> Self {
        Self::new(
            address,
            identifier,
            name,
            ParameterUnit::Boolean,
            ValueRange::unit(),
            if default_on { 1.0 } else { 0.0 },
        )
    }

    /// Replace the capability flags.
    pub const fn with_flags(mut self, flags: ParameterFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Clamp a value into this parameter's range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        self.range.clamp(value)
    }

    pub fn is_boolean(&self) -> bool {
        self.unit == ParameterUnit::Boolean
    }
}
