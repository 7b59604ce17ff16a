//! Gain-reduction metering channel.
//!
//! A single-slot, overwrite-on-write transport from the render context to a
//! polling display. Metering is a level, not an event stream: the consumer
//! only ever wants the most recent value, so there is no queue and no
//! history, and a slow poller can never cause buildup on the producer side.
//!
//! The consumer holds a [`MeterTap`] backed by a `Weak` reference, so a
//! display component can neither extend the engine's lifetime nor dangle;
//! once the engine is gone, [`MeterTap::sample`] falls over to 0.0.
//!
//! The published scalar is raw dB, unclamped at the source. Display scale is
//! a presentation concern.

use std::sync::{Arc, Weak};

use crate::lockfree::AtomicFloat;

/// Render-side producer slot for the gain-reduction level.
#[derive(Debug, Default)]
pub struct GainReductionMeter {
    value: AtomicFloat,
}

impl GainReductionMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the published level. Called from the render callback once
    /// per processed block; never blocks, allocates, or waits on a reader.
    #[inline]
    pub fn publish(&self, db: f32) {
        self.value.set(db);
    }

    /// Most recently published level, 0.0 before the first publish.
    #[inline]
    pub fn latest(&self) -> f32 {
        self.value.get()
    }
}

/// Non-owning consumer handle for a [`GainReductionMeter`].
///
/// Cheap to clone; typically polled at display rate (tens of times per
/// second), never at render-block rate.
#[derive(Debug, Clone)]
pub struct MeterTap {
    meter: Weak<GainReductionMeter>,
}

impl MeterTap {
    pub fn new(meter: &Arc<GainReductionMeter>) -> Self {
        Self {
            meter: Arc::downgrade(meter),
        }
    }

    /// A tap with no producer. Always samples 0.0; useful for previews and
    /// tests of display code.
    pub fn disconnected() -> Self {
        Self { meter: Weak::new() }
    }

    /// Latest published level, or 0.0 when nothing was published yet or the
    /// producing engine has been torn down.
    pub fn sample(&self) -> f32 {
        match self.meter.upgrade() {
            Some(meter) => meter.latest(),
            None => 0.0,
        }
    }

    /// Whether the producing engine is still alive.
    pub fn is_live(&self) -> bool {
        self.meter.strong_count() > 0
    }
}
