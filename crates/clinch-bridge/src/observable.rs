//! UI-facing mirror of one render-side parameter.
//!
//! An [`ObservableParameter`] caches the last known value for O(1) reads,
//! writes edits through to the [`RenderParameterStore`], and notifies
//! registered observers on every change regardless of origin — a local knob
//! edit, host automation, or a preset load all fire the same callbacks.
//!
//! Observer dispatch is synchronous on the thread that caused the change.
//! The render thread never dispatches anything; it only bumps the store's
//! change epochs, which [`refresh_from_store`](ObservableParameter::refresh_from_store)
//! compares against on the control thread. That comparison coalesces: N host
//! writes between two refreshes yield exactly one notification carrying the
//! latest value.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use clinch_core::{AtomicFloat, ParameterSpec, ParameterTree, RenderParameterStore};
use parking_lot::Mutex;

type ObserverFn = Arc<dyn Fn(f32) + Send + Sync>;

/// Cancellation token returned by [`ObservableParameter::add_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverToken(u64);

/// Observable mirror of a single parameter.
///
/// Holds the shared read-only tree (never an owning copy of the descriptor)
/// and a dense slot index into the store.
pub struct ObservableParameter {
    tree: Arc<ParameterTree>,
    store: Arc<RenderParameterStore>,
    index: usize,
    cached: AtomicFloat,
    seen_epoch: AtomicU32,
    observers: Mutex<Vec<(u64, ObserverFn)>>,
    next_token: AtomicU64,
}

impl ObservableParameter {
    pub(crate) fn new(
        tree: Arc<ParameterTree>,
        store: Arc<RenderParameterStore>,
        index: usize,
    ) -> Self {
        // Seed the cache from the store so a freshly published surface
        // already shows host-restored values.
        let cached = AtomicFloat::new(store.read_indexed(index));
        let seen_epoch = AtomicU32::new(store.epoch_indexed(index));
        Self {
            tree,
            store,
            index,
            cached,
            seen_epoch,
            observers: Mutex::new(Vec::new()),
            next_token: AtomicU64::new(1),
        }
    }

    /// The descriptor this proxy mirrors.
    pub fn spec(&self) -> &ParameterSpec {
        self.tree.spec(self.index)
    }

    /// Last observed value. O(1), never touches the render thread.
    #[inline]
    pub fn current_value(&self) -> f32 {
        self.cached.get()
    }

    /// Convenience read for `Boolean`-unit parameters: `value != 0`.
    /// Derived from the cache, never a second source of truth.
    pub fn is_on(&self) -> bool {
        self.current_value() != 0.0
    }

    /// Clamp, write through to the render-side store, update the cache, and
    /// notify observers exactly once with the clamped value.
    pub fn set_value(&self, value: f32) {
        let clamped = self.store.write_indexed(self.index, value);
        self.mark_seen();
        self.cached.set(clamped);
        tracing::trace!(
            identifier = self.spec().identifier,
            value = clamped,
            "parameter edited"
        );
        self.notify(clamped);
    }

    /// External refresh path: the engine reported a change this proxy did
    /// not initiate (host automation, preset load, default re-assertion).
    ///
    /// Writes through to the store as well, so control and engine state
    /// converge no matter which side the value originated on, then fires the
    /// same notification as a local edit. The store write marks the change
    /// epoch as seen, so a later [`refresh_from_store`](Self::refresh_from_store)
    /// does not fire a second, stale notification.
    pub fn observe_external_change(&self, value: f32) {
        let clamped = self.store.write_indexed(self.index, value);
        self.mark_seen();
        self.cached.set(clamped);
        self.notify(clamped);
    }

    /// Pull the store's value if it changed since this proxy last looked.
    ///
    /// Returns `true` (and notifies) when the change epoch moved or the
    /// store's value disagrees with the cache; intermediate host writes are
    /// coalesced into one notification with the latest value.
    ///
    /// The value comparison is not redundant with the epoch: a host write
    /// landing between a local edit's store write and its epoch bookkeeping
    /// gets its epoch marked as seen while the cache still holds the local
    /// value. The store always wins that disagreement, so UI and engine
    /// state converge no matter how the writes interleave.
    pub fn refresh_from_store(&self) -> bool {
        let epoch = self.store.epoch_indexed(self.index);
        let value = self.store.read_indexed(self.index);
        if epoch == self.seen_epoch.load(Ordering::Acquire) && value == self.cached.get() {
            return false;
        }
        self.seen_epoch.store(epoch, Ordering::Release);
        self.cached.set(value);
        self.notify(value);
        true
    }

    /// Register a change callback. Fired synchronously on the thread that
    /// causes a change.
    pub fn add_observer(&self, observer: impl Fn(f32) + Send + Sync + 'static) -> ObserverToken {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.observers.lock().push((token, Arc::new(observer)));
        ObserverToken(token)
    }

    /// Cancel a previously registered callback.
    pub fn remove_observer(&self, token: ObserverToken) {
        self.observers.lock().retain(|(id, _)| *id != token.0);
    }

    fn mark_seen(&self) {
        self.seen_epoch
            .store(self.store.epoch_indexed(self.index), Ordering::Release);
    }

    fn notify(&self, value: f32) {
        // Clone the callback list out of the lock so an observer may
        // register or cancel observers from inside its callback.
        let observers: Vec<ObserverFn> = self
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(value);
        }
    }
}
