//! Keyed hook state
//!
//! A [`HookContext`] owns the reactive graph, the key -> signal table, and the
//! dirty flag for one host. Components ask it for state by a stable string
//! key instead of by call order, so the same `State<T>` comes back on every
//! rebuild:
//!
//! ```rust
//! use hookstate_core::HookContext;
//!
//! let ctx = HookContext::new();
//! let open = ctx.use_state_keyed("menu_open", || false);
//! open.set(true);
//!
//! assert!(ctx.use_state_keyed("menu_open", || false).get());
//! ```

use crate::reactive::{DirtyFlag, ReactiveGraph, SharedReactiveGraph, Signal, SignalId, State};
use std::any::TypeId;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Key for identifying a signal in the keyed state system
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    /// Hash of the user-provided key
    key_hash: u64,
    /// Type ID of the signal value
    type_id: TypeId,
}

impl StateKey {
    /// Create a new StateKey from a hashable key and type
    pub fn new<T: 'static, K: Hash>(key: &K) -> Self {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        key.hash(&mut hasher);
        Self {
            key_hash: hasher.finish(),
            type_id: TypeId::of::<T>(),
        }
    }

    /// Create a StateKey from a string key and type
    pub fn from_string<T: 'static>(key: &str) -> Self {
        Self::new::<T, _>(&key)
    }
}

/// Stores keyed state across rebuilds
#[derive(Debug, Default)]
pub struct HookState {
    /// Keyed signals: key -> raw signal ID
    signals: HashMap<StateKey, u64>,
}

impl HookState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an existing signal by key
    pub fn get(&self, key: &StateKey) -> Option<u64> {
        self.signals.get(key).copied()
    }

    /// Store a signal with the given key
    pub fn insert(&mut self, key: StateKey, signal_id: u64) {
        self.signals.insert(key, signal_id);
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

/// Shared hook state
pub type SharedHookState = Arc<Mutex<HookState>>;

/// Hook runtime for one host
///
/// Cloning is cheap and yields a handle to the same graph, table, and flag.
#[derive(Clone)]
pub struct HookContext {
    reactive: SharedReactiveGraph,
    hooks: SharedHookState,
    dirty_flag: DirtyFlag,
}

impl Default for HookContext {
    fn default() -> Self {
        Self::new()
    }
}

impl HookContext {
    pub fn new() -> Self {
        Self::from_parts(
            ReactiveGraph::shared(),
            Arc::new(Mutex::new(HookState::new())),
            Arc::new(AtomicBool::new(false)),
        )
    }

    /// Build a context around resources owned by the host
    pub fn from_parts(reactive: SharedReactiveGraph, hooks: SharedHookState, dirty_flag: DirtyFlag) -> Self {
        Self {
            reactive,
            hooks,
            dirty_flag,
        }
    }

    /// Create a persistent state value that survives across rebuilds (keyed)
    ///
    /// `init` only runs the first time `key` is seen for type `T`. It runs
    /// without any lock held, so it may itself call `use_state_keyed`.
    pub fn use_state_keyed<T, F>(&self, key: &str, init: F) -> State<T>
    where
        T: Clone + Send + 'static,
        F: FnOnce() -> T,
    {
        let signal = self.use_signal_keyed(key, init);
        State::new(signal, Arc::clone(&self.reactive), Arc::clone(&self.dirty_flag))
    }

    /// Keyed signal without the dirty-flag wrapper
    pub fn use_signal_keyed<T, F>(&self, key: &str, init: F) -> Signal<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T,
    {
        let state_key = StateKey::from_string::<T>(key);

        if let Some(raw_id) = self.hooks.lock().unwrap().get(&state_key) {
            return Signal::from_id(SignalId::from_raw(raw_id));
        }

        let initial = init();

        let mut hooks = self.hooks.lock().unwrap();
        // `init` may have registered the same key re-entrantly.
        if let Some(raw_id) = hooks.get(&state_key) {
            return Signal::from_id(SignalId::from_raw(raw_id));
        }
        let signal = self.reactive.lock().unwrap().create_signal(initial);
        hooks.insert(state_key, signal.id().to_raw());
        tracing::trace!("HookContext: registered keyed state {:?}", key);
        signal
    }

    /// Create an unkeyed signal (low-level API)
    pub fn use_signal<T: Send + 'static>(&self, initial: T) -> Signal<T> {
        self.reactive.lock().unwrap().create_signal(initial)
    }

    pub fn get_signal<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        self.reactive.lock().unwrap().get(signal)
    }

    /// Set the value of a signal, running dependent effects
    pub fn set_signal<T: Send + 'static>(&self, signal: Signal<T>, value: T) {
        self.reactive.lock().unwrap().set(signal, value);
    }

    pub fn reactive(&self) -> &SharedReactiveGraph {
        &self.reactive
    }

    pub fn hooks(&self) -> &SharedHookState {
        &self.hooks
    }

    pub fn dirty_flag(&self) -> &DirtyFlag {
        &self.dirty_flag
    }

    /// Request a rebuild by setting the dirty flag
    pub fn request_rebuild(&self) {
        self.dirty_flag.store(true, Ordering::SeqCst);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_flag.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag, returning whether it was set
    pub fn take_dirty(&self) -> bool {
        self.dirty_flag.swap(false, Ordering::SeqCst)
    }
}
