//! Reactive signal graph
//!
//! Signals hold typed values. Effects read signals through the graph and are
//! re-run synchronously whenever one of the signals they read is set, so any
//! observer of a signal is up to date by the time `set` returns.
//!
//! Writes inside [`ReactiveGraph::batch`] are coalesced: each affected effect
//! runs once when the outermost batch completes.

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use smallvec::SmallVec;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

new_key_type! {
    /// Unique identifier for a signal
    pub struct SignalId;

    /// Unique identifier for an effect
    pub struct EffectId;
}

impl SignalId {
    /// Raw representation, used to persist the id outside the graph
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Rebuild an id from its raw representation
    pub fn from_raw(raw: u64) -> Self {
        KeyData::from_ffi(raw).into()
    }
}

/// Shared reactive graph for handlers that outlive a single borrow
pub type SharedReactiveGraph = Arc<Mutex<ReactiveGraph>>;

/// Shared dirty flag for triggering host rebuilds
pub type DirtyFlag = Arc<AtomicBool>;

/// Typed handle to a value stored in a [`ReactiveGraph`]
pub struct Signal<T> {
    id: SignalId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Signal<T> {
    /// Reconstruct a typed handle from a stored id
    pub fn from_id(id: SignalId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> SignalId {
        self.id
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T> PartialEq for Signal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Signal<T> {}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signal").field(&self.id).finish()
    }
}

/// Handle to a registered effect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Effect {
    id: EffectId,
}

impl Effect {
    pub fn id(&self) -> EffectId {
        self.id
    }
}

type EffectFn = Box<dyn FnMut(&ReactiveGraph) + Send>;

struct SignalNode {
    value: Box<dyn Any + Send>,
    subscribers: SmallVec<[EffectId; 4]>,
}

struct EffectNode {
    /// Taken out of the node while the effect is running
    run: Option<EffectFn>,
    deps: SmallVec<[SignalId; 4]>,
}

/// Owner of all signals and effects
pub struct ReactiveGraph {
    signals: SlotMap<SignalId, SignalNode>,
    effects: SlotMap<EffectId, EffectNode>,
    /// Signals read by the effect currently running, if any
    tracking: RefCell<Option<SmallVec<[SignalId; 4]>>>,
    batch_depth: u32,
    pending: Vec<EffectId>,
}

impl Default for ReactiveGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactiveGraph {
    pub fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            effects: SlotMap::with_key(),
            tracking: RefCell::new(None),
            batch_depth: 0,
            pending: Vec::new(),
        }
    }

    /// Wrap a new graph for sharing between handlers
    pub fn shared() -> SharedReactiveGraph {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Create a signal holding `initial`
    pub fn create_signal<T: Send + 'static>(&mut self, initial: T) -> Signal<T> {
        let id = self.signals.insert(SignalNode {
            value: Box::new(initial),
            subscribers: SmallVec::new(),
        });
        Signal::from_id(id)
    }

    /// Read the current value of a signal
    ///
    /// Returns `None` if the signal does not belong to this graph or was
    /// created with a different type. Reads made from inside an effect
    /// subscribe that effect to the signal.
    pub fn get<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        let node = self.signals.get(signal.id)?;
        if let Some(deps) = self.tracking.borrow_mut().as_mut() {
            if !deps.contains(&signal.id) {
                deps.push(signal.id);
            }
        }
        node.value.downcast_ref::<T>().cloned()
    }

    /// Replace the value of a signal and notify its subscribers
    pub fn set<T: Send + 'static>(&mut self, signal: Signal<T>, value: T) {
        let Some(node) = self.signals.get_mut(signal.id) else {
            tracing::trace!("ReactiveGraph::set on unknown signal {:?}", signal.id);
            return;
        };
        node.value = Box::new(value);
        let subscribers = node.subscribers.clone();

        if self.batch_depth > 0 {
            for id in subscribers {
                if !self.pending.contains(&id) {
                    self.pending.push(id);
                }
            }
        } else {
            for id in subscribers {
                self.run_effect(id);
            }
        }
    }

    /// Update a signal from its current value
    ///
    /// Returns `false` if the signal could not be read.
    pub fn update<T, F>(&mut self, signal: Signal<T>, f: F) -> bool
    where
        T: Clone + Send + 'static,
        F: FnOnce(T) -> T,
    {
        match self.get(signal) {
            Some(current) => {
                self.set(signal, f(current));
                true
            }
            None => false,
        }
    }

    /// Register an effect and run it once immediately
    pub fn create_effect<F>(&mut self, f: F) -> Effect
    where
        F: FnMut(&ReactiveGraph) + Send + 'static,
    {
        let id = self.effects.insert(EffectNode {
            run: Some(Box::new(f)),
            deps: SmallVec::new(),
        });
        self.run_effect(id);
        Effect { id }
    }

    /// Remove an effect; it will not run again
    pub fn dispose_effect(&mut self, effect: Effect) {
        if let Some(node) = self.effects.remove(effect.id) {
            for signal_id in node.deps {
                if let Some(signal) = self.signals.get_mut(signal_id) {
                    signal.subscribers.retain(|e| *e != effect.id);
                }
            }
        }
        self.pending.retain(|e| *e != effect.id);
    }

    /// Run `f` with effect notifications deferred until it returns
    pub fn batch<F: FnOnce(&mut ReactiveGraph)>(&mut self, f: F) {
        self.batch_depth += 1;
        f(self);
        self.batch_depth -= 1;

        if self.batch_depth == 0 {
            let pending = std::mem::take(&mut self.pending);
            let mut seen = FxHashSet::default();
            for id in pending {
                if seen.insert(id) {
                    self.run_effect(id);
                }
            }
        }
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    fn run_effect(&mut self, id: EffectId) {
        let Some(mut run) = self.effects.get_mut(id).and_then(|node| node.run.take()) else {
            return;
        };

        *self.tracking.borrow_mut() = Some(SmallVec::new());
        run(&*self);
        let deps = self.tracking.borrow_mut().take().unwrap_or_default();

        let old_deps = match self.effects.get_mut(id) {
            Some(node) => {
                node.run = Some(run);
                std::mem::replace(&mut node.deps, deps.clone())
            }
            None => return,
        };

        for signal_id in old_deps {
            if let Some(signal) = self.signals.get_mut(signal_id) {
                signal.subscribers.retain(|e| *e != id);
            }
        }
        for signal_id in deps {
            if let Some(signal) = self.signals.get_mut(signal_id) {
                if !signal.subscribers.contains(&id) {
                    signal.subscribers.push(id);
                }
            }
        }
    }
}

/// Component state handle returned by the hook API
///
/// Every `set` publishes the new value to the graph (running dependent
/// effects) and raises the dirty flag so the host knows to rebuild.
pub struct State<T> {
    signal: Signal<T>,
    reactive: SharedReactiveGraph,
    dirty_flag: DirtyFlag,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            signal: self.signal,
            reactive: Arc::clone(&self.reactive),
            dirty_flag: Arc::clone(&self.dirty_flag),
        }
    }
}

impl<T> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State").field("signal", &self.signal).finish()
    }
}

impl<T: Clone + Send + 'static> State<T> {
    pub fn new(signal: Signal<T>, reactive: SharedReactiveGraph, dirty_flag: DirtyFlag) -> Self {
        Self {
            signal,
            reactive,
            dirty_flag,
        }
    }

    /// Current value
    ///
    /// # Panics
    ///
    /// Panics if the signal is not part of the graph this state was built
    /// with, which only happens when `State::new` is given a foreign signal.
    pub fn get(&self) -> T {
        self.try_get()
            .expect("State signal is not registered in its reactive graph")
    }

    pub fn try_get(&self) -> Option<T> {
        self.reactive.lock().unwrap().get(self.signal)
    }

    /// Publish a new value and request a rebuild
    pub fn set(&self, value: T) {
        self.reactive.lock().unwrap().set(self.signal, value);
        self.dirty_flag.store(true, Ordering::SeqCst);
    }

    /// Publish a value derived from the current one
    pub fn update<F: FnOnce(T) -> T>(&self, f: F) {
        let changed = self.reactive.lock().unwrap().update(self.signal, f);
        if changed {
            self.dirty_flag.store(true, Ordering::SeqCst);
        }
    }

    pub fn signal(&self) -> Signal<T> {
        self.signal
    }
}
