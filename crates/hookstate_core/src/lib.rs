//! hookstate core runtime
//!
//! This crate provides the primitives that component state is built on:
//!
//! - **Reactive Signals**: typed values with synchronous effects and batching
//! - **Hook State**: keyed `State<T>` handles that survive rebuilds and mark
//!   the host dirty when they change
//! - **Event Dispatch**: host notifications (change, click, submit) routed to
//!   handlers by target id
//!
//! # Example
//!
//! ```rust
//! use hookstate_core::HookContext;
//!
//! let ctx = HookContext::new();
//!
//! let count = ctx.use_state_keyed("count", || 0i64);
//! count.set(count.get() + 1);
//!
//! // The same key yields the same state on the next rebuild.
//! let again = ctx.use_state_keyed("count", || 0i64);
//! assert_eq!(again.get(), 1);
//! assert!(ctx.take_dirty());
//! ```

pub mod events;
pub mod hooks;
pub mod reactive;

pub use events::{DefaultPrevented, Event, EventData, EventDispatcher, EventType};
pub use hooks::{HookContext, HookState, StateKey};
pub use reactive::{DirtyFlag, Effect, EffectId, ReactiveGraph, SharedReactiveGraph, Signal, SignalId, State};
