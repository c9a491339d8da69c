//! Event dispatch system
//!
//! Host notifications addressed to an element id, and a dispatcher that
//! routes them to registered handlers.

use rustc_hash::FxHashMap;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const CLICK: EventType = 1;
    /// Value of a controlled input or select changed
    pub const CHANGE: EventType = 10;
    /// Form submission
    pub const SUBMIT: EventType = 20;
}

/// A host event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Element id the event is addressed to
    pub target: String,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
    default_prevented: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    /// New value of a named control
    Change { name: String, value: String },
    Pointer { x: f32, y: f32, button: u8 },
    None,
}

/// Proof that the host's default action for an event was suppressed
///
/// Only [`Event::prevent_default`] hands these out, so an API that takes one
/// cannot be reached before the suppression happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefaultPrevented {
    _private: (),
}

impl Event {
    pub fn new(event_type: EventType, target: impl Into<String>, data: EventData) -> Self {
        Self {
            event_type,
            target: target.into(),
            data,
            timestamp: 0,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn click(target: impl Into<String>) -> Self {
        Self::new(
            event_types::CLICK,
            target,
            EventData::Pointer {
                x: 0.0,
                y: 0.0,
                button: 0,
            },
        )
    }

    pub fn change(target: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            event_types::CHANGE,
            target,
            EventData::Change {
                name: name.into(),
                value: value.into(),
            },
        )
    }

    pub fn submit(target: impl Into<String>) -> Self {
        Self::new(event_types::SUBMIT, target, EventData::None)
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Suppress the host's default action (navigation, reload, ...)
    pub fn prevent_default(&mut self) -> DefaultPrevented {
        self.default_prevented = true;
        DefaultPrevented { _private: () }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// `(name, value)` of a change payload
    pub fn change_value(&self) -> Option<(&str, &str)> {
        match &self.data {
            EventData::Change { name, value } => Some((name, value)),
            _ => None,
        }
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn FnMut(&mut Event) + Send>;

/// Dispatches events to registered handlers
pub struct EventDispatcher {
    handlers: FxHashMap<(String, EventType), Vec<EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register an event handler for an element and event type
    pub fn register<F>(&mut self, target: impl Into<String>, event_type: EventType, handler: F)
    where
        F: FnMut(&mut Event) + Send + 'static,
    {
        self.handlers
            .entry((target.into(), event_type))
            .or_default()
            .push(Box::new(handler));
    }

    pub fn has_handlers(&self, target: &str, event_type: EventType) -> bool {
        self.handlers
            .get(&(target.to_string(), event_type))
            .is_some_and(|h| !h.is_empty())
    }

    /// Dispatch an event to its registered handlers in registration order
    ///
    /// Returns the number of handlers that ran. Handlers after one that
    /// stops propagation are skipped.
    pub fn dispatch(&mut self, event: &mut Event) -> usize {
        let mut ran = 0;
        if let Some(handlers) = self.handlers.get_mut(&(event.target.clone(), event.event_type)) {
            for handler in handlers.iter_mut() {
                if event.propagation_stopped {
                    break;
                }
                handler(event);
                ran += 1;
            }
        }
        ran
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
