//! Display-synced counter
//!
//! A single integer with increment/decrement. After every mutation the value
//! is written, as its decimal string, into the bound display element if that
//! element is mounted at the time. A missing element is skipped silently.

use std::sync::{Arc, Mutex};

use crate::display::SharedDisplay;

/// Shared counter for click handlers
pub type SharedCounter = Arc<Mutex<Counter>>;

/// Where a counter writes its value
#[derive(Debug, Clone)]
pub struct DisplayBinding {
    display: SharedDisplay,
    target: String,
}

impl DisplayBinding {
    pub fn new(display: SharedDisplay, target: impl Into<String>) -> Self {
        Self {
            display,
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Integer state with a display sink
#[derive(Debug)]
pub struct Counter {
    value: i64,
    binding: Option<DisplayBinding>,
}

impl Counter {
    /// Counter starting at 0, writing into `target` of `display`
    pub fn new(display: SharedDisplay, target: impl Into<String>) -> Self {
        Self {
            value: 0,
            binding: Some(DisplayBinding::new(display, target)),
        }
    }

    /// Counter with no display sink at all
    pub fn detached() -> Self {
        Self {
            value: 0,
            binding: None,
        }
    }

    pub fn shared(self) -> SharedCounter {
        Arc::new(Mutex::new(self))
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn increment(&mut self) -> i64 {
        self.value = self.value.wrapping_add(1);
        self.sync_display(self.value);
        self.value
    }

    pub fn decrement(&mut self) -> i64 {
        self.value = self.value.wrapping_sub(1);
        self.sync_display(self.value);
        self.value
    }

    /// Write `value` into the bound element if it is currently mounted
    pub fn sync_display(&self, value: i64) {
        let Some(binding) = &self.binding else {
            return;
        };

        let mut display = binding.display.lock().unwrap();
        match display.element_mut(&binding.target) {
            Some(node) => node.set_text_content(value.to_string()),
            None => tracing::debug!(
                "Counter::sync_display: `{}` not mounted, skipping write of {}",
                binding.target,
                value
            ),
        }
    }
}
