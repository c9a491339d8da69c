//! Single controlled text input

use hookstate_core::{Event, HookContext, State};

/// Hook-backed value of one text input (or select)
#[derive(Clone, Debug)]
pub struct InputState {
    state: State<String>,
}

impl InputState {
    pub fn use_keyed(ctx: &HookContext, key: &str) -> Self {
        Self {
            state: ctx.use_state_keyed(key, String::new),
        }
    }

    pub fn value(&self) -> String {
        self.state.get()
    }

    pub fn set(&self, value: impl Into<String>) {
        self.state.set(value.into());
    }

    /// Take the value of a change event; the control's name is ignored
    ///
    /// Returns `false` if the event has no change payload.
    pub fn handle_change(&self, event: &Event) -> bool {
        match event.change_value() {
            Some((_, value)) => {
                self.set(value);
                true
            }
            None => false,
        }
    }

    pub fn reset(&self) {
        self.set(String::new());
    }
}
