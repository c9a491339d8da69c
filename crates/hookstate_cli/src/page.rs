//! Demo page assembly
//!
//! Wires the widgets to element ids from [`PageConfig`]:
//!
//! - change/submit on the form id, click on its reset button
//! - change on the text input, click on its reset button
//! - click on the increment/decrement buttons
//!
//! After every dispatch the page rebuilds its echo displays if any hook
//! state changed. The counter writes its own display directly.

use std::sync::Arc;

use hookstate_core::events::event_types;
use hookstate_core::{Event, EventDispatcher, HookContext};
use hookstate_widgets::{Counter, DisplayTree, FieldStateMap, FormState, InputState, SharedCounter, SharedDisplay};

use crate::config::PageConfig;

pub struct Page {
    config: PageConfig,
    ctx: HookContext,
    dispatcher: EventDispatcher,
    display: SharedDisplay,
    form: FormState,
    input: InputState,
    counter: SharedCounter,
}

impl Page {
    pub fn build(config: PageConfig) -> Self {
        let ctx = HookContext::new();
        let display = DisplayTree::shared();
        let mut dispatcher = EventDispatcher::new();

        {
            let mut tree = display.lock().unwrap();
            for field in &config.form.fields {
                tree.mount(config.form.field_display_id(&field.name));
            }
            tree.mount(config.input.display.clone());
            if config.counter.mount_display {
                tree.mount(config.counter.display.clone());
            }
        }

        let fields = config.form.fields.clone();
        let form = FormState::use_keyed(&ctx, &config.form.id, move || {
            FieldStateMap::new(fields.into_iter().map(|f| (f.name, f.default)))
        })
        .strict(config.form.strict);

        let on_change = form.clone();
        dispatcher.register(config.form.id.clone(), event_types::CHANGE, move |e| {
            // Rejections are already logged by the form.
            let _ = on_change.handle_change(e);
        });
        let on_submit = form.clone();
        dispatcher.register(config.form.id.clone(), event_types::SUBMIT, move |e| {
            on_submit.handle_submit(e);
        });
        let on_reset = form.clone();
        dispatcher.register(config.form.reset_button.clone(), event_types::CLICK, move |_| {
            on_reset.reset();
        });

        let input = InputState::use_keyed(&ctx, &config.input.id);
        let on_input = input.clone();
        dispatcher.register(config.input.id.clone(), event_types::CHANGE, move |e| {
            on_input.handle_change(e);
        });
        let on_input_reset = input.clone();
        dispatcher.register(config.input.reset_button.clone(), event_types::CLICK, move |_| {
            on_input_reset.reset();
        });

        let counter = Counter::new(Arc::clone(&display), config.counter.display.clone()).shared();
        let inc = Arc::clone(&counter);
        dispatcher.register(config.counter.increment.clone(), event_types::CLICK, move |_| {
            inc.lock().unwrap().increment();
        });
        let dec = Arc::clone(&counter);
        dispatcher.register(config.counter.decrement.clone(), event_types::CLICK, move |_| {
            dec.lock().unwrap().decrement();
        });

        let page = Self {
            config,
            ctx,
            dispatcher,
            display,
            form,
            input,
            counter,
        };
        page.render_all();
        page
    }

    /// Deliver one host event, then rebuild if state changed
    ///
    /// Returns the number of handlers that ran.
    pub fn dispatch(&mut self, event: &mut Event) -> usize {
        let ran = self.dispatcher.dispatch(event);
        self.render();
        ran
    }

    /// Rebuild echo displays if hook state changed since the last rebuild
    pub fn render(&self) -> bool {
        if !self.ctx.take_dirty() {
            return false;
        }
        tracing::debug!("Page: rebuilding displays");
        self.render_all();
        true
    }

    fn render_all(&self) {
        let snapshot = self.form.snapshot();
        let input_value = self.input.value();
        let mut tree = self.display.lock().unwrap();

        for (name, value) in snapshot.fields() {
            let id = self.config.form.field_display_id(name);
            if let Some(node) = tree.element_mut(&id) {
                node.set_text_content(value);
            }
        }
        if let Some(node) = tree.element_mut(&self.config.input.display) {
            node.set_text_content(input_value);
        }
    }

    /// Mount a display element; echo displays pick up current state
    pub fn mount(&mut self, id: &str) -> bool {
        let mounted = self.display.lock().unwrap().mount(id);
        if mounted {
            self.render_all();
        }
        mounted
    }

    pub fn unmount(&mut self, id: &str) -> bool {
        self.display.lock().unwrap().unmount(id)
    }

    pub fn display_text(&self, id: &str) -> Option<String> {
        self.display.lock().unwrap().text(id).map(str::to_string)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_snapshot(&self) -> Arc<FieldStateMap> {
        self.form.snapshot()
    }

    pub fn input_value(&self) -> String {
        self.input.value()
    }

    pub fn counter_value(&self) -> i64 {
        self.counter.lock().unwrap().value()
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mounts_displays() {
        let page = Page::build(PageConfig::default());

        assert_eq!(page.display_text("login.id").as_deref(), Some(""));
        assert_eq!(page.display_text("login.password").as_deref(), Some(""));
        assert_eq!(page.display_text("inputValue").as_deref(), Some(""));
        assert_eq!(page.display_text("countValue").as_deref(), Some(""));
    }

    #[test]
    fn test_form_change_rebuilds_echo() {
        let mut page = Page::build(PageConfig::default());

        assert_eq!(page.dispatch(&mut Event::change("login", "id", "myuser")), 1);
        assert_eq!(page.display_text("login.id").as_deref(), Some("myuser"));
    }

    #[test]
    fn test_input_change_and_reset() {
        let mut page = Page::build(PageConfig::default());

        page.dispatch(&mut Event::change("textInput", "", "hello"));
        assert_eq!(page.display_text("inputValue").as_deref(), Some("hello"));

        page.dispatch(&mut Event::click("inputReset"));
        assert_eq!(page.input_value(), "");
        assert_eq!(page.display_text("inputValue").as_deref(), Some(""));
    }

    #[test]
    fn test_render_without_changes_is_noop() {
        let mut page = Page::build(PageConfig::default());
        assert!(!page.render());

        page.dispatch(&mut Event::click("incrementBtn"));
        // Counter state is not hook state; it writes its own display.
        assert!(!page.render());
        assert_eq!(page.display_text("countValue").as_deref(), Some("1"));
    }

    #[test]
    fn test_mount_later_shows_current_form_value() {
        let mut page = Page::build(PageConfig::default());
        page.unmount("login.id");
        page.dispatch(&mut Event::change("login", "id", "u"));

        assert!(page.mount("login.id"));
        assert_eq!(page.display_text("login.id").as_deref(), Some("u"));
    }
}
