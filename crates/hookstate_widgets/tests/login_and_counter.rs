//! Integration tests wiring the widgets to an event dispatcher the way a
//! host page does.

use hookstate_core::events::event_types;
use hookstate_core::{Event, EventDispatcher, HookContext};
use hookstate_widgets::{Counter, DisplayTree, FieldStateMap, FormState};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn login_page(ctx: &HookContext, dispatcher: &mut EventDispatcher) -> FormState {
    let form = FormState::use_keyed(ctx, "login", || {
        FieldStateMap::with_empty_fields(["id", "password"])
    });

    let on_change = form.clone();
    dispatcher.register("login", event_types::CHANGE, move |e| {
        let _ = on_change.handle_change(e);
    });
    let on_submit = form.clone();
    dispatcher.register("login", event_types::SUBMIT, move |e| {
        on_submit.handle_submit(e);
    });
    let on_reset = form.clone();
    dispatcher.register("loginReset", event_types::CLICK, move |_| {
        on_reset.reset();
    });

    form
}

#[test]
fn test_login_end_to_end() {
    let ctx = HookContext::new();
    let mut dispatcher = EventDispatcher::new();
    let form = login_page(&ctx, &mut dispatcher);
    let empty = FieldStateMap::with_empty_fields(["id", "password"]);

    dispatcher.dispatch(&mut Event::change("login", "id", "myuser"));
    assert_eq!(*form.snapshot(), empty.update("id", "myuser"));

    dispatcher.dispatch(&mut Event::change("login", "password", "secret"));
    assert_eq!(form.value("id").as_deref(), Some("myuser"));
    assert_eq!(form.value("password").as_deref(), Some("secret"));

    let mut submit = Event::submit("login");
    dispatcher.dispatch(&mut submit);
    assert!(submit.default_prevented());
    assert_eq!(*form.snapshot(), empty);
}

#[test]
fn test_reset_button_clears_fields() {
    let ctx = HookContext::new();
    let mut dispatcher = EventDispatcher::new();
    let form = login_page(&ctx, &mut dispatcher);

    dispatcher.dispatch(&mut Event::change("login", "password", "secret"));
    dispatcher.dispatch(&mut Event::click("loginReset"));
    let once = form.snapshot();
    dispatcher.dispatch(&mut Event::click("loginReset"));

    assert!(once.is_pristine());
    assert_eq!(*once, *form.snapshot());
}

#[test]
fn test_every_change_publishes_a_new_snapshot() {
    let ctx = HookContext::new();
    let mut dispatcher = EventDispatcher::new();
    let form = login_page(&ctx, &mut dispatcher);

    let mut seen = vec![form.snapshot()];
    for value in ["a", "ab", "ab"] {
        dispatcher.dispatch(&mut Event::change("login", "id", value));
        seen.push(form.snapshot());
    }

    for pair in seen.windows(2) {
        assert!(!Arc::ptr_eq(&pair[0], &pair[1]));
    }
}

#[test]
fn test_counter_buttons_sync_display() {
    let display = DisplayTree::shared();
    display.lock().unwrap().mount("countValue");
    let counter = Counter::new(display.clone(), "countValue").shared();
    let mut dispatcher = EventDispatcher::new();

    let inc = Arc::clone(&counter);
    dispatcher.register("incrementBtn", event_types::CLICK, move |_| {
        inc.lock().unwrap().increment();
    });
    let dec = Arc::clone(&counter);
    dispatcher.register("decrementBtn", event_types::CLICK, move |_| {
        dec.lock().unwrap().decrement();
    });

    for _ in 0..3 {
        dispatcher.dispatch(&mut Event::click("incrementBtn"));
    }
    dispatcher.dispatch(&mut Event::click("decrementBtn"));
    assert_eq!(display.lock().unwrap().text("countValue"), Some("2"));

    display.lock().unwrap().unmount("countValue");
    dispatcher.dispatch(&mut Event::click("decrementBtn"));
    dispatcher.dispatch(&mut Event::click("decrementBtn"));
    dispatcher.dispatch(&mut Event::click("decrementBtn"));

    assert_eq!(counter.lock().unwrap().value(), -1);
    assert_eq!(display.lock().unwrap().text("countValue"), None);
}
