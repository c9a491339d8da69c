//! Controlled form state
//!
//! [`FieldStateMap`] is an immutable value: every operation returns a new map
//! and leaves the receiver untouched. [`FormState`] keeps the current map in
//! keyed hook state as an `Arc` snapshot, publishing a fresh snapshot on every
//! change so observers can detect it with `Arc::ptr_eq` alone.
//!
//! ```rust
//! use hookstate_core::{Event, HookContext};
//! use hookstate_widgets::{FieldStateMap, FormState};
//!
//! let ctx = HookContext::new();
//! let login = FormState::use_keyed(&ctx, "login", || {
//!     FieldStateMap::with_empty_fields(["id", "password"])
//! });
//!
//! login.handle_change(&Event::change("login", "id", "myuser")).unwrap();
//! assert_eq!(login.value("id").as_deref(), Some("myuser"));
//!
//! let mut submit = Event::submit("login");
//! let cleared = login.handle_submit(&mut submit);
//! assert!(submit.default_prevented());
//! assert_eq!(cleared.get("id"), Some(""));
//! ```

use std::sync::Arc;

use hookstate_core::{DefaultPrevented, Event, HookContext, State};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::FormError;

/// Field name -> value, in construction order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldStateMap {
    values: IndexMap<String, String>,
    #[serde(skip)]
    defaults: Arc<IndexMap<String, String>>,
}

impl FieldStateMap {
    /// Build a map whose initial values are also its reset defaults
    pub fn new<I, K, V>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let defaults: IndexMap<String, String> = defaults
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: defaults.clone(),
            defaults: Arc::new(defaults),
        }
    }

    /// Every field starts (and resets to) the empty string
    pub fn with_empty_fields<I, K>(names: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::new(names.into_iter().map(|name| (name, String::new())))
    }

    /// Copy of this map with `name` set to `value`
    ///
    /// Unknown names are inserted rather than rejected; use
    /// [`update_strict`](Self::update_strict) to refuse them.
    pub fn update(&self, name: &str, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.values.insert(name.to_string(), value.into());
        next
    }

    /// Like [`update`](Self::update) but only for fields present at construction
    pub fn update_strict(&self, name: &str, value: impl Into<String>) -> Result<Self, FormError> {
        if !self.defaults.contains_key(name) {
            return Err(FormError::UnknownField(name.to_string()));
        }
        Ok(self.update(name, value))
    }

    /// Map holding exactly the construction fields at their defaults
    pub fn reset(&self) -> Self {
        Self {
            values: (*self.defaults).clone(),
            defaults: Arc::clone(&self.defaults),
        }
    }

    /// Clear the form after a submission
    ///
    /// Same result as [`reset`](Self::reset). The token proves the host's
    /// default submit action was already suppressed.
    pub fn submit(&self, _prevented: DefaultPrevented) -> Self {
        self.reset()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every value equals its reset default
    pub fn is_pristine(&self) -> bool {
        self.values == *self.defaults
    }
}

/// Hook-backed controller for a [`FieldStateMap`]
#[derive(Clone, Debug)]
pub struct FormState {
    state: State<Arc<FieldStateMap>>,
    strict: bool,
}

impl FormState {
    /// Keyed form state; `init` runs only the first time `key` is seen
    pub fn use_keyed<F>(ctx: &HookContext, key: &str, init: F) -> Self
    where
        F: FnOnce() -> FieldStateMap,
    {
        Self {
            state: ctx.use_state_keyed(key, || Arc::new(init())),
            strict: false,
        }
    }

    /// Reject changes to fields the form was not built with
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Current immutable snapshot
    pub fn snapshot(&self) -> Arc<FieldStateMap> {
        self.state.get()
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.snapshot().get(name).map(str::to_string)
    }

    /// Update one field, publishing a new snapshot
    pub fn set_field(&self, name: &str, value: impl Into<String>) -> Result<Arc<FieldStateMap>, FormError> {
        let current = self.snapshot();
        let next = if self.strict {
            current.update_strict(name, value)?
        } else {
            current.update(name, value)
        };
        Ok(self.publish(next))
    }

    /// Apply a change event's `name`/`value` payload
    ///
    /// Rejected changes leave the state untouched.
    pub fn handle_change(&self, event: &Event) -> Result<Arc<FieldStateMap>, FormError> {
        let Some((name, value)) = event.change_value() else {
            return Err(FormError::NotAChange {
                target: event.target.clone(),
            });
        };
        let result = self.set_field(name, value);
        if let Err(err) = &result {
            tracing::warn!("FormState: rejected change on `{}`: {}", event.target, err);
        }
        result
    }

    pub fn reset(&self) -> Arc<FieldStateMap> {
        let next = self.snapshot().reset();
        self.publish(next)
    }

    /// Clear the form; the caller has already suppressed the default action
    pub fn submit(&self, prevented: DefaultPrevented) -> Arc<FieldStateMap> {
        let next = self.snapshot().submit(prevented);
        self.publish(next)
    }

    /// Submission handler: suppress the default action, record the data,
    /// then clear the form
    pub fn handle_submit(&self, event: &mut Event) -> Arc<FieldStateMap> {
        let prevented = event.prevent_default();
        let submitted = self.snapshot();
        tracing::info!(
            "FormState: `{}` submitted {:?}",
            event.target,
            submitted.fields().collect::<Vec<_>>()
        );
        self.submit(prevented)
    }

    fn publish(&self, next: FieldStateMap) -> Arc<FieldStateMap> {
        let next = Arc::new(next);
        tracing::debug!("FormState: publishing {:?}", next.values);
        self.state.set(Arc::clone(&next));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn login() -> FieldStateMap {
        FieldStateMap::with_empty_fields(["id", "password"])
    }

    fn prevented() -> DefaultPrevented {
        Event::submit("login").prevent_default()
    }

    #[test]
    fn test_update_changes_only_named_field() {
        let before = login();
        let after = before.update("id", "abc");

        assert_eq!(after.get("id"), Some("abc"));
        assert_eq!(after.get("password"), Some(""));
        // Receiver is untouched
        assert_eq!(before.get("id"), Some(""));
    }

    #[test]
    fn test_update_keeps_field_order() {
        let map = login().update("password", "x").update("id", "y");
        let names: Vec<&str> = map.fields().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["id", "password"]);
    }

    #[test]
    fn test_update_inserts_unknown_field() {
        let map = login().update("email", "a@b.c");
        assert_eq!(map.get("email"), Some("a@b.c"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_update_strict_rejects_unknown_field() {
        let err = login().update_strict("email", "a@b.c").unwrap_err();
        assert_eq!(err, FormError::UnknownField("email".to_string()));
        assert!(login().update_strict("id", "ok").is_ok());
    }

    #[test]
    fn test_reset_restores_defaults_and_drops_extra_fields() {
        let dirty = login().update("id", "u").update("email", "e");
        let reset = dirty.reset();

        assert_eq!(reset, login());
        assert!(reset.is_pristine());
        assert!(!reset.contains_field("email"));
    }

    #[test]
    fn test_reset_uses_non_empty_defaults() {
        let form = FieldStateMap::new([("lang", "ko"), ("q", "")]);
        let reset = form.update("lang", "en").reset();
        assert_eq!(reset.get("lang"), Some("ko"));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let map = login().update("id", "u").update("password", "p");
        assert_eq!(map.reset(), map.reset().reset());
    }

    #[test]
    fn test_submit_matches_reset() {
        let map = login().update("id", "u").update("password", "p");
        assert_eq!(map.submit(prevented()), map.reset());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let map = login().update("id", "u");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"id":"u","password":""}"#);
    }

    #[test]
    fn test_form_state_publishes_new_snapshot_per_change() {
        let ctx = HookContext::new();
        let form = FormState::use_keyed(&ctx, "login", login);

        let first = form.snapshot();
        assert!(Arc::ptr_eq(&first, &form.snapshot()));

        form.set_field("id", "u").unwrap();
        let second = form.snapshot();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(ctx.take_dirty());
    }

    #[test]
    fn test_form_state_survives_rebuild() {
        let ctx = HookContext::new();
        FormState::use_keyed(&ctx, "login", login)
            .set_field("id", "u")
            .unwrap();

        let rebuilt = FormState::use_keyed(&ctx, "login", || panic!("init must not rerun"));
        assert_eq!(rebuilt.value("id").as_deref(), Some("u"));
    }

    #[test]
    fn test_strict_form_rejects_and_keeps_state() {
        let ctx = HookContext::new();
        let form = FormState::use_keyed(&ctx, "login", login).strict(true);
        let before = form.snapshot();

        let result = form.handle_change(&Event::change("login", "email", "x"));
        assert_eq!(result.unwrap_err(), FormError::UnknownField("email".to_string()));
        assert!(Arc::ptr_eq(&before, &form.snapshot()));
        assert!(!ctx.is_dirty());
    }

    #[test]
    fn test_handle_change_rejects_non_change_event() {
        let ctx = HookContext::new();
        let form = FormState::use_keyed(&ctx, "login", login);

        let result = form.handle_change(&Event::click("login"));
        assert_eq!(
            result.unwrap_err(),
            FormError::NotAChange {
                target: "login".to_string()
            }
        );
    }

    #[test]
    fn test_handle_submit_prevents_default_and_clears() {
        let ctx = HookContext::new();
        let form = FormState::use_keyed(&ctx, "login", login);
        form.set_field("id", "u").unwrap();

        let mut event = Event::submit("login");
        let cleared = form.handle_submit(&mut event);

        assert!(event.default_prevented());
        assert_eq!(*cleared, login());
        assert_eq!(*form.snapshot(), login());
    }
}
