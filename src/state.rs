//! UI-side collaborators the services write into.
//!
//! DESIGN
//! ======
//! The services never own UI state. They receive a `Ui` bundle per call:
//! a `StateSink` that stores whole-value replacements of the app slots and
//! a `Notifier` that shows toasts. `AppStore` and `ToastLog` are the plain
//! in-memory implementations used by headless front-ends and tests.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::time::Duration;

use serde_json::{Value, json};

// =============================================================================
// CAPABILITIES
// =============================================================================

/// Global store mutations the services perform. Every setter replaces the
/// slot wholesale.
pub trait StateSink: Send {
    /// Replace the global default-state blob.
    fn set_data(&mut self, data: Value);
    /// Point empty active slots at defaults drawn from the current data.
    fn set_default_active_entities(&mut self);
    fn set_active_snippet(&mut self, snippet: Value);
    fn set_active_label(&mut self, label: Value);
    /// Leave label edit mode.
    fn close_label_edit(&mut self);
}

/// Toast presentation.
pub trait Notifier: Send {
    fn success(&mut self, message: &str);
    /// Show an error that auto-dismisses after `duration`.
    fn error(&mut self, message: &str, duration: Duration);
}

/// Per-call handle on the caller's UI.
pub struct Ui<'a> {
    pub store: &'a mut dyn StateSink,
    pub notifier: &'a mut dyn Notifier,
}

impl<'a> Ui<'a> {
    pub fn new(store: &'a mut dyn StateSink, notifier: &'a mut dyn Notifier) -> Self {
        Self { store, notifier }
    }
}

/// Value the active snippet slot holds when nothing is selected.
#[must_use]
pub fn empty_snippet() -> Value {
    json!({
        "id": null,
        "title": "",
        "content": "",
        "language": null,
        "tabs": null,
        "label": { "name": "" }
    })
}

// =============================================================================
// APP STORE
// =============================================================================

/// In-memory application store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppStore {
    /// Last default-state blob fetched from the server.
    pub data: Value,
    pub active_snippet: Value,
    pub active_label: Value,
    pub show_label_edit: bool,
}

impl AppStore {
    #[must_use]
    pub fn new() -> Self {
        Self { active_snippet: empty_snippet(), ..Self::default() }
    }
}

fn is_unset(slot: &Value) -> bool {
    slot["id"].is_null()
}

fn first_of(data: &Value, key: &str) -> Option<Value> {
    data[key].as_array().and_then(|items| items.first()).cloned()
}

impl StateSink for AppStore {
    fn set_data(&mut self, data: Value) {
        self.data = data;
    }

    fn set_default_active_entities(&mut self) {
        if is_unset(&self.active_label) {
            self.active_label = first_of(&self.data, "labels").unwrap_or(Value::Null);
        }
        if is_unset(&self.active_snippet) {
            self.active_snippet = first_of(&self.data, "snippets").unwrap_or_else(empty_snippet);
        }
    }

    fn set_active_snippet(&mut self, snippet: Value) {
        self.active_snippet = snippet;
    }

    fn set_active_label(&mut self, label: Value) {
        self.active_label = label;
    }

    fn close_label_edit(&mut self) {
        self.show_label_edit = false;
    }
}

// =============================================================================
// TOAST LOG
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// Auto-dismiss delay; `None` uses the presenter's default.
    pub duration: Option<Duration>,
}

/// Notifier that records every toast in order and mirrors it to the log.
#[derive(Clone, Debug, Default)]
pub struct ToastLog {
    pub toasts: Vec<Toast>,
}

impl ToastLog {
    #[must_use]
    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.toasts.iter().map(|t| t.message.as_str())
    }
}

impl Notifier for ToastLog {
    fn success(&mut self, message: &str) {
        tracing::info!(toast = message, "toast success");
        self.toasts.push(Toast { kind: ToastKind::Success, message: message.to_owned(), duration: None });
    }

    fn error(&mut self, message: &str, duration: Duration) {
        tracing::warn!(toast = message, duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX), "toast error");
        self.toasts.push(Toast { kind: ToastKind::Error, message: message.to_owned(), duration: Some(duration) });
    }
}
