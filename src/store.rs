//! Toast Notification Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Provided once
//! at the app root; any handler can push a notification without threading
//! callbacks through the component tree.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

/// How long a toast stays on screen.
const TOAST_DISMISS_MS: u32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Toast state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    pub next_id: u32,
}

/// Type alias for the store
pub type ToastStore = Store<ToastState>;

/// Get the toast store from context
pub fn use_toasts() -> ToastStore {
    expect_context::<ToastStore>()
}

pub fn toast_success(store: &ToastStore, message: impl Into<String>) {
    push_toast(store, ToastKind::Success, message.into());
}

pub fn toast_error(store: &ToastStore, message: impl Into<String>) {
    push_toast(store, ToastKind::Error, message.into());
}

fn push_toast(store: &ToastStore, kind: ToastKind, message: String) {
    let id = {
        let next_id_field = store.next_id();
        let mut next_id = next_id_field.write();
        *next_id += 1;
        *next_id
    };
    store.toasts().write().push(Toast { id, kind, message });

    // Auto-dismiss; the store lives for the whole app, so the late write
    // is safe.
    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(TOAST_DISMISS_MS).await;
        store.toasts().write().retain(|t| t.id != id);
    });
}
