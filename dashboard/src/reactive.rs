//! Glue between `daed-core` stores and Leptos signals.

use daed_core::{forward_changes, Store};
use leptos::*;
use tokio::sync::{oneshot, watch};

use crate::context::DashboardContext;

/// Call `on_change` with every new value seen on `rx` until the current
/// reactive owner is cleaned up. Cleanup ends the listener task right away.
pub fn bridge<T, F>(rx: watch::Receiver<T>, on_change: F)
where
    T: Clone + 'static,
    F: Fn(T) + 'static,
{
    let (stop_tx, stop_rx) = oneshot::channel();
    on_cleanup(move || {
        let _ = stop_tx.send(());
    });

    spawn_local(forward_changes(rx, stop_rx, on_change));
}

/// Signal following the active language tag.
pub fn use_language() -> ReadSignal<String> {
    let ctx = expect_context::<DashboardContext>();
    let (language, set_language) = create_signal(ctx.language.get());
    bridge(ctx.language.subscribe(), move |tag| set_language.set(tag));
    language
}
