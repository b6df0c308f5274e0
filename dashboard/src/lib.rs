//! daed web dashboard.
//!
//! Client-side rendered with Leptos. All sidebar behavior lives in
//! `daed-core`; this crate binds it to the DOM and the network.

use leptos::*;
use wasm_bindgen::prelude::wasm_bindgen;

mod api;
mod app;
mod components;
mod context;
mod logging;
mod reactive;

pub use app::App;

/// Log directive used when the page does not override it.
const DEFAULT_LOG_DIRECTIVE: &str = "daed_dashboard=debug,daed_core=debug";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(DEFAULT_LOG_DIRECTIVE);

    mount_to_body(App);
}
