//! # client
//!
//! Leptos + WASM single-page frontend for the tasks & posts backend.
//!
//! This crate wires the platform-neutral `stores` crate to the browser:
//! `gloo-net` for HTTP, `localStorage` for the persisted token, and
//! `window.location` for the hard redirect after a 401. Store containers are
//! created once in [`app::App`] and handed to pages through context.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Client-side rendering entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
