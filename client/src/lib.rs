//! # client
//!
//! Leptos + WASM frontend for the authgate session core.
//!
//! This crate contains pages, components, reactive state, the GoTrue identity
//! provider, and the browser glue that feeds visibility, unload and route
//! changes into `authgate::AuthGate`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
