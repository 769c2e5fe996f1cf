//! # birthday-reminder
//!
//! Leptos + WASM client for keeping track of friends' birthdays.
//!
//! Users register and sign in against a record-style user service, then
//! manage an in-memory list of friends with search, sort and an add/edit
//! dialog. Domain state (`state`), routing rules (`routes`) and validation
//! (`util`) are plain Rust and tested natively; browser glue is gated behind
//! the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: installs logging and mounts the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
