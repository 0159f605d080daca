pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;
pub mod workflow;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(app::App);
}
