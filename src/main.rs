//! Dealflow Frontend Entry Point

mod models;
mod format;
mod board;
mod gateway;
mod context;
mod store;
mod components;
mod pages;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
