//! waypoint-wasm: browser bindings for waypoint-router
//!
//! Wires the router to `window.history` and exports it to JavaScript
//! together with the application's route table.

pub mod logger;
pub mod views;

#[cfg(feature = "wasm")]
pub mod browser;

#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::*;

#[cfg(feature = "wasm")]
pub use browser::BrowserHistory;

pub use views::{app_routes, app_table, AppView};
