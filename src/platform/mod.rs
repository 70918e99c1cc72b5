//! Platform abstraction layer
//!
//! The simulation itself is platform-free. This layer wires it to a host:
//! - `web` (wasm32): `wasm_bindgen` facade for the browser front end, backed
//!   by LocalStorage
//!
//! The native host is the headless runner in `main.rs`.

#[cfg(target_arch = "wasm32")]
pub mod web;
