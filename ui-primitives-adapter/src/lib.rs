//! Adapter utilities for the `ui-primitives` crate.
//!
//! The `ui-primitives` crate is UI-agnostic and only talks to a `Surface` trait. This crate
//! provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - An in-memory document (`MemorySurface`) for headless hosts, tests and demos
//! - A selection controller that owns its value (`SelectionController`)
//!
//! This crate is intentionally framework-agnostic (no DOM/wasm bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod memory_surface;

#[cfg(test)]
mod tests;

pub use controller::SelectionController;
pub use memory_surface::{MemorySurface, SurfaceSnapshot};
