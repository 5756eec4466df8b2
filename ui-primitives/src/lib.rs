//! Headless browser-coordination primitives for UI component libraries.
//!
//! Every overlay, list, toggle and radio group sits on top of three small stateful services:
//!
//! - [`ViewportRuler`]: viewport size and scroll offset, plus throttled resize/orientation
//!   notifications.
//! - [`BlockScrollStrategy`]: freezes document scroll while a modal overlay is open and restores
//!   it without drift, at most one block at a time across the process.
//! - [`SelectionModel`]: single/multiple selection over a caller-owned value, with one diffed
//!   change notification per operation.
//!
//! It is UI-agnostic. An adapter is expected to provide:
//! - a [`Surface`] (viewport geometry, scroll offsets, inline styles, scroll-to)
//! - a [`Scheduler`] for deferred callbacks
//! - forwarding of the surface's resize/orientation events to [`ViewportRuler::handle_signal`]
//!
//! For an in-memory surface and an owning selection controller, see the `ui-primitives-adapter`
//! crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod scheduler;
mod scroll_block;
mod selection;
mod surface;
mod types;
mod viewport_ruler;


pub use scheduler::{ManualScheduler, Scheduler, Task, TaskId};
pub use scroll_block::{
    BlockScrollStrategy, BlockState, NoopScrollStrategy, PreviousStyles, ScrollBlockArbiter,
    ScrollStrategy,
};
pub use selection::{
    OnSelectionChange, SelectionChange, SelectionModel, SelectionOp, SelectionOptions,
    SelectionState, SelectionValue, reduce,
};
pub use surface::{DetachedSurface, StyleProperty, StyleTarget, Surface, css_pixels};
pub use types::{ContentSize, ScrollPosition, SurfaceSignal, ViewportRect, ViewportSize};
pub use viewport_ruler::{
    ChangeCallback, ChangeSubscription, DEFAULT_THROTTLE_MS, RulerOptions, ViewportRuler,
};
