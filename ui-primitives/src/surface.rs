use alloc::format;
use alloc::string::String;

use crate::{ContentSize, ScrollPosition, ViewportSize};

/// The element an inline style is read from or written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleTarget {
    /// The document root (`<html>`).
    Root,
    Body,
}

/// Inline style properties touched by the scroll-block strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleProperty {
    Top,
    Left,
    ScrollBehavior,
}

impl StyleProperty {
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::ScrollBehavior => "scroll-behavior",
        }
    }
}

/// The rendering surface boundary.
///
/// Adapters implement this over a real document (e.g. via DOM bindings) or a simulated one.
/// All reads are synchronous reads of current surface state. Methods take `&self`: a surface is
/// shared by the ruler and every strategy, the same way a document is.
///
/// When [`Surface::is_available`] returns `false`, callers in this crate never use the other
/// methods, so implementations may return anything from them.
pub trait Surface {
    /// Platform probe: is there an interactive rendering surface at all?
    fn is_available(&self) -> bool;

    fn viewport_size(&self) -> ViewportSize;

    fn scroll_position(&self) -> ScrollPosition;

    fn content_size(&self) -> ContentSize;

    /// Returns the inline style value, or an empty string when it is not set.
    fn style(&self, target: StyleTarget, property: StyleProperty) -> String;

    /// Sets an inline style. An empty `value` removes the property.
    fn set_style(&self, target: StyleTarget, property: StyleProperty, value: &str);

    /// Toggles the document-level marker that pins the page while scroll is blocked.
    fn set_scroll_block_marker(&self, blocked: bool);

    fn scroll_to(&self, position: ScrollPosition);
}

/// A surface for non-interactive contexts: reports itself unavailable, reads zero, ignores
/// writes.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedSurface;

impl Surface for DetachedSurface {
    fn is_available(&self) -> bool {
        false
    }

    fn viewport_size(&self) -> ViewportSize {
        ViewportSize::ZERO
    }

    fn scroll_position(&self) -> ScrollPosition {
        ScrollPosition::ORIGIN
    }

    fn content_size(&self) -> ContentSize {
        ContentSize::default()
    }

    fn style(&self, _target: StyleTarget, _property: StyleProperty) -> String {
        String::new()
    }

    fn set_style(&self, _target: StyleTarget, _property: StyleProperty, _value: &str) {}

    fn set_scroll_block_marker(&self, _blocked: bool) {}

    fn scroll_to(&self, _position: ScrollPosition) {}
}

/// Formats a number as a CSS pixel length (`-1500px`, `12.5px`, `0px`).
pub fn css_pixels(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        // Also normalizes `-0.0`, which would otherwise print as `-0px`.
        return String::from("0px");
    }
    format!("{value}px")
}
