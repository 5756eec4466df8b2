use alloc::collections::BTreeMap;
use alloc::string::String;
use core::cell::{Cell, RefCell};

use ui_primitives::{
    ContentSize, ScrollPosition, StyleProperty, StyleTarget, Surface, ViewportSize,
};

/// A serializable picture of a [`MemorySurface`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceSnapshot {
    pub viewport: ViewportSize,
    pub content: ContentSize,
    pub scroll: ScrollPosition,
    pub blocked: bool,
    pub root_top: String,
    pub root_left: String,
}

/// An in-memory document implementing [`Surface`].
///
/// It behaves like a browser window in the ways the core cares about:
/// - scrolling is clamped to `content - viewport`
/// - setting the block marker pins the root, so the window scroll drops to the origin and user
///   scrolling is ignored until the marker is removed
/// - a programmatic scroll while `scroll-behavior: smooth` is in effect on the root or body is
///   counted as animated
///
/// Useful for headless hosts, tests and demos.
#[derive(Debug)]
pub struct MemorySurface {
    available: Cell<bool>,
    viewport: Cell<ViewportSize>,
    content: Cell<ContentSize>,
    scroll: Cell<ScrollPosition>,
    blocked: Cell<bool>,
    styles: RefCell<BTreeMap<(StyleTarget, StyleProperty), String>>,
    animated_scrolls: Cell<usize>,
}

impl MemorySurface {
    pub fn new(viewport: ViewportSize, content: ContentSize) -> Self {
        Self {
            available: Cell::new(true),
            viewport: Cell::new(viewport),
            content: Cell::new(content),
            scroll: Cell::new(ScrollPosition::ORIGIN),
            blocked: Cell::new(false),
            styles: RefCell::new(BTreeMap::new()),
            animated_scrolls: Cell::new(0),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Resizes the window. The adapter still has to forward the resize signal to the ruler.
    pub fn resize(&self, viewport: ViewportSize) {
        self.viewport.set(viewport);
        self.scroll.set(self.clamp(self.scroll.get()));
    }

    pub fn set_content_size(&self, content: ContentSize) {
        self.content.set(content);
        self.scroll.set(self.clamp(self.scroll.get()));
    }

    /// A scroll initiated by the user (wheel, keyboard). Ignored while blocked.
    pub fn user_scroll_to(&self, position: ScrollPosition) -> bool {
        if self.blocked.get() {
            return false;
        }
        self.scroll.set(self.clamp(position));
        true
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.get()
    }

    /// Number of programmatic scrolls performed while smooth scrolling was in effect.
    pub fn animated_scrolls(&self) -> usize {
        self.animated_scrolls.get()
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            viewport: self.viewport.get(),
            content: self.content.get(),
            scroll: self.scroll.get(),
            blocked: self.blocked.get(),
            root_top: self.style(StyleTarget::Root, StyleProperty::Top),
            root_left: self.style(StyleTarget::Root, StyleProperty::Left),
        }
    }

    fn max_scroll(&self) -> ScrollPosition {
        let viewport = self.viewport.get();
        let content = self.content.get();
        ScrollPosition::new(
            content.height - viewport.height,
            content.width - viewport.width,
        )
    }

    fn clamp(&self, position: ScrollPosition) -> ScrollPosition {
        let max = self.max_scroll();
        ScrollPosition::new(position.top.min(max.top), position.left.min(max.left))
    }

    fn smooth_in_effect(&self) -> bool {
        let styles = self.styles.borrow();
        [StyleTarget::Root, StyleTarget::Body].iter().any(|target| {
            styles
                .get(&(*target, StyleProperty::ScrollBehavior))
                .is_some_and(|v| v == "smooth")
        })
    }
}

impl Surface for MemorySurface {
    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn viewport_size(&self) -> ViewportSize {
        self.viewport.get()
    }

    fn scroll_position(&self) -> ScrollPosition {
        self.scroll.get()
    }

    fn content_size(&self) -> ContentSize {
        self.content.get()
    }

    fn style(&self, target: StyleTarget, property: StyleProperty) -> String {
        self.styles
            .borrow()
            .get(&(target, property))
            .cloned()
            .unwrap_or_default()
    }

    fn set_style(&self, target: StyleTarget, property: StyleProperty, value: &str) {
        let mut styles = self.styles.borrow_mut();
        if value.is_empty() {
            styles.remove(&(target, property));
        } else {
            styles.insert((target, property), String::from(value));
        }
    }

    fn set_scroll_block_marker(&self, blocked: bool) {
        self.blocked.set(blocked);
        if blocked {
            // The pinned root no longer scrolls the window.
            self.scroll.set(ScrollPosition::ORIGIN);
        }
    }

    fn scroll_to(&self, position: ScrollPosition) {
        if self.smooth_in_effect() {
            self.animated_scrolls.set(self.animated_scrolls.get() + 1);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "ui_primitives_adapter",
            top = position.top,
            left = position.left,
            "MemorySurface::scroll_to"
        );
        if self.blocked.get() {
            return;
        }
        self.scroll.set(self.clamp(position));
    }
}
