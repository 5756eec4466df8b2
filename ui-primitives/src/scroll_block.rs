use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::surface::css_pixels;
use crate::{ScrollPosition, StyleProperty, StyleTarget, Surface, ViewportRuler};

const NO_HOLDER: u64 = 0;

/// Scroll behavior forced while restoring the scroll position, so the jump is not animated.
const IMMEDIATE_SCROLL_BEHAVIOR: &str = "auto";

/// A strategy an overlay applies to the page scroll while it is attached.
pub trait ScrollStrategy {
    fn enable(&mut self);

    fn disable(&mut self);

    fn is_enabled(&self) -> bool;
}

/// Leaves the page scroll untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScrollStrategy;

impl ScrollStrategy for NoopScrollStrategy {
    fn enable(&mut self) {}

    fn disable(&mut self) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

#[derive(Debug)]
struct ArbiterState {
    holder: AtomicU64,
    next_id: AtomicU64,
}

/// Process-wide arbitration of "scroll blocking is active".
///
/// Create one per document and hand clones to every [`BlockScrollStrategy`]. At most one
/// strategy holds the block at a time; acquiring is a single compare-and-swap, so no other
/// strategy can observe a half-taken block.
#[derive(Clone, Debug)]
pub struct ScrollBlockArbiter {
    state: Arc<ArbiterState>,
}

impl Default for ScrollBlockArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollBlockArbiter {
    pub fn new() -> Self {
        Self {
            state: Arc::new(ArbiterState {
                holder: AtomicU64::new(NO_HOLDER),
                next_id: AtomicU64::new(NO_HOLDER + 1),
            }),
        }
    }

    /// Hands out a fresh, non-zero participant id.
    pub fn register(&self) -> u64 {
        self.state.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn is_active(&self) -> bool {
        self.holder().is_some()
    }

    pub fn holder(&self) -> Option<u64> {
        match self.state.holder.load(Ordering::Acquire) {
            NO_HOLDER => None,
            id => Some(id),
        }
    }

    /// Takes the block for `id` if nobody holds it. Returns `false` otherwise, including when
    /// `id` already holds it.
    pub fn try_acquire(&self, id: u64) -> bool {
        debug_assert_ne!(id, NO_HOLDER, "participant ids are non-zero");
        self.state
            .holder
            .compare_exchange(NO_HOLDER, id, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Releases the block if `id` holds it. Returns whether it did.
    pub fn release(&self, id: u64) -> bool {
        self.state
            .holder
            .compare_exchange(id, NO_HOLDER, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Inline `top`/`left` of the document root captured before blocking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreviousStyles {
    pub top: String,
    pub left: String,
}

/// Per-strategy bookkeeping. `previous_*` are only meaningful while `enabled`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockState {
    pub enabled: bool,
    pub previous_scroll_position: ScrollPosition,
    pub previous_styles: PreviousStyles,
}

/// Freezes document scroll while an overlay is open, and restores it without drift.
///
/// The page is pinned by offsetting the root by the negated scroll offset and setting the
/// surface's block marker; content stays visually in place. Enabling while any other strategy
/// holds the block is a no-op, so overlapping overlays never stack or clobber each other's
/// restore state.
///
/// A strategy that is dropped while enabled releases its block.
pub struct BlockScrollStrategy {
    ruler: ViewportRuler,
    surface: Rc<dyn Surface>,
    arbiter: ScrollBlockArbiter,
    id: u64,
    state: BlockState,
}

impl BlockScrollStrategy {
    /// Reads and writes go through the ruler's surface.
    pub fn new(ruler: ViewportRuler, arbiter: ScrollBlockArbiter) -> Self {
        let surface = Rc::clone(ruler.surface());
        let id = arbiter.register();
        Self {
            ruler,
            surface,
            arbiter,
            id,
            state: BlockState::default(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> &BlockState {
        &self.state
    }

    /// Blocking is engaged only when no block is active anywhere and the content overflows the
    /// viewport along at least one axis.
    pub fn can_be_enabled(&self) -> bool {
        if !self.surface.is_available() || self.arbiter.is_active() {
            return false;
        }
        let viewport = self.ruler.viewport_size();
        self.surface.content_size().overflows(viewport)
    }

    pub fn enable(&mut self) {
        if self.state.enabled || !self.can_be_enabled() {
            return;
        }
        // Check-and-set happens here, with no suspension point before the marker is written.
        if !self.arbiter.try_acquire(self.id) {
            return;
        }

        let scroll = self.ruler.viewport_scroll_position();
        let previous_styles = PreviousStyles {
            top: self.surface.style(StyleTarget::Root, StyleProperty::Top),
            left: self.surface.style(StyleTarget::Root, StyleProperty::Left),
        };

        self.surface.set_style(
            StyleTarget::Root,
            StyleProperty::Left,
            &css_pixels(-scroll.left),
        );
        self.surface
            .set_style(StyleTarget::Root, StyleProperty::Top, &css_pixels(-scroll.top));
        self.surface.set_scroll_block_marker(true);

        pdebug!(
            id = self.id,
            top = scroll.top,
            left = scroll.left,
            "BlockScrollStrategy::enable"
        );
        self.state = BlockState {
            enabled: true,
            previous_scroll_position: scroll,
            previous_styles,
        };
    }

    pub fn disable(&mut self) {
        if !self.state.enabled {
            return;
        }
        if !self.surface.is_available() {
            // Keep the block and the restore state until the surface comes back.
            return;
        }

        let surface = &self.surface;
        let root_behavior = surface.style(StyleTarget::Root, StyleProperty::ScrollBehavior);
        let body_behavior = surface.style(StyleTarget::Body, StyleProperty::ScrollBehavior);
        surface.set_style(
            StyleTarget::Root,
            StyleProperty::ScrollBehavior,
            IMMEDIATE_SCROLL_BEHAVIOR,
        );
        surface.set_style(
            StyleTarget::Body,
            StyleProperty::ScrollBehavior,
            IMMEDIATE_SCROLL_BEHAVIOR,
        );

        let previous = core::mem::take(&mut self.state.previous_styles);
        surface.set_style(StyleTarget::Root, StyleProperty::Left, &previous.left);
        surface.set_style(StyleTarget::Root, StyleProperty::Top, &previous.top);
        surface.set_scroll_block_marker(false);
        let released = self.arbiter.release(self.id);
        debug_assert!(released, "enabled strategy must hold the block");

        let restore = self.state.previous_scroll_position;
        surface.scroll_to(restore);

        surface.set_style(StyleTarget::Root, StyleProperty::ScrollBehavior, &root_behavior);
        surface.set_style(StyleTarget::Body, StyleProperty::ScrollBehavior, &body_behavior);

        pdebug!(
            id = self.id,
            top = restore.top,
            left = restore.left,
            "BlockScrollStrategy::disable"
        );
        self.state = BlockState::default();
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }
}

impl ScrollStrategy for BlockScrollStrategy {
    fn enable(&mut self) {
        BlockScrollStrategy::enable(self);
    }

    fn disable(&mut self) {
        BlockScrollStrategy::disable(self);
    }

    fn is_enabled(&self) -> bool {
        BlockScrollStrategy::is_enabled(self)
    }
}

impl Drop for BlockScrollStrategy {
    fn drop(&mut self) {
        self.disable();
    }
}

impl fmt::Debug for BlockScrollStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockScrollStrategy")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
