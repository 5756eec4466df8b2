/// Visible size of the rendering surface, in device-independent pixels.
///
/// `(0, 0)` means "unknown": the surface is unavailable (headless / non-interactive context).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Current document scroll offset. Both fields are always `>= 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPosition {
    pub top: f64,
    pub left: f64,
}

impl ScrollPosition {
    pub const ORIGIN: Self = Self {
        top: 0.0,
        left: 0.0,
    };

    /// Builds a position, clamping negative and non-finite offsets to `0`.
    pub fn new(top: f64, left: f64) -> Self {
        Self {
            top: non_negative(top),
            left: non_negative(left),
        }
    }
}

/// Viewport bounding box in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportRect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl ViewportRect {
    pub fn from_parts(scroll: ScrollPosition, size: ViewportSize) -> Self {
        Self {
            top: scroll.top,
            left: scroll.left,
            bottom: scroll.top + size.height,
            right: scroll.left + size.width,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Full scrollable size of the document content (`scrollWidth` / `scrollHeight`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentSize {
    pub width: f64,
    pub height: f64,
}

impl ContentSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the content is larger than `viewport` along either axis.
    pub fn overflows(&self, viewport: ViewportSize) -> bool {
        self.height > viewport.height || self.width > viewport.width
    }
}

/// A change signal fired by the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurfaceSignal {
    Resize,
    OrientationChange,
}

pub(crate) fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
