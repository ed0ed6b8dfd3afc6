//! Core geometry types and layout constants

use serde::{Deserialize, Serialize};

/// 2D point for pointer positions and window origins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, origin at top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from position and size
    pub fn from_pos_size(pos: Vec2, size: Size) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Position of the top-left corner
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Size of the rectangle
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether a point lies inside the rectangle
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Replace non-finite coordinates with zero so malformed geometry is
/// clamped, never propagated.
pub fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Minimum window size floor.
pub const MIN_WINDOW_SIZE: Size = Size {
    width: 200.0,
    height: 150.0,
};

/// Viewport width below which the desktop switches to the mobile layout.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Minimum horizontal displacement for a swipe gesture.
pub const SWIPE_THRESHOLD: f32 = 100.0;

/// Window chrome metrics used for hit testing.
pub struct ChromeMetrics {
    pub title_bar_height: f32,
    pub button_size: f32,
    pub button_gap: f32,
    pub button_margin: f32,
    pub resize_handle_size: f32,
}

/// Default chrome metrics
pub const CHROME: ChromeMetrics = ChromeMetrics {
    title_bar_height: 36.0,
    button_size: 20.0,
    button_gap: 8.0,
    button_margin: 12.0,
    resize_handle_size: 16.0,
};
