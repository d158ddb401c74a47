//! Viewport module mapping host screen coordinates onto the wall surface.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// The visible window onto the wall surface.
///
/// The surface is wider than the window and scrolls horizontally. Pointer
/// events arrive in screen space; everything on the wall lives in surface
/// space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen position of the surface's top-left corner when unscrolled.
    pub origin: Point,
    /// Current scroll offset of the surface.
    pub scroll: Vec2,
    /// Size of the visible window.
    pub size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            scroll: Vec2::ZERO,
            size: Size::new(1280.0, 800.0),
        }
    }
}

impl Viewport {
    /// Create a viewport of the given size at the screen origin.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Transform from surface coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin.to_vec2() - self.scroll)
    }

    /// Transform from screen coordinates to surface coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(self.scroll - self.origin.to_vec2())
    }

    /// Convert a screen point to surface coordinates.
    pub fn screen_to_surface(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a surface point to screen coordinates.
    pub fn surface_to_screen(&self, surface_point: Point) -> Point {
        self.transform() * surface_point
    }

    /// Scroll by a delta, keeping the visible window on a surface of
    /// `surface_width`.
    pub fn scroll_by(&mut self, delta: Vec2, surface_width: f64) {
        let max_x = (surface_width - self.size.width).max(0.0);
        self.scroll.x = (self.scroll.x + delta.x).clamp(0.0, max_x);
        self.scroll.y += delta.y;
    }

    /// Center of the visible window in surface coordinates.
    ///
    /// New decorations are dropped here.
    pub fn center(&self) -> Point {
        Point::new(
            self.scroll.x + self.size.width / 2.0,
            self.scroll.y + self.size.height / 2.0,
        )
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }
}
