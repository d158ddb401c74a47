//! Handle definitions for decoration manipulation.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Distance the handle buttons sit outside the decoration's box.
const HANDLE_INSET: f64 = 4.0;

/// The kind of handle - determines what a press on it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Top-right button: deletes the decoration.
    Delete,
    /// Bottom-right button: scales the decoration around its center.
    Resize,
}

/// A manipulation handle on a selected decoration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: HandleKind,
    /// Position in surface coordinates.
    pub position: Point,
}

impl Handle {
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// Check if a surface point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.position.distance(point) <= tolerance
    }
}

/// Handles for a decoration with the given bounds.
pub fn decoration_handles(bounds: Rect) -> [Handle; 2] {
    [
        Handle::new(
            HandleKind::Delete,
            Point::new(bounds.x1 + HANDLE_INSET, bounds.y0 - HANDLE_INSET),
        ),
        Handle::new(
            HandleKind::Resize,
            Point::new(bounds.x1 + HANDLE_INSET, bounds.y1 + HANDLE_INSET),
        ),
    ]
}

/// Find which handle (if any) is hit at the given point. When both are in
/// reach the nearer one wins.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<HandleKind> {
    decoration_handles(bounds)
        .into_iter()
        .filter(|handle| handle.hit_test(point, tolerance))
        .min_by(|a, b| {
            a.position
                .distance(point)
                .total_cmp(&b.position.distance(point))
        })
        .map(|handle| handle.kind)
}
