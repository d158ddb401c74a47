//! Point eraser for doodle lines.

use crate::config::WallConfig;
use crate::entities::{DoodleLine, EntityId};
use kurbo::Point;

/// Removes whole doodle lines that pass near the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraseBrush {
    /// A line is erased when any of its samples is strictly closer than this.
    pub radius: f64,
}

impl Default for EraseBrush {
    fn default() -> Self {
        Self::from_config(&WallConfig::default())
    }
}

impl EraseBrush {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn from_config(config: &WallConfig) -> Self {
        Self::new(config.erase_radius)
    }

    /// Erase every line near `point`, returning the ids removed in order.
    pub fn erase(&self, lines: &mut Vec<DoodleLine>, point: Point) -> Vec<EntityId> {
        let mut removed = Vec::new();
        lines.retain(|line| {
            if line.is_near(point, self.radius) {
                removed.push(line.id);
                false
            } else {
                true
            }
        });
        removed
    }
}
