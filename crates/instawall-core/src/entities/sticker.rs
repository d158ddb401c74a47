//! Free-standing emoji stickers.

use super::{EntityId, WallEntity};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rendered glyph size at scale 1.
pub const STICKER_GLYPH_SIZE: f64 = 72.0;

/// Glyphs offered by the sticker palette.
pub const STICKER_PALETTE: &[&str] = &[
    "❤️", "✨", "🌈", "🐶", "🍭", "☕️", "📷", "🌸", "🍔", "🍦", "🏖️", "🎈",
];

/// A sticker placed directly on the wall, anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSticker {
    pub(crate) id: EntityId,
    pub glyph: String,
    /// Center of the glyph.
    pub position: Point,
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl WallSticker {
    /// Create a sticker at scale 1.
    pub fn new(glyph: impl Into<String>, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            glyph: glyph.into(),
            position,
            scale: 1.0,
            rotation: 0.0,
        }
    }

    /// Set the scale, never going below `floor`.
    pub fn set_scale(&mut self, scale: f64, floor: f64) {
        self.scale = if scale.is_finite() { scale.max(floor) } else { floor };
    }
}

impl WallEntity for WallSticker {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let half = STICKER_GLYPH_SIZE * self.scale / 2.0;
        Rect::new(
            self.position.x - half,
            self.position.y - half,
            self.position.x + half,
            self.position.y + half,
        )
    }
}
