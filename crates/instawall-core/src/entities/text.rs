//! Free-standing handwritten text.

use super::{EntityId, SerializableColor, WallEntity};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Colors offered by the text palette.
pub const TEXT_PALETTE: [SerializableColor; 7] = [
    SerializableColor::new(0xfb, 0xbf, 0x24, 255),
    SerializableColor::new(0xf8, 0x71, 0x71, 255),
    SerializableColor::new(0x60, 0xa5, 0xfa, 255),
    SerializableColor::new(0x34, 0xd3, 0x99, 255),
    SerializableColor::new(0xa7, 0x8b, 0xfa, 255),
    SerializableColor::new(0x00, 0x00, 0x00, 255),
    SerializableColor::new(0xff, 0xff, 0xff, 255),
];

/// Approximate advance of a handwriting glyph relative to font size.
const GLYPH_ADVANCE: f64 = 0.6;
/// Line height relative to font size.
const LINE_HEIGHT: f64 = 1.2;
/// Horizontal padding on each side of the text.
const TEXT_PADDING: f64 = 8.0;

/// A text label placed directly on the wall, anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallText {
    pub(crate) id: EntityId,
    pub content: String,
    /// Center of the label.
    pub position: Point,
    pub color: SerializableColor,
    pub font_size: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl WallText {
    /// Create an empty label.
    pub fn new(position: Point, color: SerializableColor, font_size: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: String::new(),
            position,
            color,
            font_size,
            rotation: 0.0,
        }
    }

    /// Set the font size, never going below `floor`.
    pub fn set_font_size(&mut self, font_size: f64, floor: f64) {
        self.font_size = if font_size.is_finite() {
            font_size.max(floor)
        } else {
            floor
        };
    }
}

impl WallEntity for WallText {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Rect {
        // An empty label still shows a placeholder about one glyph wide.
        let chars = self.content.chars().count().max(1) as f64;
        let half_w = (chars * self.font_size * GLYPH_ADVANCE) / 2.0 + TEXT_PADDING;
        let half_h = self.font_size * LINE_HEIGHT / 2.0;
        Rect::new(
            self.position.x - half_w,
            self.position.y - half_h,
            self.position.x + half_w,
            self.position.y + half_h,
        )
    }
}
