//! Drag and resize updates applied once per frame.
//!
//! Every function here is pure over the entity it is handed: the gesture
//! session supplies the snapshot captured at pointer-down (offset, initial
//! distance, initial scale) and the latest pointer sample.

use crate::config::WallConfig;
use crate::entities::{Photo, WallSticker, WallText};
use kurbo::{Point, Vec2};

/// Distances at or below this are treated as zero when resizing.
const MIN_RESIZE_DISTANCE: f64 = 1e-6;

/// The vertical range a dragged photo's top edge is confined to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalBand {
    /// Smallest allowed y.
    pub top: f64,
    /// Distance kept between the largest allowed y and the viewport bottom.
    pub bottom_margin: f64,
}

impl Default for VerticalBand {
    fn default() -> Self {
        Self::from_config(&WallConfig::default())
    }
}

impl VerticalBand {
    pub fn from_config(config: &WallConfig) -> Self {
        Self {
            top: config.band_top,
            bottom_margin: config.band_bottom_margin,
        }
    }

    /// Clamp a y coordinate for the given viewport height.
    ///
    /// On viewports shorter than `top + bottom_margin` the band is inverted
    /// and `top` wins.
    pub fn clamp(&self, y: f64, viewport_height: f64) -> f64 {
        y.min(viewport_height - self.bottom_margin).max(self.top)
    }
}

/// Move a photo so the grab offset stays under the pointer.
pub fn drag_photo(
    photo: &mut Photo,
    pointer: Point,
    offset: Vec2,
    band: &VerticalBand,
    viewport_height: f64,
) {
    let target = pointer - offset;
    photo.position = Point::new(target.x, band.clamp(target.y, viewport_height));
    photo.touch();
}

/// New position of a dragged decoration. Decorations are not clamped.
pub fn drag_decoration(pointer: Point, offset: Vec2) -> Point {
    pointer - offset
}

/// Ratio of the current pointer distance from `center` to the distance
/// captured at pointer-down.
///
/// Returns `None` when the initial distance is degenerate, in which case the
/// resize has no effect.
pub fn resize_ratio(center: Point, pointer: Point, initial_distance: f64) -> Option<f64> {
    if !initial_distance.is_finite() || initial_distance <= MIN_RESIZE_DISTANCE {
        return None;
    }
    let ratio = center.distance(pointer) / initial_distance;
    ratio.is_finite().then_some(ratio)
}

/// Scale a sticker around its center. Returns true if anything changed.
pub fn resize_sticker(
    sticker: &mut WallSticker,
    pointer: Point,
    initial_distance: f64,
    initial_scale: f64,
    min_scale: f64,
) -> bool {
    match resize_ratio(sticker.position, pointer, initial_distance) {
        Some(ratio) => {
            sticker.set_scale(initial_scale * ratio, min_scale);
            true
        }
        None => false,
    }
}

/// Resize a text around its center. Returns true if anything changed.
pub fn resize_text(
    text: &mut WallText,
    pointer: Point,
    initial_distance: f64,
    initial_font_size: f64,
    min_font_size: f64,
) -> bool {
    match resize_ratio(text.position, pointer, initial_distance) {
        Some(ratio) => {
            text.set_font_size(initial_font_size * ratio, min_font_size);
            true
        }
        None => false,
    }
}
