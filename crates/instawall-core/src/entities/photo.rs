//! Instant-print photos pinned to the wall.

use super::{EntityId, WallEntity, now_millis};
use crate::develop::DevelopState;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Width of a print on the wall.
pub const PHOTO_WIDTH: f64 = 200.0;
/// Height of a print on the wall.
pub const PHOTO_HEIGHT: f64 = 240.0;

/// Sticker percentages stay inside this band so glyphs don't fall off the print.
const PHOTO_STICKER_MIN_PERCENT: f64 = 5.0;
const PHOTO_STICKER_MAX_PERCENT: f64 = 95.0;

/// Film look applied by the virtual camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFilter {
    #[default]
    Normal,
    Vintage,
    Bw,
    Cool,
    Warm,
}

/// How the print is attached to the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinStyle {
    #[default]
    Simple,
    Tape,
    Clip,
    None,
}

/// Border decoration of the print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStyle {
    #[default]
    Classic,
    Pink,
    Mint,
    Dots,
    Stripes,
    Checkered,
}

/// A small sticker attached to a photo, positioned in percent of the print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSticker {
    pub id: EntityId,
    pub glyph: String,
    pub x: f64,
    pub y: f64,
}

impl PhotoSticker {
    /// Create a sticker in the middle of the print.
    pub fn new(glyph: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            glyph: glyph.into(),
            x: 50.0,
            y: 50.0,
        }
    }

    /// Move to the given percentages, kept inside the print.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x.clamp(PHOTO_STICKER_MIN_PERCENT, PHOTO_STICKER_MAX_PERCENT);
        self.y = y.clamp(PHOTO_STICKER_MIN_PERCENT, PHOTO_STICKER_MAX_PERCENT);
    }
}

/// Changes saved from the note editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEdit {
    pub note: String,
    pub stickers: Vec<PhotoSticker>,
    pub pin: PinStyle,
    pub frame: FrameStyle,
}

/// A photo on the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub(crate) id: EntityId,
    /// Image reference (URL or data URI).
    pub image_url: String,
    /// Top-left corner of the print.
    pub position: Point,
    /// Tilt in degrees.
    pub rotation: f64,
    /// Handwritten caption under the picture.
    pub note: String,
    pub filter: CameraFilter,
    /// Last-moved time in ms since the epoch.
    pub timestamp: u64,
    pub(crate) develop: DevelopState,
    pub stickers: Vec<PhotoSticker>,
    pub pin: PinStyle,
    pub frame: FrameStyle,
}

impl Photo {
    /// Create a freshly printed, still-developing photo.
    pub fn new(image_url: impl Into<String>, position: Point, filter: CameraFilter) -> Self {
        Self {
            id: Uuid::new_v4(),
            image_url: image_url.into(),
            position,
            rotation: 0.0,
            note: String::new(),
            filter,
            timestamp: now_millis(),
            develop: DevelopState::developing(),
            stickers: Vec::new(),
            pin: PinStyle::default(),
            frame: FrameStyle::default(),
        }
    }

    /// Builder: replace the develop state.
    pub fn with_develop_state(mut self, develop: DevelopState) -> Self {
        self.develop = develop;
        self
    }

    pub fn develop(&self) -> &DevelopState {
        &self.develop
    }

    pub fn is_developing(&self) -> bool {
        self.develop.is_developing()
    }

    pub fn is_shaken(&self) -> bool {
        self.develop.is_shaken()
    }

    pub fn shake_progress(&self) -> f64 {
        self.develop.shake_progress()
    }

    /// Whether the note editor may open this photo.
    pub fn can_open(&self) -> bool {
        self.develop.can_open()
    }

    /// Mark the photo as moved now.
    pub fn touch(&mut self) {
        self.timestamp = now_millis();
    }

    /// Write back the note editor's result.
    pub fn apply_note_edit(&mut self, edit: NoteEdit) {
        self.note = edit.note;
        self.stickers = edit.stickers;
        self.pin = edit.pin;
        self.frame = edit.frame;
    }
}

impl WallEntity for Photo {
    fn id(&self) -> EntityId {
        self.id
    }

    // Rotation is a few degrees at most, so the axis-aligned box is close enough.
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, Size::new(PHOTO_WIDTH, PHOTO_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_photo_defaults() {
        let photo = Photo::new("data:image/png;base64,", Point::new(10.0, 20.0), CameraFilter::Warm);
        assert!(photo.is_developing());
        assert!(!photo.is_shaken());
        assert!(!photo.can_open());
        assert_eq!(photo.pin, PinStyle::Simple);
        assert_eq!(photo.frame, FrameStyle::Classic);
        assert!(photo.stickers.is_empty());
    }

    #[test]
    fn test_bounds_and_hit() {
        let photo = Photo::new("a.png", Point::new(100.0, 100.0), CameraFilter::Normal);
        let bounds = photo.bounds();
        assert!((bounds.x1 - 300.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 340.0).abs() < f64::EPSILON);
        assert!(photo.hit_test(Point::new(150.0, 150.0), 0.0));
        assert!(!photo.hit_test(Point::new(350.0, 150.0), 0.0));
    }

    #[test]
    fn test_photo_sticker_stays_on_print() {
        let mut sticker = PhotoSticker::new("🌸");
        sticker.move_to(-20.0, 140.0);
        assert!((sticker.x - 5.0).abs() < f64::EPSILON);
        assert!((sticker.y - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_note_edit() {
        let mut photo = Photo::new("a.png", Point::ZERO, CameraFilter::Normal);
        photo.apply_note_edit(NoteEdit {
            note: "beach day".to_string(),
            stickers: vec![PhotoSticker::new("🏖️")],
            pin: PinStyle::Clip,
            frame: FrameStyle::Dots,
        });
        assert_eq!(photo.note, "beach day");
        assert_eq!(photo.stickers.len(), 1);
        assert_eq!(photo.pin, PinStyle::Clip);
        assert_eq!(photo.frame, FrameStyle::Dots);
    }

    #[test]
    fn test_serde_uses_snake_case_variants() {
        let photo = Photo::new("a.png", Point::ZERO, CameraFilter::Bw);
        let json = serde_json::to_string(&photo).unwrap();
        assert!(json.contains("\"bw\""));
        assert!(json.contains("\"classic\""));
        let back: Photo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, photo);
    }
}
