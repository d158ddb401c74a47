//! Headless InstaWall host.
//!
//! Replays a scripted pointer session against a [`Wall`] the way a windowed
//! host would drive it: raw pointer and key events, explicit frame ticks,
//! and collaborator calls from toolbars and dialogs.

use instawall_core::{
    CameraFilter, KeyEvent, MouseButton, PointerEvent, SerializableColor, Wall, WallConfig,
    WallDocument, WallEntity, WallError, WallEvent,
};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or replaying a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("wall error: {0}")]
    Wall(#[from] WallError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("script parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("step {step}: no photo at index {index}")]
    MissingPhoto { step: usize, index: usize },
}

/// Viewport dimensions in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

/// One host action. Positions are screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayStep {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// A display refresh.
    Frame,
    Key { key: String },
    Scroll { dx: f64, dy: f64 },
    Doodling { on: bool },
    Erasing { on: bool },
    /// Hex color such as `#3b82f6`.
    StrokeColor { color: String },
    AddSticker { glyph: String },
    AddText,
    PrintPhoto {
        url: String,
        #[serde(default)]
        filter: CameraFilter,
    },
    /// Photos are addressed by their index on the wall.
    FinishDeveloping { photo: usize },
    UndoLine,
    ClearDecorations,
    Teardown,
}

/// A scripted session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Overrides the default thresholds.
    #[serde(default)]
    pub config: Option<WallConfig>,
    #[serde(default)]
    pub viewport: Option<ViewportSize>,
    /// Content present before the first step.
    #[serde(default)]
    pub document: WallDocument,
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        log::info!("Loading replay script from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// The wall after the last step and every event it raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutput {
    pub document: WallDocument,
    pub events: Vec<WallEvent>,
}

impl ReplayOutput {
    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run a script. A config passed here wins over the one embedded in the
/// script.
pub fn run(script: ReplayScript, config: Option<WallConfig>) -> Result<ReplayOutput, ReplayError> {
    let config = config.or(script.config).unwrap_or_default();
    config.validate()?;

    let mut wall = Wall::with_document(script.document, config);
    if let Some(viewport) = script.viewport {
        wall.set_viewport(Size::new(viewport.width, viewport.height));
    }

    let mut events = Vec::new();
    for (index, step) in script.steps.into_iter().enumerate() {
        log::trace!("step {index}: {step:?}");
        apply_step(&mut wall, index, step)?;
        events.extend(wall.take_events());
    }
    wall.teardown();

    log::info!(
        "Replay finished: {} photos, {} lines, {} events",
        wall.document().photos.len(),
        wall.document().lines.len(),
        events.len()
    );
    Ok(ReplayOutput {
        document: wall.snapshot(),
        events,
    })
}

fn apply_step(wall: &mut Wall, index: usize, step: ReplayStep) -> Result<(), ReplayError> {
    match step {
        ReplayStep::Down { x, y } => wall.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }),
        ReplayStep::Move { x, y } => wall.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(x, y),
        }),
        ReplayStep::Up { x, y } => wall.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }),
        ReplayStep::Frame => {
            wall.on_frame();
        }
        ReplayStep::Key { key } => wall.handle_key_event(&KeyEvent::Pressed(key)),
        ReplayStep::Scroll { dx, dy } => wall.scroll_by(Vec2::new(dx, dy)),
        ReplayStep::Doodling { on } => wall.set_doodling(on),
        ReplayStep::Erasing { on } => wall.set_erasing(on),
        ReplayStep::StrokeColor { color } => {
            let parsed = SerializableColor::from_hex(&color).ok_or(ReplayError::InvalidColor(color))?;
            wall.set_stroke_color(parsed);
        }
        ReplayStep::AddSticker { glyph } => {
            wall.add_sticker(glyph);
        }
        ReplayStep::AddText => {
            wall.add_text();
        }
        ReplayStep::PrintPhoto { url, filter } => {
            wall.print_photo(url, filter, 0);
        }
        ReplayStep::FinishDeveloping { photo } => {
            let id = wall
                .document()
                .photos
                .get(photo)
                .map(|p| p.id())
                .ok_or(ReplayError::MissingPhoto { step: index, index: photo })?;
            wall.finish_developing(id);
        }
        ReplayStep::UndoLine => {
            wall.undo_last_line();
        }
        ReplayStep::ClearDecorations => wall.clear_decorations(),
        ReplayStep::Teardown => wall.teardown(),
    }
    Ok(())
}
