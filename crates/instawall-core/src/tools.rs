//! Drawing mode flags for the wall.

use crate::entities::SerializableColor;
use serde::{Deserialize, Serialize};

/// The tool a bare-surface press resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Presses on the bare wall clear the selection.
    #[default]
    Select,
    /// Presses on the bare wall start a doodle.
    Doodle,
    /// Presses and drags delete nearby doodles.
    Eraser,
}

/// Mode flags and brush settings, read on every pointer-down.
///
/// The doodle panel keeps `doodling` on while the eraser is active, so the
/// eraser always takes precedence over drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolManager {
    doodling: bool,
    erasing: bool,
    /// Color for new doodles and text.
    pub stroke_color: SerializableColor,
    /// Width for new doodles.
    pub stroke_width: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl ToolManager {
    /// Create a manager in select mode with the default amber brush.
    pub fn new(stroke_width: f64) -> Self {
        Self {
            doodling: false,
            erasing: false,
            stroke_color: SerializableColor::amber(),
            stroke_width,
        }
    }

    pub fn is_doodling(&self) -> bool {
        self.doodling
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    /// Whether the brush color is the live tool (highlighted in the palette).
    pub fn drawing_active(&self) -> bool {
        self.doodling && !self.erasing
    }

    /// The tool a bare-surface press will start.
    pub fn current_tool(&self) -> ToolKind {
        if self.erasing {
            ToolKind::Eraser
        } else if self.doodling {
            ToolKind::Doodle
        } else {
            ToolKind::Select
        }
    }

    /// Turn doodle mode on or off. Always leaves the eraser.
    pub fn set_doodling(&mut self, on: bool) {
        self.doodling = on;
        self.erasing = false;
    }

    /// Turn the eraser on or off. Enabling it keeps the doodle panel engaged.
    pub fn set_erasing(&mut self, on: bool) {
        self.erasing = on;
        if on {
            self.doodling = true;
        }
    }

    /// Pick a brush color, switching to drawing.
    pub fn choose_color(&mut self, color: SerializableColor) {
        self.stroke_color = color;
        self.set_doodling(true);
    }
}
