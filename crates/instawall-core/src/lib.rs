//! InstaWall Core Library
//!
//! Platform-agnostic pointer interaction engine for the InstaWall photo wall:
//! dragging and shaking photos, placing and resizing decorations, doodling and
//! erasing, with move samples coalesced to one update per display frame.

pub mod config;
pub mod develop;
pub mod entities;
pub mod eraser;
pub mod error;
pub mod frame;
pub mod gesture;
pub mod input;
pub mod manipulation;
pub mod tools;
pub mod viewport;
pub mod wall;
pub mod widget;

pub use config::WallConfig;
pub use develop::{DevelopState, ShakeModel, ShakeOutcome};
pub use entities::{
    CameraFilter, DecorationKind, DecorationRef, DoodleLine, EntityId, FrameStyle, NoteEdit, Photo,
    PhotoSticker, PinStyle, SerializableColor, WallEntity, WallSticker, WallText,
};
pub use eraser::EraseBrush;
pub use error::{WallError, WallResult};
pub use frame::FrameMailbox;
pub use gesture::{ActiveGesture, GestureIntent, GestureSession, PointerTarget};
pub use input::{InputState, KeyEvent, MouseButton, PointerEvent};
pub use manipulation::VerticalBand;
pub use tools::{ToolKind, ToolManager};
pub use viewport::Viewport;
pub use wall::{Wall, WallDocument, WallEvent};
pub use widget::{Handle, HandleKind, WidgetManager, WidgetState};
