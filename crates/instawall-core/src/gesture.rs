//! Pointer-down classification and the per-gesture session.
//!
//! A press resolves to exactly one [`GestureIntent`]. Intents that track the
//! pointer become an [`ActiveGesture`] owned by a [`GestureSession`], which
//! lives from pointer-down to pointer-up and holds the single pending move
//! sample for the next frame.

use crate::entities::{DecorationRef, DoodleLine, EntityId};
use crate::frame::FrameMailbox;
use crate::tools::{ToolKind, ToolManager};
use crate::widget::HandleKind;
use kurbo::{Point, Vec2};

/// What lies under the pointer at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The bare wall.
    Surface,
    Photo(EntityId),
    /// The body of a sticker or text.
    Decoration(DecorationRef),
    /// A handle on the selected decoration.
    Handle(DecorationRef, HandleKind),
}

/// The mode a pointer-down resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureIntent {
    DragPhoto(EntityId),
    DragDecoration(DecorationRef),
    ResizeDecoration(DecorationRef),
    /// Delete on press; no gesture follows.
    DeleteDecoration(DecorationRef),
    Erase,
    Draw,
    /// Clear selection and edit state; no gesture follows.
    Deselect,
}

/// Resolve a press on `target` under the current mode flags.
///
/// Entity targets win over the drawing modes, so photos and decorations stay
/// draggable while doodling. On the bare wall the eraser takes precedence.
pub fn classify(target: PointerTarget, tools: &ToolManager) -> GestureIntent {
    match target {
        PointerTarget::Photo(id) => GestureIntent::DragPhoto(id),
        PointerTarget::Decoration(decoration) => GestureIntent::DragDecoration(decoration),
        PointerTarget::Handle(decoration, HandleKind::Resize) => {
            GestureIntent::ResizeDecoration(decoration)
        }
        PointerTarget::Handle(decoration, HandleKind::Delete) => {
            GestureIntent::DeleteDecoration(decoration)
        }
        PointerTarget::Surface => match tools.current_tool() {
            ToolKind::Eraser => GestureIntent::Erase,
            ToolKind::Doodle => GestureIntent::Draw,
            ToolKind::Select => GestureIntent::Deselect,
        },
    }
}

/// Snapshot for dragging a photo.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoDrag {
    pub id: EntityId,
    /// Pointer minus the photo's top-left at pointer-down.
    pub offset: Vec2,
    /// Pointer position at pointer-down.
    pub origin: Point,
    /// Last sample applied to the photo; shake travel is measured from here.
    pub last_applied: Point,
    /// Latched once any sample strays past the tap threshold.
    moved: bool,
}

impl PhotoDrag {
    pub fn new(id: EntityId, offset: Vec2, origin: Point) -> Self {
        Self {
            id,
            offset,
            origin,
            last_applied: origin,
            moved: false,
        }
    }

    /// Record a raw pointer sample for tap detection.
    pub fn observe(&mut self, point: Point, tap_threshold: f64) {
        if self.origin.distance(point) > tap_threshold {
            self.moved = true;
        }
    }

    /// True while no sample has left the tap radius.
    pub fn is_tap(&self) -> bool {
        !self.moved
    }
}

/// The one gesture in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveGesture {
    PhotoDrag(PhotoDrag),
    DecorationDrag {
        target: DecorationRef,
        /// Pointer minus the decoration's center at pointer-down.
        offset: Vec2,
    },
    DecorationResize {
        target: DecorationRef,
        /// Pointer distance from the center at pointer-down.
        initial_distance: f64,
        /// Scale (sticker) or font size (text) at pointer-down.
        initial_value: f64,
    },
    /// The line is owned here until pointer-up commits it.
    FreehandDraw { line: DoodleLine },
    Erase,
}

impl ActiveGesture {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PhotoDrag(_) => "photo-drag",
            Self::DecorationDrag { .. } => "decoration-drag",
            Self::DecorationResize { .. } => "decoration-resize",
            Self::FreehandDraw { .. } => "freehand-draw",
            Self::Erase => "erase",
        }
    }
}

/// Pointer-down to pointer-up lifetime of one gesture.
#[derive(Debug, Clone)]
pub struct GestureSession {
    gesture: ActiveGesture,
    pending: FrameMailbox<Point>,
    tap_threshold: f64,
}

impl GestureSession {
    pub fn new(gesture: ActiveGesture, tap_threshold: f64) -> Self {
        log::debug!("gesture begin: {}", gesture.name());
        Self {
            gesture,
            pending: FrameMailbox::new(),
            tap_threshold,
        }
    }

    pub fn gesture(&self) -> &ActiveGesture {
        &self.gesture
    }

    pub fn gesture_mut(&mut self) -> &mut ActiveGesture {
        &mut self.gesture
    }

    /// Queue a move sample for the next frame, replacing any unapplied one.
    ///
    /// Returns true when the host should schedule a frame.
    pub fn post(&mut self, point: Point) -> bool {
        if let ActiveGesture::PhotoDrag(drag) = &mut self.gesture {
            drag.observe(point, self.tap_threshold);
        }
        self.pending.post(point)
    }

    /// Take the sample for this frame.
    pub fn take_sample(&mut self) -> Option<Point> {
        self.pending.take()
    }

    pub fn needs_frame(&self) -> bool {
        self.pending.is_pending()
    }

    /// Note the release position for tap detection.
    pub fn observe_release(&mut self, point: Point) {
        if let ActiveGesture::PhotoDrag(drag) = &mut self.gesture {
            drag.observe(point, self.tap_threshold);
        }
    }

    /// End the session, discarding any unapplied sample.
    pub fn finish(mut self) -> ActiveGesture {
        if self.pending.cancel() {
            log::trace!("discarding pending sample for {}", self.gesture.name());
        }
        log::debug!(
            "gesture end: {} ({} samples coalesced)",
            self.gesture.name(),
            self.pending.dropped()
        );
        self.gesture
    }
}
