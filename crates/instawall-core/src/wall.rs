//! The wall: live collections plus the pointer interaction engine.

use crate::config::WallConfig;
use crate::develop::{ShakeModel, ShakeOutcome};
use crate::entities::{
    CameraFilter, DecorationKind, DecorationRef, DoodleLine, EntityId, NoteEdit, Photo,
    SerializableColor, WallEntity, WallSticker, WallText,
};
use crate::error::WallResult;
use crate::eraser::EraseBrush;
use crate::gesture::{ActiveGesture, GestureIntent, GestureSession, PhotoDrag, PointerTarget, classify};
use crate::input::{InputState, KeyEvent, MouseButton, PointerEvent};
use crate::manipulation::{self, VerticalBand};
use crate::tools::ToolManager;
use crate::viewport::Viewport;
use crate::widget::{WidgetManager, hit_test_handles};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Offset between stacked photos printed in one batch.
const BATCH_STAGGER: f64 = 20.0;
/// Distance from the viewport center to a new print's top-left corner.
const PRINT_DROP_OFFSET: Vec2 = Vec2::new(100.0, 130.0);

/// The wall's content. Later entries draw on top of earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WallDocument {
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub stickers: Vec<WallSticker>,
    #[serde(default)]
    pub texts: Vec<WallText>,
    #[serde(default)]
    pub lines: Vec<DoodleLine>,
}

impl WallDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photo(&self, id: EntityId) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn photo_mut(&mut self, id: EntityId) -> Option<&mut Photo> {
        self.photos.iter_mut().find(|p| p.id == id)
    }

    pub fn sticker(&self, id: EntityId) -> Option<&WallSticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    pub fn sticker_mut(&mut self, id: EntityId) -> Option<&mut WallSticker> {
        self.stickers.iter_mut().find(|s| s.id == id)
    }

    pub fn text(&self, id: EntityId) -> Option<&WallText> {
        self.texts.iter().find(|t| t.id == id)
    }

    pub fn text_mut(&mut self, id: EntityId) -> Option<&mut WallText> {
        self.texts.iter_mut().find(|t| t.id == id)
    }

    pub fn line(&self, id: EntityId) -> Option<&DoodleLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Center of a sticker or text.
    pub fn decoration_position(&self, target: DecorationRef) -> Option<Point> {
        match target.kind {
            DecorationKind::Sticker => self.sticker(target.id).map(|s| s.position),
            DecorationKind::Text => self.text(target.id).map(|t| t.position),
        }
    }

    pub fn decoration_bounds(&self, target: DecorationRef) -> Option<Rect> {
        match target.kind {
            DecorationKind::Sticker => self.sticker(target.id).map(WallEntity::bounds),
            DecorationKind::Text => self.text(target.id).map(WallEntity::bounds),
        }
    }

    pub fn contains_decoration(&self, target: DecorationRef) -> bool {
        self.decoration_position(target).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
            && self.stickers.is_empty()
            && self.texts.is_empty()
            && self.lines.is_empty()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> WallResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> WallResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Notifications for the host, drained with [`Wall::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "target", rename_all = "snake_case")]
pub enum WallEvent {
    /// A developed photo was tapped; the host may open the note editor.
    PhotoSelected(EntityId),
    /// Shake progress reached the maximum.
    PhotoShaken(EntityId),
    LineCommitted(EntityId),
    LineErased(EntityId),
    DecorationSelected(DecorationRef),
    DecorationDeleted(DecorationRef),
    TextEditStarted(EntityId),
    TextEditCommitted(EntityId),
}

/// A photo wall with its interaction state.
#[derive(Debug, Clone)]
pub struct Wall {
    document: WallDocument,
    config: WallConfig,
    viewport: Viewport,
    tools: ToolManager,
    widgets: WidgetManager,
    input: InputState,
    session: Option<GestureSession>,
    shake: ShakeModel,
    band: VerticalBand,
    eraser: EraseBrush,
    events: Vec<WallEvent>,
}

impl Default for Wall {
    fn default() -> Self {
        Self::new(WallConfig::default())
    }
}

impl Wall {
    pub fn new(config: WallConfig) -> Self {
        Self::with_document(WallDocument::new(), config)
    }

    /// Create a wall around existing content.
    pub fn with_document(document: WallDocument, config: WallConfig) -> Self {
        Self {
            document,
            viewport: Viewport::default(),
            tools: ToolManager::new(config.default_stroke_width),
            widgets: WidgetManager::new(),
            input: InputState::new(),
            session: None,
            shake: ShakeModel::from_config(&config),
            band: VerticalBand::from_config(&config),
            eraser: EraseBrush::from_config(&config),
            events: Vec::new(),
            config,
        }
    }

    pub fn document(&self) -> &WallDocument {
        &self.document
    }

    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn widgets(&self) -> &WidgetManager {
        &self.widgets
    }

    /// Read-only copy of all four collections.
    pub fn snapshot(&self) -> WallDocument {
        self.document.clone()
    }

    /// Drain the events raised since the last call.
    pub fn take_events(&mut self) -> Vec<WallEvent> {
        std::mem::take(&mut self.events)
    }

    /// The gesture in progress, if any.
    pub fn active_gesture(&self) -> Option<&ActiveGesture> {
        self.session.as_ref().map(GestureSession::gesture)
    }

    // --- Hit testing ---

    /// Resolve what lies under a surface point.
    ///
    /// Order: the selected decoration's body, then its handles, then photos
    /// top-most first, then stickers, then texts. A point inside the selected
    /// decoration's bounds is always its body, however small it has been scaled.
    pub fn target_at(&self, point: Point) -> PointerTarget {
        let selected = self
            .widgets
            .selected()
            .and_then(|target| self.document.decoration_bounds(target).map(|b| (target, b)));
        if let Some((selected, bounds)) = selected {
            if bounds.contains(point) {
                return PointerTarget::Decoration(selected);
            }
            if let Some(kind) = hit_test_handles(bounds, point, self.config.handle_hit_tolerance) {
                return PointerTarget::Handle(selected, kind);
            }
        }

        if let Some(photo) = self.document.photos.iter().rev().find(|p| p.hit_test(point, 0.0)) {
            return PointerTarget::Photo(photo.id);
        }
        if let Some(sticker) = self.document.stickers.iter().rev().find(|s| s.hit_test(point, 0.0)) {
            return PointerTarget::Decoration(DecorationRef::sticker(sticker.id));
        }
        if let Some(text) = self.document.texts.iter().rev().find(|t| t.hit_test(point, 0.0)) {
            return PointerTarget::Decoration(DecorationRef::text(text.id));
        }
        PointerTarget::Surface
    }

    /// Degrade targets whose entity no longer exists to the bare surface.
    fn resolve_target(&self, target: PointerTarget) -> PointerTarget {
        let exists = match target {
            PointerTarget::Surface => true,
            PointerTarget::Photo(id) => self.document.photo(id).is_some(),
            PointerTarget::Decoration(decoration) | PointerTarget::Handle(decoration, _) => {
                self.document.contains_decoration(decoration)
            }
        };
        if exists {
            target
        } else {
            log::debug!("pointer target {target:?} no longer exists; treating as surface");
            PointerTarget::Surface
        }
    }

    // --- Pointer input (screen coordinates) ---

    /// Feed a raw pointer event. Double-clicking a text enters inline edit.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.input.handle_pointer_event(event);
        match *event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                self.pointer_down(position);
                if self.input.is_double_click() {
                    let point = self.viewport.screen_to_surface(position);
                    if let PointerTarget::Decoration(target) = self.target_at(point) {
                        if target.kind == DecorationKind::Text {
                            self.begin_text_edit(target.id);
                        }
                    }
                }
            }
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => self.pointer_up(position),
            PointerEvent::Move { position } => {
                self.pointer_move(position);
            }
            PointerEvent::Scroll { delta, .. } => {
                self.viewport.scroll_by(delta, self.config.surface_width);
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => {}
        }
    }

    /// Feed a key event. While a text is being edited, printable keys edit
    /// it and Enter or Escape commit it.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        let KeyEvent::Pressed(key) = event else {
            return;
        };
        let Some(id) = self.widgets.editing_text() else {
            return;
        };
        match key.as_str() {
            "Enter" | "Escape" => self.commit_text_edit(),
            "Backspace" => {
                if let Some(text) = self.document.text_mut(id) {
                    text.content.pop();
                }
            }
            other if other.chars().count() == 1 => {
                if let Some(text) = self.document.text_mut(id) {
                    text.content.push_str(other);
                }
            }
            _ => {}
        }
    }

    /// Press at a screen position, resolving the target by hit test.
    pub fn pointer_down(&mut self, position: Point) {
        let point = self.viewport.screen_to_surface(position);
        let target = self.target_at(point);
        self.begin_gesture(point, target);
    }

    /// Press at a screen position on a target the host already resolved.
    pub fn pointer_down_on(&mut self, position: Point, target: PointerTarget) {
        let point = self.viewport.screen_to_surface(position);
        self.begin_gesture(point, target);
    }

    /// Queue a move sample. Returns true when the host should schedule a
    /// frame. Moves with no gesture are ignored.
    pub fn pointer_move(&mut self, position: Point) -> bool {
        let point = self.viewport.screen_to_surface(position);
        match self.session.as_mut() {
            Some(session) => session.post(point),
            None => false,
        }
    }

    /// Whether a move sample is waiting for [`Wall::on_frame`].
    pub fn needs_frame(&self) -> bool {
        self.session.as_ref().is_some_and(GestureSession::needs_frame)
    }

    /// Apply the newest pending sample. Call once per display refresh.
    /// Returns true if a sample was applied.
    pub fn on_frame(&mut self) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        let applied = match session.take_sample() {
            Some(point) => {
                log::trace!("frame: {} at {point:?}", session.gesture().name());
                self.apply_sample(session.gesture_mut(), point);
                true
            }
            None => false,
        };
        self.session = Some(session);
        applied
    }

    /// Release at a screen position, finishing the gesture.
    pub fn pointer_up(&mut self, position: Point) {
        let Some(mut session) = self.session.take() else {
            log::debug!("pointer-up with no active gesture");
            return;
        };
        session.observe_release(self.viewport.screen_to_surface(position));
        self.end_gesture(session.finish(), true);
    }

    /// Drop any gesture in progress without committing it.
    pub fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("teardown during {}", session.gesture().name());
            drop(session.finish());
        }
    }

    fn begin_gesture(&mut self, point: Point, target: PointerTarget) {
        if let Some(stale) = self.session.take() {
            log::warn!(
                "pointer-down while {} is still active; ending it",
                stale.gesture().name()
            );
            self.end_gesture(stale.finish(), false);
        }

        let target = self.resolve_target(target);
        let tap_threshold = self.config.tap_threshold;
        let gesture = match classify(target, &self.tools) {
            GestureIntent::DragPhoto(id) => {
                self.deselect();
                self.document
                    .photo(id)
                    .map(|photo| ActiveGesture::PhotoDrag(PhotoDrag::new(id, point - photo.position, point)))
            }
            GestureIntent::DragDecoration(target) => {
                self.select_decoration(target);
                self.document
                    .decoration_position(target)
                    .map(|position| ActiveGesture::DecorationDrag {
                        target,
                        offset: point - position,
                    })
            }
            GestureIntent::ResizeDecoration(target) => self.resize_snapshot(target, point),
            GestureIntent::DeleteDecoration(target) => {
                self.delete_decoration(target);
                None
            }
            GestureIntent::Erase => {
                self.erase_at(point);
                Some(ActiveGesture::Erase)
            }
            GestureIntent::Draw => {
                self.deselect();
                Some(ActiveGesture::FreehandDraw {
                    line: DoodleLine::new(point, self.tools.stroke_color, self.tools.stroke_width),
                })
            }
            GestureIntent::Deselect => {
                self.deselect();
                None
            }
        };
        self.session = gesture.map(|gesture| GestureSession::new(gesture, tap_threshold));
    }

    fn resize_snapshot(&self, target: DecorationRef, point: Point) -> Option<ActiveGesture> {
        let (center, initial_value) = match target.kind {
            DecorationKind::Sticker => self.document.sticker(target.id).map(|s| (s.position, s.scale))?,
            DecorationKind::Text => self.document.text(target.id).map(|t| (t.position, t.font_size))?,
        };
        Some(ActiveGesture::DecorationResize {
            target,
            initial_distance: center.distance(point),
            initial_value,
        })
    }

    fn apply_sample(&mut self, gesture: &mut ActiveGesture, point: Point) {
        match gesture {
            ActiveGesture::PhotoDrag(drag) => {
                let viewport_height = self.viewport.height();
                let Some(photo) = self.document.photo_mut(drag.id) else {
                    log::debug!("dragged photo {} vanished", drag.id);
                    return;
                };
                let travel = drag.last_applied.distance(point);
                manipulation::drag_photo(photo, point, drag.offset, &self.band, viewport_height);
                drag.last_applied = point;
                match self.shake.agitate(&mut photo.develop, travel) {
                    ShakeOutcome::Shaken => {
                        log::debug!("photo {} shaken", drag.id);
                        self.events.push(WallEvent::PhotoShaken(drag.id));
                    }
                    ShakeOutcome::Progressed(progress) => {
                        log::trace!("photo {} shake progress {progress:.2}", drag.id);
                    }
                    ShakeOutcome::Ignored => {}
                }
            }
            ActiveGesture::DecorationDrag { target, offset } => {
                let position = manipulation::drag_decoration(point, *offset);
                match target.kind {
                    DecorationKind::Sticker => {
                        if let Some(sticker) = self.document.sticker_mut(target.id) {
                            sticker.position = position;
                        }
                    }
                    DecorationKind::Text => {
                        if let Some(text) = self.document.text_mut(target.id) {
                            text.position = position;
                        }
                    }
                }
            }
            ActiveGesture::DecorationResize {
                target,
                initial_distance,
                initial_value,
            } => match target.kind {
                DecorationKind::Sticker => {
                    if let Some(sticker) = self.document.sticker_mut(target.id) {
                        manipulation::resize_sticker(
                            sticker,
                            point,
                            *initial_distance,
                            *initial_value,
                            self.config.min_sticker_scale,
                        );
                    }
                }
                DecorationKind::Text => {
                    if let Some(text) = self.document.text_mut(target.id) {
                        manipulation::resize_text(
                            text,
                            point,
                            *initial_distance,
                            *initial_value,
                            self.config.min_font_size,
                        );
                    }
                }
            },
            ActiveGesture::FreehandDraw { line } => line.add_point(point),
            ActiveGesture::Erase => {
                if self.tools.is_erasing() {
                    self.erase_at(point);
                }
            }
        }
    }

    fn end_gesture(&mut self, gesture: ActiveGesture, allow_tap: bool) {
        match gesture {
            ActiveGesture::PhotoDrag(drag) => {
                if allow_tap
                    && drag.is_tap()
                    && self.document.photo(drag.id).is_some_and(Photo::can_open)
                {
                    self.events.push(WallEvent::PhotoSelected(drag.id));
                }
            }
            ActiveGesture::FreehandDraw { line } => {
                let id = line.id;
                log::debug!("committing line {id} with {} points", line.len());
                self.document.lines.push(line);
                self.events.push(WallEvent::LineCommitted(id));
            }
            ActiveGesture::DecorationDrag { .. }
            | ActiveGesture::DecorationResize { .. }
            | ActiveGesture::Erase => {}
        }
    }

    fn erase_at(&mut self, point: Point) {
        for id in self.eraser.erase(&mut self.document.lines, point) {
            log::debug!("erased line {id}");
            self.events.push(WallEvent::LineErased(id));
        }
    }

    // --- Selection and inline text edit ---

    fn select_decoration(&mut self, target: DecorationRef) {
        if self.widgets.is_selected(target) {
            return;
        }
        if self.widgets.editing_text().is_some_and(|id| DecorationRef::text(id) != target) {
            self.commit_text_edit();
        }
        self.widgets.select(target);
        self.events.push(WallEvent::DecorationSelected(target));
    }

    /// Commit any edit and clear the decoration selection.
    pub fn deselect(&mut self) {
        self.commit_text_edit();
        self.widgets.clear_selection();
    }

    /// Enter inline edit for a text. Returns false if the text is gone.
    pub fn begin_text_edit(&mut self, id: EntityId) -> bool {
        if self.document.text(id).is_none() {
            return false;
        }
        if self.widgets.editing_text() == Some(id) {
            return true;
        }
        self.commit_text_edit();
        self.widgets.enter_editing(id);
        self.events.push(WallEvent::TextEditStarted(id));
        true
    }

    /// Replace a text's content.
    pub fn edit_text(&mut self, id: EntityId, content: impl Into<String>) -> bool {
        match self.document.text_mut(id) {
            Some(text) => {
                text.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Leave inline edit (blur or confirm key). The text stays selected.
    pub fn commit_text_edit(&mut self) {
        if let Some(id) = self.widgets.exit_editing() {
            self.events.push(WallEvent::TextEditCommitted(id));
        }
    }

    pub fn set_text_color(&mut self, id: EntityId, color: SerializableColor) -> bool {
        match self.document.text_mut(id) {
            Some(text) => {
                text.color = color;
                true
            }
            None => false,
        }
    }

    // --- Content ---

    /// Place a photo built by the host.
    pub fn add_photo(&mut self, photo: Photo) -> EntityId {
        let id = photo.id;
        self.document.photos.push(photo);
        id
    }

    /// Print a new, still-developing photo centered in the viewport.
    /// `batch_index` staggers photos added together.
    pub fn print_photo(
        &mut self,
        image_url: impl Into<String>,
        filter: CameraFilter,
        batch_index: usize,
    ) -> EntityId {
        let stagger = BATCH_STAGGER * batch_index as f64;
        let center = self.viewport.center();
        let position = center - PRINT_DROP_OFFSET + Vec2::new(stagger, stagger);
        self.add_photo(Photo::new(image_url, position, filter))
    }

    /// Drop a sticker at the viewport center.
    pub fn add_sticker(&mut self, glyph: impl Into<String>) -> EntityId {
        let sticker = WallSticker::new(glyph, self.viewport.center());
        let id = sticker.id;
        self.document.stickers.push(sticker);
        id
    }

    /// Drop an empty text at the viewport center in the stroke color.
    pub fn add_text(&mut self) -> EntityId {
        let text = WallText::new(
            self.viewport.center(),
            self.tools.stroke_color,
            self.config.default_font_size,
        );
        let id = text.id;
        self.document.texts.push(text);
        id
    }

    pub fn finish_developing(&mut self, id: EntityId) -> bool {
        match self.document.photo_mut(id) {
            Some(photo) => {
                photo.develop.finish_developing();
                true
            }
            None => false,
        }
    }

    /// Write back the note editor's result.
    pub fn apply_note_edit(&mut self, id: EntityId, edit: NoteEdit) -> bool {
        match self.document.photo_mut(id) {
            Some(photo) => {
                photo.apply_note_edit(edit);
                true
            }
            None => false,
        }
    }

    pub fn delete_photo(&mut self, id: EntityId) -> Option<Photo> {
        let index = self.document.photos.iter().position(|p| p.id == id)?;
        Some(self.document.photos.remove(index))
    }

    pub fn delete_decoration(&mut self, target: DecorationRef) -> bool {
        let removed = match target.kind {
            DecorationKind::Sticker => {
                let before = self.document.stickers.len();
                self.document.stickers.retain(|s| s.id != target.id);
                before != self.document.stickers.len()
            }
            DecorationKind::Text => {
                let before = self.document.texts.len();
                self.document.texts.retain(|t| t.id != target.id);
                before != self.document.texts.len()
            }
        };
        if removed {
            self.widgets.remove(target);
            self.events.push(WallEvent::DecorationDeleted(target));
        }
        removed
    }

    /// Remove the most recent doodle.
    pub fn undo_last_line(&mut self) -> Option<DoodleLine> {
        self.document.lines.pop()
    }

    /// Remove every doodle, sticker and text. Photos stay.
    pub fn clear_decorations(&mut self) {
        self.deselect();
        self.document.lines.clear();
        self.document.stickers.clear();
        self.document.texts.clear();
    }

    // --- Modes and viewport ---

    pub fn set_doodling(&mut self, on: bool) {
        self.tools.set_doodling(on);
    }

    pub fn set_erasing(&mut self, on: bool) {
        self.tools.set_erasing(on);
    }

    /// Pick the brush color, switching to drawing.
    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.tools.choose_color(color);
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.tools.stroke_width = width;
    }

    /// Resize the visible window, keeping the scroll inside the wall.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport.size = size;
        self.viewport.scroll_by(Vec2::ZERO, self.config.surface_width);
    }

    pub fn scroll_by(&mut self, delta: Vec2) {
        self.viewport.scroll_by(delta, self.config.surface_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::develop::DevelopState;
    use crate::entities::{STICKER_PALETTE, TEXT_PALETTE};
    use crate::widget::{HandleKind, WidgetState};

    fn wall_with_photo(develop: DevelopState) -> (Wall, EntityId) {
        let mut wall = Wall::default();
        let photo = Photo::new("a.png", Point::new(100.0, 100.0), CameraFilter::Normal)
            .with_develop_state(develop);
        let id = wall.add_photo(photo);
        (wall, id)
    }

    /// Alternating horizontal moves of 20 units, one frame each.
    fn shake(wall: &mut Wall, start: Point, moves: usize) {
        for i in 0..moves {
            let x = if i % 2 == 0 { start.x + 20.0 } else { start.x };
            wall.pointer_move(Point::new(x, start.y));
            assert!(wall.on_frame());
        }
    }

    #[test]
    fn test_shake_scenario_partial() {
        let (mut wall, id) = wall_with_photo(DevelopState::developing());
        let start = Point::new(150.0, 150.0);
        wall.pointer_down(start);
        shake(&mut wall, start, 5);
        wall.pointer_up(start);

        let photo = wall.document().photo(id).unwrap();
        assert!((photo.shake_progress() - 100.0 / 6.0).abs() < 1e-9);
        assert!(!photo.is_shaken());
        assert!(wall.take_events().is_empty());
    }

    #[test]
    fn test_shake_scenario_complete() {
        let (mut wall, id) = wall_with_photo(DevelopState::developing());
        let start = Point::new(150.0, 150.0);
        wall.pointer_down(start);
        shake(&mut wall, start, 31);
        wall.pointer_up(start);

        let photo = wall.document().photo(id).unwrap();
        assert!((photo.shake_progress() - 100.0).abs() < f64::EPSILON);
        assert!(photo.is_shaken());
        assert!(photo.is_developing());
        let shaken = wall
            .take_events()
            .into_iter()
            .filter(|e| *e == WallEvent::PhotoShaken(id))
            .count();
        assert_eq!(shaken, 1);
    }

    #[test]
    fn test_small_moves_do_not_shake() {
        let (mut wall, id) = wall_with_photo(DevelopState::developing());
        wall.pointer_down(Point::new(150.0, 150.0));
        for i in 1..=20 {
            wall.pointer_move(Point::new(150.0 + 10.0 * f64::from(i), 150.0));
            wall.on_frame();
        }
        wall.pointer_up(Point::new(350.0, 150.0));

        let photo = wall.document().photo(id).unwrap();
        assert!(photo.shake_progress().abs() < f64::EPSILON);
        assert!((photo.position.x - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tap_selects_developed_photo() {
        let (mut wall, id) = wall_with_photo(DevelopState::developed());
        wall.pointer_down(Point::new(150.0, 150.0));
        wall.pointer_move(Point::new(153.0, 154.0));
        wall.pointer_up(Point::new(153.0, 154.0));

        assert_eq!(wall.take_events(), vec![WallEvent::PhotoSelected(id)]);
        assert_eq!(wall.document().photo(id).unwrap().position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_tap_on_developing_photo_does_not_select() {
        let (mut wall, _) = wall_with_photo(DevelopState::developing());
        wall.pointer_down(Point::new(150.0, 150.0));
        wall.pointer_up(Point::new(150.0, 150.0));
        assert!(wall.take_events().is_empty());
    }

    #[test]
    fn test_drag_does_not_select() {
        let (mut wall, id) = wall_with_photo(DevelopState::developed());
        wall.pointer_down(Point::new(150.0, 150.0));
        wall.pointer_move(Point::new(156.0, 150.0));
        wall.on_frame();
        wall.pointer_up(Point::new(156.0, 150.0));

        assert!(wall.take_events().is_empty());
        assert_eq!(wall.document().photo(id).unwrap().position, Point::new(106.0, 100.0));
    }

    #[test]
    fn test_drag_back_to_origin_is_not_a_tap() {
        let (mut wall, _) = wall_with_photo(DevelopState::developed());
        wall.pointer_down(Point::new(150.0, 150.0));
        wall.pointer_move(Point::new(200.0, 150.0));
        wall.pointer_move(Point::new(150.0, 150.0));
        wall.pointer_up(Point::new(150.0, 150.0));
        assert!(wall.take_events().is_empty());
    }

    #[test]
    fn test_coalescing_applies_last_sample() {
        let (mut wall, id) = wall_with_photo(DevelopState::developed());
        wall.pointer_down(Point::new(150.0, 150.0));
        assert!(wall.pointer_move(Point::new(160.0, 150.0)));
        assert!(!wall.pointer_move(Point::new(170.0, 150.0)));
        assert!(!wall.pointer_move(Point::new(250.0, 200.0)));
        assert!(wall.needs_frame());

        assert!(wall.on_frame());
        assert!(!wall.on_frame());
        assert_eq!(wall.document().photo(id).unwrap().position, Point::new(200.0, 150.0));
    }

    #[test]
    fn test_pending_sample_discarded_on_up() {
        let (mut wall, id) = wall_with_photo(DevelopState::developed());
        wall.pointer_down(Point::new(150.0, 150.0));
        wall.pointer_move(Point::new(300.0, 300.0));
        wall.pointer_up(Point::new(300.0, 300.0));

        assert!(!wall.needs_frame());
        assert!(!wall.on_frame());
        assert_eq!(wall.document().photo(id).unwrap().position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_vertical_band() {
        let (mut wall, id) = wall_with_photo(DevelopState::developed());
        wall.pointer_down(Point::new(150.0, 150.0));
        wall.pointer_move(Point::new(150.0, -500.0));
        wall.on_frame();
        assert!((wall.document().photo(id).unwrap().position.y - 20.0).abs() < f64::EPSILON);

        wall.pointer_move(Point::new(150.0, 2000.0));
        wall.on_frame();
        // default viewport is 800 tall
        assert!((wall.document().photo(id).unwrap().position.y - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_moves_without_gesture_are_ignored() {
        let mut wall = Wall::default();
        assert!(!wall.pointer_move(Point::new(10.0, 10.0)));
        assert!(!wall.needs_frame());
        assert!(!wall.on_frame());
        wall.pointer_up(Point::new(10.0, 10.0));
        assert!(wall.take_events().is_empty());
    }

    #[test]
    fn test_freehand_draw_commits_line() {
        let mut wall = Wall::default();
        wall.set_stroke_color(SerializableColor::black());
        wall.pointer_down(Point::new(10.0, 10.0));
        for i in 1..=3 {
            wall.pointer_move(Point::new(10.0 + f64::from(i) * 10.0, 10.0));
            wall.on_frame();
        }
        assert!(wall.document().lines.is_empty());
        wall.pointer_up(Point::new(40.0, 10.0));

        let lines = &wall.document().lines;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 4);
        assert_eq!(lines[0].color, SerializableColor::black());
        assert!((lines[0].width - 4.0).abs() < f64::EPSILON);
        let committed = lines[0].id;
        assert_eq!(wall.take_events(), vec![WallEvent::LineCommitted(committed)]);
    }

    #[test]
    fn test_erase_on_down_and_move() {
        let mut wall = Wall::default();
        let near = DoodleLine::from_points(vec![Point::new(0.0, 0.0)], SerializableColor::black(), 4.0);
        let later = DoodleLine::from_points(vec![Point::new(400.0, 0.0)], SerializableColor::black(), 4.0);
        let far = DoodleLine::from_points(vec![Point::new(900.0, 900.0)], SerializableColor::black(), 4.0);
        let (near_id, later_id, far_id) = (near.id, later.id, far.id);
        wall.document.lines = vec![near, later, far];

        wall.set_erasing(true);
        wall.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(wall.take_events(), vec![WallEvent::LineErased(near_id)]);

        wall.pointer_move(Point::new(390.0, 0.0));
        wall.on_frame();
        wall.pointer_up(Point::new(390.0, 0.0));
        assert_eq!(wall.take_events(), vec![WallEvent::LineErased(later_id)]);
        assert_eq!(wall.document().lines.len(), 1);
        assert!(wall.document().line(far_id).is_some());
    }

    #[test]
    fn test_photos_drag_while_doodling() {
        let (mut wall, id) = wall_with_photo(DevelopState::developed());
        wall.set_doodling(true);
        wall.pointer_down(Point::new(150.0, 150.0));
        assert!(matches!(wall.active_gesture(), Some(ActiveGesture::PhotoDrag(_))));
        wall.pointer_up(Point::new(150.0, 150.0));
        assert_eq!(wall.take_events(), vec![WallEvent::PhotoSelected(id)]);
        assert!(wall.document().lines.is_empty());
    }

    #[test]
    fn test_decoration_drag_selects() {
        let mut wall = Wall::default();
        let id = wall.add_sticker(STICKER_PALETTE[0]);
        let center = wall.document().sticker(id).unwrap().position;

        wall.pointer_down(center + Vec2::new(10.0, 5.0));
        let target = DecorationRef::sticker(id);
        assert_eq!(wall.widgets().state(target), WidgetState::Selected);
        wall.pointer_move(center + Vec2::new(110.0, 55.0));
        wall.on_frame();
        wall.pointer_up(center + Vec2::new(110.0, 55.0));

        assert_eq!(wall.document().sticker(id).unwrap().position, center + Vec2::new(100.0, 50.0));
        assert_eq!(wall.take_events(), vec![WallEvent::DecorationSelected(target)]);
    }

    #[test]
    fn test_resize_handle_floors() {
        let mut wall = Wall::default();
        let id = wall.add_sticker(STICKER_PALETTE[0]);
        let target = DecorationRef::sticker(id);
        let center = wall.document().sticker(id).unwrap().position;

        wall.pointer_down_on(center + Vec2::new(50.0, 0.0), PointerTarget::Handle(target, HandleKind::Resize));
        wall.pointer_move(center + Vec2::new(100.0, 0.0));
        wall.on_frame();
        assert!((wall.document().sticker(id).unwrap().scale - 2.0).abs() < 1e-9);

        wall.pointer_move(center);
        wall.on_frame();
        assert!((wall.document().sticker(id).unwrap().scale - 0.2).abs() < f64::EPSILON);
        wall.pointer_up(center);
    }

    #[test]
    fn test_text_resize_floor() {
        let mut wall = Wall::default();
        let id = wall.add_text();
        let target = DecorationRef::text(id);
        let center = wall.document().text(id).unwrap().position;

        wall.pointer_down_on(center + Vec2::new(0.0, 40.0), PointerTarget::Handle(target, HandleKind::Resize));
        wall.pointer_move(center + Vec2::new(0.0, 1.0));
        wall.on_frame();
        wall.pointer_up(center + Vec2::new(0.0, 1.0));
        assert!((wall.document().text(id).unwrap().font_size - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_resize_is_noop() {
        let mut wall = Wall::default();
        let id = wall.add_sticker(STICKER_PALETTE[0]);
        let target = DecorationRef::sticker(id);
        let center = wall.document().sticker(id).unwrap().position;

        wall.pointer_down_on(center, PointerTarget::Handle(target, HandleKind::Resize));
        wall.pointer_move(center + Vec2::new(300.0, 0.0));
        wall.on_frame();
        assert!((wall.document().sticker(id).unwrap().scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_handle_hit_test_on_selected() {
        let mut wall = Wall::default();
        let id = wall.add_sticker(STICKER_PALETTE[0]);
        let target = DecorationRef::sticker(id);
        let bounds = wall.document().decoration_bounds(target).unwrap();
        let resize_point = Point::new(bounds.x1, bounds.y1);

        // Unselected: handles are not live.
        assert_ne!(wall.target_at(resize_point), PointerTarget::Handle(target, HandleKind::Resize));

        wall.pointer_down(bounds.center());
        wall.pointer_up(bounds.center());
        assert_eq!(wall.target_at(resize_point), PointerTarget::Handle(target, HandleKind::Resize));
    }

    #[test]
    fn test_delete_handle() {
        let mut wall = Wall::default();
        let id = wall.add_sticker(STICKER_PALETTE[0]);
        let target = DecorationRef::sticker(id);
        wall.pointer_down_on(Point::ZERO, PointerTarget::Handle(target, HandleKind::Delete));

        assert!(wall.active_gesture().is_none());
        assert!(wall.document().stickers.is_empty());
        assert_eq!(wall.take_events(), vec![WallEvent::DecorationDeleted(target)]);
    }

    #[test]
    fn test_vanished_target_degrades_to_surface() {
        let mut wall = Wall::default();
        wall.set_doodling(true);
        wall.pointer_down_on(Point::new(5.0, 5.0), PointerTarget::Photo(uuid::Uuid::new_v4()));
        assert!(matches!(wall.active_gesture(), Some(ActiveGesture::FreehandDraw { .. })));
    }

    #[test]
    fn test_surface_press_clears_selection() {
        let mut wall = Wall::default();
        let id = wall.add_text();
        assert!(wall.begin_text_edit(id));
        wall.take_events();

        wall.pointer_down(Point::new(5.0, 5.0));
        assert!(wall.active_gesture().is_none());
        assert!(wall.widgets().selected().is_none());
        assert_eq!(wall.take_events(), vec![WallEvent::TextEditCommitted(id)]);
    }

    #[test]
    fn test_stale_session_is_replaced() {
        let mut wall = Wall::default();
        wall.set_doodling(true);
        wall.pointer_down(Point::new(10.0, 10.0));
        wall.pointer_move(Point::new(20.0, 10.0));
        wall.on_frame();
        wall.pointer_move(Point::new(30.0, 10.0));

        // Missed pointer-up.
        wall.pointer_down(Point::new(500.0, 500.0));
        assert_eq!(wall.document().lines.len(), 1);
        assert_eq!(wall.document().lines[0].len(), 2);
        assert!(matches!(wall.active_gesture(), Some(ActiveGesture::FreehandDraw { .. })));
        assert!(!wall.needs_frame());
    }

    #[test]
    fn test_stale_photo_session_does_not_tap() {
        let (mut wall, _) = wall_with_photo(DevelopState::developed());
        wall.pointer_down(Point::new(150.0, 150.0));
        wall.pointer_down(Point::new(900.0, 700.0));
        assert!(wall.take_events().is_empty());
    }

    #[test]
    fn test_teardown_releases_session() {
        let mut wall = Wall::default();
        wall.set_doodling(true);
        wall.pointer_down(Point::new(10.0, 10.0));
        wall.pointer_move(Point::new(20.0, 20.0));
        wall.teardown();

        assert!(wall.active_gesture().is_none());
        assert!(!wall.needs_frame());
        assert!(wall.document().lines.is_empty());
    }

    #[test]
    fn test_double_click_edits_text() {
        let mut wall = Wall::default();
        let id = wall.add_text();
        let center = wall.document().text(id).unwrap().position;
        let down = PointerEvent::Down {
            position: center,
            button: MouseButton::Left,
        };
        let up = PointerEvent::Up {
            position: center,
            button: MouseButton::Left,
        };
        wall.handle_pointer_event(&down);
        wall.handle_pointer_event(&up);
        wall.handle_pointer_event(&down);
        wall.handle_pointer_event(&up);

        assert_eq!(wall.widgets().state(DecorationRef::text(id)), WidgetState::Editing);
        for key in ["H", "i", "!", "Backspace"] {
            wall.handle_key_event(&KeyEvent::Pressed(key.to_string()));
        }
        wall.handle_key_event(&KeyEvent::Pressed("Enter".to_string()));

        assert_eq!(wall.document().text(id).unwrap().content, "Hi");
        assert_eq!(
            wall.take_events(),
            vec![
                WallEvent::DecorationSelected(DecorationRef::text(id)),
                WallEvent::TextEditStarted(id),
                WallEvent::TextEditCommitted(id),
            ]
        );
    }

    #[test]
    fn test_edit_commit_leaves_others_untouched() {
        let mut wall = Wall::default();
        let sticker = wall.add_sticker("🌸");
        let id = wall.add_text();
        let before = wall.document().sticker(sticker).cloned();

        wall.begin_text_edit(id);
        wall.edit_text(id, "hello");
        wall.commit_text_edit();

        assert_eq!(wall.document().sticker(sticker).cloned(), before);
        assert_eq!(wall.document().text(id).unwrap().content, "hello");
        assert!(!wall.widgets().is_editing());
    }

    #[test]
    fn test_new_text_uses_stroke_color() {
        let mut wall = Wall::default();
        let color = SerializableColor::new(0x3b, 0x82, 0xf6, 0xff);
        wall.set_stroke_color(color);
        let id = wall.add_text();
        let text = wall.document().text(id).unwrap();
        assert_eq!(text.color, color);
        assert!((text.font_size - 48.0).abs() < f64::EPSILON);
        assert_eq!(text.position, wall.viewport().center());
        assert!(wall.set_text_color(id, TEXT_PALETTE[2]));
        assert_eq!(wall.document().text(id).unwrap().color, TEXT_PALETTE[2]);
    }

    #[test]
    fn test_print_photo_centers() {
        let mut wall = Wall::default();
        let id = wall.print_photo("a.png", CameraFilter::Vintage, 1);
        let photo = wall.document().photo(id).unwrap();
        assert_eq!(photo.position, Point::new(540.0 + 20.0, 270.0 + 20.0));
        assert!(photo.is_developing());
        assert!(!photo.can_open());
    }

    #[test]
    fn test_finish_developing_allows_open() {
        let (mut wall, id) = wall_with_photo(DevelopState::developing());
        assert!(wall.finish_developing(id));
        wall.pointer_down(Point::new(150.0, 150.0));
        wall.pointer_up(Point::new(150.0, 150.0));
        assert_eq!(wall.take_events(), vec![WallEvent::PhotoSelected(id)]);
        assert!(!wall.finish_developing(uuid::Uuid::new_v4()));
    }

    #[test]
    fn test_undo_and_clear() {
        let mut wall = Wall::default();
        wall.set_doodling(true);
        for y in [10.0, 100.0] {
            wall.pointer_down(Point::new(10.0, y));
            wall.pointer_up(Point::new(10.0, y));
        }
        let second = wall.document().lines[1].id;
        assert_eq!(wall.undo_last_line().map(|l| l.id), Some(second));
        assert_eq!(wall.document().lines.len(), 1);

        wall.add_sticker(STICKER_PALETTE[0]);
        wall.add_text();
        let (photo_wall, _) = wall_with_photo(DevelopState::developing());
        wall.document.photos = photo_wall.document.photos;
        wall.clear_decorations();
        assert!(wall.document().lines.is_empty());
        assert!(wall.document().stickers.is_empty());
        assert!(wall.document().texts.is_empty());
        assert_eq!(wall.document().photos.len(), 1);
    }

    #[test]
    fn test_clear_decorations_commits_edit() {
        let mut wall = Wall::default();
        let id = wall.add_text();
        wall.begin_text_edit(id);
        wall.take_events();

        wall.clear_decorations();
        assert_eq!(wall.take_events(), vec![WallEvent::TextEditCommitted(id)]);
        assert!(!wall.widgets().is_editing());
        assert!(wall.widgets().selected().is_none());
    }

    #[test]
    fn test_erase_stops_when_mode_turned_off() {
        let mut wall = Wall::default();
        let line = DoodleLine::from_points(vec![Point::new(400.0, 0.0)], SerializableColor::black(), 4.0);
        wall.document.lines = vec![line];

        wall.set_erasing(true);
        wall.pointer_down(Point::new(10.0, 10.0));
        wall.set_erasing(false);
        wall.pointer_move(Point::new(400.0, 5.0));
        wall.on_frame();
        wall.pointer_up(Point::new(400.0, 5.0));

        assert_eq!(wall.document().lines.len(), 1);
        assert!(wall.take_events().is_empty());
    }

    #[test]
    fn test_shrunk_sticker_body_press_drags() {
        let mut wall = Wall::default();
        let id = wall.add_sticker(STICKER_PALETTE[3]);
        let target = DecorationRef::sticker(id);
        let center = wall.document().sticker(id).unwrap().position;
        wall.pointer_down(center);
        wall.pointer_up(center);

        wall.pointer_down_on(center + Vec2::new(50.0, 0.0), PointerTarget::Handle(target, HandleKind::Resize));
        wall.pointer_move(center);
        wall.on_frame();
        wall.pointer_up(center);
        assert!((wall.document().sticker(id).unwrap().scale - 0.2).abs() < f64::EPSILON);

        assert_eq!(wall.target_at(center), PointerTarget::Decoration(target));
        wall.pointer_down(center);
        assert!(matches!(wall.active_gesture(), Some(ActiveGesture::DecorationDrag { .. })));
        wall.pointer_up(center);
        assert_eq!(wall.document().stickers.len(), 1);
        assert_eq!(wall.take_events(), vec![WallEvent::DecorationSelected(target)]);
    }

    #[test]
    fn test_smallest_text_body_press_drags() {
        let mut wall = Wall::default();
        let id = wall.add_text();
        let target = DecorationRef::text(id);
        let center = wall.document().text(id).unwrap().position;
        wall.pointer_down(center);
        wall.pointer_up(center);

        wall.pointer_down_on(center + Vec2::new(0.0, 40.0), PointerTarget::Handle(target, HandleKind::Resize));
        wall.pointer_move(center + Vec2::new(0.0, 1.0));
        wall.on_frame();
        wall.pointer_up(center + Vec2::new(0.0, 1.0));
        assert!((wall.document().text(id).unwrap().font_size - 12.0).abs() < f64::EPSILON);

        wall.pointer_down(center);
        wall.pointer_up(center);
        assert_eq!(wall.document().texts.len(), 1);
        assert!(!wall.take_events().contains(&WallEvent::DecorationDeleted(target)));
    }

    #[test]
    fn test_delete_photo() {
        let (mut wall, id) = wall_with_photo(DevelopState::developing());
        assert!(wall.delete_photo(id).is_some());
        assert!(wall.delete_photo(id).is_none());
        assert_eq!(wall.target_at(Point::new(150.0, 150.0)), PointerTarget::Surface);
    }

    #[test]
    fn test_hit_test_order() {
        let (mut wall, photo) = wall_with_photo(DevelopState::developed());
        let top = wall.add_photo(Photo::new("b.png", Point::new(150.0, 150.0), CameraFilter::Bw));
        assert_eq!(wall.target_at(Point::new(120.0, 120.0)), PointerTarget::Photo(photo));
        assert_eq!(wall.target_at(Point::new(200.0, 200.0)), PointerTarget::Photo(top));
    }

    #[test]
    fn test_scroll_converts_coordinates() {
        let (mut wall, id) = wall_with_photo(DevelopState::developed());
        wall.scroll_by(Vec2::new(50.0, 0.0));
        // Screen (100, 150) is surface (150, 150).
        wall.pointer_down(Point::new(100.0, 150.0));
        assert!(matches!(wall.active_gesture(), Some(ActiveGesture::PhotoDrag(d)) if d.id == id));
        wall.pointer_up(Point::new(100.0, 150.0));
    }

    #[test]
    fn test_document_json_roundtrip() {
        let (mut wall, _) = wall_with_photo(DevelopState::developing());
        wall.add_sticker(STICKER_PALETTE[0]);
        wall.add_text();
        let json = wall.snapshot().to_json().unwrap();
        let restored = WallDocument::from_json(&json).unwrap();
        assert_eq!(restored, wall.snapshot());
    }

    #[test]
    fn test_event_serialization() {
        let id = uuid::Uuid::nil();
        let json = serde_json::to_string(&WallEvent::LineErased(id)).unwrap();
        assert_eq!(
            json,
            r#"{"event":"line_erased","target":"00000000-0000-0000-0000-000000000000"}"#
        );
    }
}
