//! Widget manager for tracking which decoration is selected or edited.

use super::state::WidgetState;
use crate::entities::{DecorationKind, DecorationRef, EntityId};

/// Selection and editing state for wall decorations.
///
/// At most one decoration is selected, and at most one text is in inline
/// edit. An edited text is always the selected decoration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetManager {
    selected: Option<DecorationRef>,
    editing_text: Option<EntityId>,
}

impl WidgetManager {
    /// Create a new widget manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the state of a decoration.
    pub fn state(&self, target: DecorationRef) -> WidgetState {
        if target.kind == DecorationKind::Text && self.editing_text == Some(target.id) {
            WidgetState::Editing
        } else if self.selected == Some(target) {
            WidgetState::Selected
        } else {
            WidgetState::Normal
        }
    }

    /// The selected decoration, if any.
    pub fn selected(&self) -> Option<DecorationRef> {
        self.selected
    }

    /// The text being edited, if any.
    pub fn editing_text(&self) -> Option<EntityId> {
        self.editing_text
    }

    /// Check if a decoration is selected.
    pub fn is_selected(&self, target: DecorationRef) -> bool {
        self.selected == Some(target)
    }

    /// Select a single decoration, replacing any previous selection.
    ///
    /// Selecting something other than the edited text leaves edit mode.
    pub fn select(&mut self, target: DecorationRef) {
        if self.editing_text.is_some_and(|id| DecorationRef::text(id) != target) {
            self.editing_text = None;
        }
        self.selected = Some(target);
    }

    /// Clear the selection and any edit state.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.editing_text = None;
    }

    /// Enter inline edit for a text. Any other edit is committed first.
    pub fn enter_editing(&mut self, id: EntityId) {
        self.selected = Some(DecorationRef::text(id));
        self.editing_text = Some(id);
    }

    /// Leave inline edit, keeping the text selected. Returns the text that
    /// was being edited.
    pub fn exit_editing(&mut self) -> Option<EntityId> {
        self.editing_text.take()
    }

    /// Check if currently in editing mode.
    pub fn is_editing(&self) -> bool {
        self.editing_text.is_some()
    }

    /// Forget a deleted decoration.
    pub fn remove(&mut self, target: DecorationRef) {
        if self.selected == Some(target) {
            self.selected = None;
        }
        if target.kind == DecorationKind::Text && self.editing_text == Some(target.id) {
            self.editing_text = None;
        }
    }
}
