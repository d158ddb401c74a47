//! Widget system for decoration selection and inline editing.
//!
//! Decorations remain pure data. This module tracks which one is selected,
//! which text is being edited, and where the selected one's handles are.

mod handles;
mod manager;
mod state;

pub use handles::{Handle, HandleKind, decoration_handles, hit_test_handles};
pub use manager::WidgetManager;
pub use state::WidgetState;
