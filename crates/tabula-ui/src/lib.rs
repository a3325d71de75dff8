//! Tabula UI widgets
//!
//! The small widget layer the editor is composed from: theme, flex helpers,
//! button, checkbox, a single-line text input, the double-click-to-edit
//! field built on top of it, and the resizable side drawer.

use gpui::App;

pub mod button;
pub mod checkbox;
pub mod drawer;
pub mod editable_field;
pub mod input;
mod styled;
mod theme;

pub use styled::{Disableable, h_flex, v_flex};
pub use theme::{ActiveTheme, Theme, ThemeMode};

/// Initialize the widget system: theme global plus input key bindings.
pub fn init(cx: &mut App) {
    theme::init(cx);
    input::init(cx);
}
