//! Keybindings for the editor page

use gpui::{App, KeyBinding};

use crate::actions::{AddTable, CloseDrawer, Redo, Save, Undo};

pub const CONTEXT: &str = "EditorPage";

/// Register the editor-page keybindings.
///
/// Escape is bound here too; inside an active cell edit the input's own
/// deeper key context takes it first, so Escape cancels the edit before it
/// ever closes the drawer.
pub fn init(cx: &mut App) {
    cx.bind_keys([
        #[cfg(target_os = "macos")]
        KeyBinding::new("cmd-z", Undo, Some(CONTEXT)),
        #[cfg(target_os = "macos")]
        KeyBinding::new("cmd-shift-z", Redo, Some(CONTEXT)),
        #[cfg(target_os = "macos")]
        KeyBinding::new("cmd-n", AddTable, Some(CONTEXT)),
        #[cfg(target_os = "macos")]
        KeyBinding::new("cmd-s", Save, Some(CONTEXT)),
        #[cfg(not(target_os = "macos"))]
        KeyBinding::new("ctrl-z", Undo, Some(CONTEXT)),
        #[cfg(not(target_os = "macos"))]
        KeyBinding::new("ctrl-shift-z", Redo, Some(CONTEXT)),
        #[cfg(not(target_os = "macos"))]
        KeyBinding::new("ctrl-n", AddTable, Some(CONTEXT)),
        #[cfg(not(target_os = "macos"))]
        KeyBinding::new("ctrl-s", Save, Some(CONTEXT)),
        KeyBinding::new("escape", CloseDrawer, Some(CONTEXT)),
    ]);
}
