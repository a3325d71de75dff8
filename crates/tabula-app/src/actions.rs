//! Tabula actions
//!
//! Actions can be triggered via keyboard shortcuts, menus or UI buttons.

use gpui::actions;

actions!(
    tabula,
    [
        // Application actions
        Quit,
        /// Placeholder menu entry; persistence is not wired yet
        Save,
        // Document actions
        AddTable,
        Undo,
        Redo,
        // Layout actions
        CloseDrawer,
    ]
);
