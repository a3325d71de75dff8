//! Application menu definitions
//!
//! Menus are defined with GPUI's `Menu` and `MenuItem` types; on macOS
//! they land in the native menu bar.

use gpui::{App, Menu, MenuItem};

use crate::actions::{AddTable, Quit, Redo, Save, Undo};

pub fn init(cx: &mut App) {
    cx.set_menus(vec![
        // Application menu (macOS only - this is the special app menu)
        #[cfg(target_os = "macos")]
        Menu {
            name: "Tabula".into(),
            items: vec![MenuItem::action("Quit Tabula", Quit)],
        },
        Menu {
            name: "File".into(),
            items: vec![
                MenuItem::action("New Table", AddTable),
                MenuItem::separator(),
                MenuItem::action("Save", Save),
                #[cfg(not(target_os = "macos"))]
                MenuItem::separator(),
                #[cfg(not(target_os = "macos"))]
                MenuItem::action("Exit", Quit),
            ],
        },
        Menu {
            name: "Edit".into(),
            items: vec![
                MenuItem::action("Undo", Undo),
                MenuItem::action("Redo", Redo),
            ],
        },
    ]);
}
