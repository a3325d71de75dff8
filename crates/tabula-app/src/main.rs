//! Tabula - an entity-relationship diagram editor built with GPUI
//!
//! This is the main entry point for the application.

mod actions;
mod app_menus;
mod editor;
mod keymaps;
mod logging;
mod seed;

use gpui::{App, Application, WindowBounds, WindowOptions, px, size};

use crate::actions::Quit;
use crate::editor::EditorView;

fn main() {
    // Logging comes up before anything else so every later failure is
    // captured. This is the one acceptable use of eprintln.
    if let Err(e) = logging::init_default() {
        eprintln!("FATAL: failed to initialize logging: {e}");
        std::process::exit(1);
    }
    logging::install_panic_hook();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        build_mode = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        "Starting Tabula"
    );

    let app = Application::new();

    app.run(move |cx| {
        tabula_ui::init(cx);
        keymaps::init(cx);
        app_menus::init(cx);

        cx.on_action(|_: &Quit, cx| cx.quit());

        if let Err(e) = open_main_window(cx) {
            tracing::error!("Failed to open main window: {e}");
        }
    });
}

fn open_main_window(cx: &mut App) -> anyhow::Result<()> {
    let window_options = WindowOptions {
        window_bounds: Some(WindowBounds::centered(size(px(1280.0), px(800.0)), cx)),
        window_min_size: Some(size(px(800.0), px(600.0))),
        ..Default::default()
    };

    cx.open_window(window_options, |window, cx| {
        window.activate_window();
        window.set_window_title("Tabula");
        cx.new(|cx| EditorView::new(window, cx))
    })?;

    tracing::info!("Main window opened");
    Ok(())
}
