//! Theme global

use gpui::{App, Global, Hsla, Pixels, SharedString, WindowAppearance, hsla, px};

pub fn init(cx: &mut App) {
    let mode = match cx.window_appearance() {
        WindowAppearance::Dark | WindowAppearance::VibrantDark => ThemeMode::Dark,
        WindowAppearance::Light | WindowAppearance::VibrantLight => ThemeMode::Light,
    };
    cx.set_global(Theme::new(mode));
    tracing::info!(?mode, "Theme initialized");
}

/// Read access to the theme from any context that derefs to [`App`].
pub trait ActiveTheme {
    fn theme(&self) -> &Theme;
}

impl ActiveTheme for App {
    #[inline(always)]
    fn theme(&self) -> &Theme {
        Theme::global(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

/// Flat color and metric set for the whole application.
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub font_family: SharedString,
    pub font_size: Pixels,
    pub radius: Pixels,

    pub background: Hsla,
    pub foreground: Hsla,
    pub muted: Hsla,
    pub muted_foreground: Hsla,
    pub border: Hsla,
    pub selection: Hsla,
    pub caret: Hsla,

    pub panel: Hsla,
    pub overlay: Hsla,

    pub primary: Hsla,
    pub primary_hover: Hsla,
    pub primary_foreground: Hsla,
    pub secondary: Hsla,
    pub secondary_hover: Hsla,
    pub danger: Hsla,
    pub warning: Hsla,

    pub table_head: Hsla,
    pub table: Hsla,
    pub table_even: Hsla,
    pub drag_border: Hsla,

    pub node: Hsla,
    pub node_border: Hsla,
    pub edge: Hsla,
    pub canvas_dot: Hsla,
}

impl Global for Theme {}

impl Theme {
    pub fn global(cx: &App) -> &Theme {
        cx.global::<Theme>()
    }

    pub fn new(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    fn base(mode: ThemeMode) -> Self {
        Self {
            mode,
            font_family: ".SystemUIFont".into(),
            font_size: px(14.0),
            radius: px(4.0),
            background: gpui::white(),
            foreground: gpui::black(),
            muted: hsla(0.0, 0.0, 0.96, 1.0),
            muted_foreground: hsla(0.0, 0.0, 0.45, 1.0),
            border: hsla(0.0, 0.0, 0.88, 1.0),
            selection: hsla(0.61, 0.9, 0.85, 1.0),
            caret: hsla(0.61, 0.9, 0.5, 1.0),
            panel: gpui::white(),
            overlay: hsla(0.0, 0.0, 0.0, 0.4),
            primary: hsla(0.61, 0.85, 0.5, 1.0),
            primary_hover: hsla(0.61, 0.85, 0.58, 1.0),
            primary_foreground: gpui::white(),
            secondary: hsla(0.0, 0.0, 0.94, 1.0),
            secondary_hover: hsla(0.0, 0.0, 0.9, 1.0),
            danger: hsla(0.0, 0.75, 0.52, 1.0),
            warning: hsla(0.1, 0.85, 0.5, 1.0),
            table_head: hsla(0.0, 0.0, 0.97, 1.0),
            table: gpui::white(),
            table_even: hsla(0.0, 0.0, 0.985, 1.0),
            drag_border: hsla(0.61, 0.85, 0.5, 1.0),
            node: gpui::white(),
            node_border: hsla(0.0, 0.0, 0.2, 1.0),
            edge: hsla(0.0, 0.0, 0.4, 1.0),
            canvas_dot: hsla(0.0, 0.0, 0.8, 1.0),
        }
    }

    pub fn light() -> Self {
        Self::base(ThemeMode::Light)
    }

    pub fn dark() -> Self {
        Self {
            background: hsla(0.0, 0.0, 0.11, 1.0),
            foreground: hsla(0.0, 0.0, 0.9, 1.0),
            muted: hsla(0.0, 0.0, 0.16, 1.0),
            muted_foreground: hsla(0.0, 0.0, 0.55, 1.0),
            border: hsla(0.0, 0.0, 0.24, 1.0),
            selection: hsla(0.61, 0.5, 0.32, 1.0),
            caret: hsla(0.61, 0.9, 0.65, 1.0),
            panel: hsla(0.0, 0.0, 0.13, 1.0),
            secondary: hsla(0.0, 0.0, 0.2, 1.0),
            secondary_hover: hsla(0.0, 0.0, 0.26, 1.0),
            table_head: hsla(0.0, 0.0, 0.16, 1.0),
            table: hsla(0.0, 0.0, 0.13, 1.0),
            table_even: hsla(0.0, 0.0, 0.145, 1.0),
            node: hsla(0.0, 0.0, 0.15, 1.0),
            node_border: hsla(0.0, 0.0, 0.45, 1.0),
            edge: hsla(0.0, 0.0, 0.6, 1.0),
            canvas_dot: hsla(0.0, 0.0, 0.28, 1.0),
            ..Self::base(ThemeMode::Dark)
        }
    }
}
