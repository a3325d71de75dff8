//! Resizable side drawer
//!
//! An overlay panel fixed to the window's right edge with a drag-resizable
//! left edge. The owner keeps the width so the drawer itself stays
//! stateless; resize drags report the clamped width back through
//! `on_resize`.

use std::rc::Rc;

use gpui::prelude::FluentBuilder;
use gpui::{
    AnyElement, App, ClickEvent, DragMoveEvent, Empty, InteractiveElement, IntoElement,
    ParentElement, Pixels, Render, RenderOnce, SharedString, StatefulInteractiveElement, Styled,
    Window, div, px,
};

use crate::button::Button;
use crate::styled::{h_flex, v_flex};
use crate::theme::ActiveTheme;

pub const DEFAULT_WIDTH: Pixels = px(500.0);
pub const MIN_WIDTH: Pixels = px(200.0);
pub const MAX_WIDTH: Pixels = px(600.0);

/// Drag payload for the resize handle.
#[derive(Clone)]
struct ResizeDrawer;

impl Render for ResizeDrawer {
    fn render(&mut self, _window: &mut Window, _cx: &mut gpui::Context<Self>) -> impl IntoElement {
        Empty
    }
}

/// The drawer panel. Hosts arbitrary content under a title row.
#[derive(IntoElement)]
pub struct Drawer {
    title: SharedString,
    width: Pixels,
    on_close: Option<Rc<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
    on_resize: Option<Rc<dyn Fn(&Pixels, &mut Window, &mut App) + 'static>>,
    children: Vec<AnyElement>,
}

impl Drawer {
    pub fn new(title: impl Into<SharedString>) -> Self {
        Self {
            title: title.into(),
            width: DEFAULT_WIDTH,
            on_close: None,
            on_resize: None,
            children: Vec::new(),
        }
    }

    /// Current width, owned by the caller.
    pub fn width(mut self, width: Pixels) -> Self {
        self.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
        self
    }

    pub fn on_close(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_close = Some(Rc::new(handler));
        self
    }

    /// Called with the clamped width while the left edge is dragged.
    pub fn on_resize(mut self, handler: impl Fn(&Pixels, &mut Window, &mut App) + 'static) -> Self {
        self.on_resize = Some(Rc::new(handler));
        self
    }
}

impl ParentElement for Drawer {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for Drawer {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();
        let on_resize = self.on_resize.clone();

        let resize_handle = div()
            .id("drawer-resize-handle")
            .absolute()
            .top_0()
            .left_0()
            .h_full()
            .w(px(5.0))
            .cursor_col_resize()
            .bg(theme.border.opacity(0.0))
            .hover(|this| this.bg(theme.border))
            .on_drag(ResizeDrawer, |drag, _, _, cx| {
                cx.stop_propagation();
                cx.new(|_| drag.clone())
            })
            .when_some(on_resize, |this, on_resize| {
                this.on_drag_move(move |e: &DragMoveEvent<ResizeDrawer>, window, cx| {
                    let width = window.viewport_size().width - e.event.position.x;
                    on_resize(&width.clamp(MIN_WIDTH, MAX_WIDTH), window, cx);
                })
            });

        v_flex()
            .id("drawer")
            .absolute()
            .top_0()
            .right_0()
            .bottom_0()
            .w(self.width)
            .bg(theme.panel)
            .border_l_1()
            .border_color(theme.border)
            .shadow_lg()
            .overflow_hidden()
            .child(resize_handle)
            .child(
                h_flex()
                    .w_full()
                    .justify_between()
                    .px_3()
                    .py_2()
                    .border_b_1()
                    .border_color(theme.border)
                    .child(div().text_sm().font_weight(gpui::FontWeight::SEMIBOLD).child(self.title))
                    .when_some(self.on_close, |this, on_close| {
                        this.child(
                            Button::new("drawer-close")
                                .label("✕")
                                .ghost()
                                .xsmall()
                                .on_click(move |event, window, cx| on_close(event, window, cx)),
                        )
                    }),
            )
            .child(
                div()
                    .id("drawer-content")
                    .flex_1()
                    .overflow_y_scroll()
                    .p_3()
                    .children(self.children),
            )
    }
}
