//! Checkbox widget

use gpui::prelude::FluentBuilder;
use gpui::{
    App, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::theme::ActiveTheme;

/// A two-state checkbox. The click handler receives the value the box
/// should take after the click.
#[derive(IntoElement)]
pub struct Checkbox {
    id: ElementId,
    checked: bool,
    on_click: Option<Box<dyn Fn(&bool, &mut Window, &mut App) + 'static>>,
}

impl Checkbox {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            checked: false,
            on_click: None,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn on_click(mut self, handler: impl Fn(&bool, &mut Window, &mut App) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for Checkbox {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();
        let checked = self.checked;

        div()
            .id(self.id)
            .flex()
            .flex_none()
            .items_center()
            .justify_center()
            .size(px(16.0))
            .rounded(px(3.0))
            .border_1()
            .map(|this| {
                if checked {
                    this.bg(theme.primary)
                        .border_color(theme.primary)
                        .text_color(theme.primary_foreground)
                        .text_xs()
                        .child("✓")
                } else {
                    this.bg(theme.background).border_color(theme.border)
                }
            })
            .cursor_pointer()
            .when_some(self.on_click, |this, on_click| {
                this.on_click(move |_, window, cx| on_click(&!checked, window, cx))
            })
    }
}
