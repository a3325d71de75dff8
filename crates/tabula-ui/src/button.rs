//! Button widget

use gpui::prelude::FluentBuilder;
use gpui::{
    App, ClickEvent, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::styled::Disableable;
use crate::theme::ActiveTheme;

/// Visual style of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Filled accent button for the main action
    Primary,
    /// Bordered neutral button
    #[default]
    Outline,
    /// Borderless button that only shows a background on hover
    Ghost,
    /// Destructive action
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ButtonSize {
    #[default]
    Medium,
    Small,
    XSmall,
}

/// A clickable button with a text label.
#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    label: SharedString,
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
    on_click: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
}

impl Button {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            label: SharedString::default(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            disabled: false,
            on_click: None,
        }
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = label.into();
        self
    }

    pub fn primary(mut self) -> Self {
        self.variant = ButtonVariant::Primary;
        self
    }

    pub fn ghost(mut self) -> Self {
        self.variant = ButtonVariant::Ghost;
        self
    }

    pub fn danger(mut self) -> Self {
        self.variant = ButtonVariant::Danger;
        self
    }

    pub fn small(mut self) -> Self {
        self.size = ButtonSize::Small;
        self
    }

    pub fn xsmall(mut self) -> Self {
        self.size = ButtonSize::XSmall;
        self
    }

    pub fn on_click(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }
}

impl Disableable for Button {
    fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl RenderOnce for Button {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();

        let (bg, bg_hover, fg) = match self.variant {
            ButtonVariant::Primary => (theme.primary, theme.primary_hover, theme.primary_foreground),
            ButtonVariant::Outline => (theme.background, theme.secondary_hover, theme.foreground),
            ButtonVariant::Ghost => (gpui::transparent_black(), theme.secondary_hover, theme.foreground),
            ButtonVariant::Danger => (theme.danger, theme.danger, theme.primary_foreground),
        };

        let base = div()
            .id(self.id)
            .flex()
            .flex_none()
            .items_center()
            .justify_center()
            .rounded(theme.radius)
            .bg(bg)
            .text_color(fg)
            .when(self.variant == ButtonVariant::Outline, |this| {
                this.border_1().border_color(theme.border)
            })
            .map(|this| match self.size {
                ButtonSize::Medium => this.px_3().py_1p5().text_sm(),
                ButtonSize::Small => this.px_2p5().py_1().text_sm(),
                ButtonSize::XSmall => this.px_1p5().py(px(2.0)).text_xs(),
            })
            .child(self.label);

        if self.disabled {
            base.opacity(0.5).cursor_default()
        } else {
            base.cursor_pointer()
                .hover(move |this| this.bg(bg_hover))
                .when_some(self.on_click, |this, on_click| {
                    this.on_click(move |event, window, cx| on_click(event, window, cx))
                })
        }
    }
}
