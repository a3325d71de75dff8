//! Layout helpers and shared styling traits

use gpui::{Div, Styled, div};

/// A horizontal flex row with centered items.
pub fn h_flex() -> Div {
    div().flex().flex_row().items_center()
}

/// A vertical flex column.
pub fn v_flex() -> Div {
    div().flex().flex_col()
}

/// Widgets that can be rendered in a disabled state.
pub trait Disableable {
    fn disabled(self, disabled: bool) -> Self;
}
