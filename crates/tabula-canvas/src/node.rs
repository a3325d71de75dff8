//! Table node renderer
//!
//! One visual node per table: the physical name, an editable logical name,
//! a separator and one `name: type` row per column. The node reports
//! clicks and logical-name commits upward; it never mutates the table it
//! was given.

use gpui::prelude::FluentBuilder;
use gpui::{
    Context, Entity, EventEmitter, InteractiveElement, IntoElement, ParentElement, Pixels,
    Render, Size, StatefulInteractiveElement, Styled, Subscription, Window, div, px, size,
};

use tabula_schema::Table;
use tabula_ui::editable_field::{EditableField, EditableFieldEvent};
use tabula_ui::{ActiveTheme, h_flex, v_flex};

pub const NODE_WIDTH: Pixels = px(180.0);
const HEADER_HEIGHT: f32 = 40.0;
const ROW_HEIGHT: f32 = 20.0;
const V_PADDING: f32 = 6.0;

/// Rendered size of a table's node, used by the canvas to anchor edges.
pub fn node_size(table: &Table) -> Size<Pixels> {
    size(
        NODE_WIDTH,
        px(HEADER_HEIGHT + ROW_HEIGHT * table.columns.len() as f32 + V_PADDING),
    )
}

/// Events a node reports to the canvas.
#[derive(Debug, Clone)]
pub enum NodeEvent {
    /// The node body was clicked
    Clicked,
    /// The logical name was committed through the editable field
    LogicalNameChanged(String),
}

/// One table's node on the canvas.
pub struct TableNode {
    table: Table,
    logical_name_field: Entity<EditableField>,
    _subscription: Subscription,
}

impl TableNode {
    pub fn new(table: Table, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let logical_name_field = cx.new(|cx| {
            EditableField::new(table.logical_name.clone(), window, cx).placeholder("logical name")
        });
        let subscription = cx.subscribe(
            &logical_name_field,
            |_, _, event: &EditableFieldEvent, cx| {
                let EditableFieldEvent::Saved(value) = event;
                cx.emit(NodeEvent::LogicalNameChanged(value.clone()));
            },
        );

        Self {
            table,
            logical_name_field,
            _subscription: subscription,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Refresh from a store-derived copy. The logical-name field keeps an
    /// in-flight edit; everything else re-renders from the new record.
    pub fn sync_table(&mut self, table: Table, cx: &mut Context<Self>) {
        self.logical_name_field.update(cx, |field, cx| {
            field.sync_value(table.logical_name.clone(), cx);
        });
        self.table = table;
        cx.notify();
    }
}

impl EventEmitter<NodeEvent> for TableNode {}

impl Render for TableNode {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme().clone();

        v_flex()
            .id("table-node")
            .on_click(cx.listener(|_, _, _, cx| cx.emit(NodeEvent::Clicked)))
            .w(NODE_WIDTH)
            .bg(theme.node)
            .border_1()
            .border_color(theme.node_border)
            .rounded(theme.radius)
            .shadow_md()
            .overflow_hidden()
            .cursor_pointer()
            .child(
                v_flex()
                    .w_full()
                    .h(px(HEADER_HEIGHT))
                    .px_2()
                    .py_1()
                    .border_b_1()
                    .border_color(theme.node_border)
                    .child(
                        div()
                            .text_sm()
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .child(self.table.name.clone()),
                    )
                    .child(
                        div()
                            .text_xs()
                            .text_color(theme.muted_foreground)
                            .child(self.logical_name_field.clone()),
                    ),
            )
            .child(
                v_flex().w_full().py(px(V_PADDING / 2.0)).children(
                    self.table.columns.iter().map(|column| {
                        h_flex()
                            .w_full()
                            .h(px(ROW_HEIGHT))
                            .px_2()
                            .justify_between()
                            .text_xs()
                            .child(div().child(column.name.clone()).when(
                                column.primary_key,
                                |this| this.font_weight(gpui::FontWeight::SEMIBOLD),
                            ))
                            .child(
                                div()
                                    .text_color(theme.muted_foreground)
                                    .child(column.ty.clone()),
                            )
                    }),
                ),
            )
    }
}
