//! Schema designer panel

use gpui::prelude::FluentBuilder;
use gpui::{
    Context, Entity, EventEmitter, FocusHandle, Focusable, InteractiveElement, IntoElement,
    ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Subscription,
    Window, div, px,
};

use tabula_schema::{Column, Table};
use tabula_ui::button::Button;
use tabula_ui::checkbox::Checkbox;
use tabula_ui::editable_field::{EditableField, EditableFieldEvent};
use tabula_ui::{ActiveTheme, h_flex, v_flex};

use crate::events::SchemaDesignerEvent;
use crate::ops::{self, CellField, FlagField};

const HANDLE_WIDTH: f32 = 22.0;
const NAME_WIDTH: f32 = 130.0;
const LOGICAL_WIDTH: f32 = 100.0;
const TYPE_WIDTH: f32 = 96.0;
const FLAG_WIDTH: f32 = 40.0;
const DELETE_WIDTH: f32 = 32.0;

/// Drag payload for row reordering: the source row position plus a label
/// for the drag preview.
#[derive(Clone)]
struct DragRow {
    row: usize,
    name: SharedString,
}

impl Render for DragRow {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        div()
            .px_2()
            .py_1()
            .rounded(theme.radius)
            .bg(theme.panel)
            .border_1()
            .border_color(theme.drag_border)
            .text_xs()
            .child(self.name.clone())
    }
}

/// Spreadsheet-like editor over one table's columns.
pub struct SchemaDesignerPanel {
    focus_handle: FocusHandle,

    /// The table as last received or emitted. Always consistent with what
    /// the owner has committed, except for in-flight cell drafts that live
    /// inside the editable fields.
    table: Table,

    /// Per-row editable fields, indexed by row position
    name_fields: Vec<Entity<EditableField>>,
    logical_fields: Vec<Entity<EditableField>>,
    type_fields: Vec<Entity<EditableField>>,

    /// Set after structural changes (add/delete/reorder); the next render
    /// rebuilds the per-row fields to match the new row order
    fields_stale: bool,

    _field_subscriptions: Vec<Subscription>,
}

impl SchemaDesignerPanel {
    pub fn new(table: Table, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let mut this = Self {
            focus_handle: cx.focus_handle(),
            table,
            name_fields: Vec::new(),
            logical_fields: Vec::new(),
            type_fields: Vec::new(),
            fields_stale: false,
            _field_subscriptions: Vec::new(),
        };
        this.rebuild_fields(window, cx);
        this
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Supply the table to edit.
    ///
    /// A different table (by name) or a different row count re-seeds the
    /// grid, discarding any uncommitted cell drafts. The same table coming
    /// back after a commit syncs values in place so edit focus survives.
    pub fn set_table(&mut self, table: Table, window: &mut Window, cx: &mut Context<Self>) {
        let reseed =
            table.name != self.table.name || table.columns.len() != self.table.columns.len();
        self.table = table;
        if reseed {
            self.rebuild_fields(window, cx);
        } else {
            for (row, column) in self.table.columns.clone().into_iter().enumerate() {
                if let Some(field) = self.name_fields.get(row) {
                    field.update(cx, |field, cx| field.sync_value(column.name.clone(), cx));
                }
                if let Some(field) = self.logical_fields.get(row) {
                    field.update(cx, |field, cx| {
                        field.sync_value(column.logical_name.clone().unwrap_or_default(), cx)
                    });
                }
                if let Some(field) = self.type_fields.get(row) {
                    field.update(cx, |field, cx| field.sync_value(column.ty.clone(), cx));
                }
            }
        }
        cx.notify();
    }

    fn rebuild_fields(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.name_fields.clear();
        self.logical_fields.clear();
        self.type_fields.clear();
        self._field_subscriptions.clear();

        for (row, column) in self.table.columns.clone().into_iter().enumerate() {
            let name = self.make_field(row, CellField::Name, column.name.clone(), window, cx);
            self.name_fields.push(name);

            let logical = self.make_field(
                row,
                CellField::LogicalName,
                column.logical_name.clone().unwrap_or_default(),
                window,
                cx,
            );
            self.logical_fields.push(logical);

            let ty = self.make_field(row, CellField::Type, column.ty.clone(), window, cx);
            self.type_fields.push(ty);
        }

        self.fields_stale = false;
    }

    fn make_field(
        &mut self,
        row: usize,
        field: CellField,
        value: String,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Entity<EditableField> {
        let entity = cx.new(|cx| EditableField::new(value, window, cx));
        self._field_subscriptions.push(cx.subscribe(
            &entity,
            move |this: &mut Self, _, event: &EditableFieldEvent, cx| {
                let EditableFieldEvent::Saved(value) = event;
                this.commit_cell(row, field, value.clone(), cx);
            },
        ));
        entity
    }

    /// Replace one cell and emit. Non-structural: the edited field already
    /// shows the committed value.
    fn commit_cell(&mut self, row: usize, field: CellField, value: String, cx: &mut Context<Self>) {
        let columns = ops::apply_cell_edit(&self.table.columns, row, field, &value);
        self.emit_change(columns, false, cx);
    }

    fn toggle_flag(&mut self, row: usize, field: FlagField, cx: &mut Context<Self>) {
        let columns = ops::toggle_flag(&self.table.columns, row, field);
        self.emit_change(columns, false, cx);
    }

    fn add_column(&mut self, cx: &mut Context<Self>) {
        let (columns, name) = ops::add_row(&self.table.columns);
        tracing::debug!(table = %self.table.name, column = %name, "adding column");
        self.emit_change(columns, true, cx);
    }

    fn delete_row(&mut self, row: usize, cx: &mut Context<Self>) {
        let columns = ops::remove_row(&self.table.columns, row);
        self.emit_change(columns, true, cx);
    }

    fn reorder(&mut self, from: usize, to: usize, cx: &mut Context<Self>) {
        if from == to {
            return;
        }
        let columns = ops::reorder_row(&self.table.columns, from, to);
        self.emit_change(columns, true, cx);
    }

    /// The single exit point: wrap the new column list in the full table
    /// record and emit it. `structural` re-seeds the per-row fields on the
    /// next render so row indices stay aligned.
    fn emit_change(&mut self, columns: Vec<Column>, structural: bool, cx: &mut Context<Self>) {
        self.table = self.table.with_columns(columns);
        if structural {
            self.fields_stale = true;
        }
        cx.emit(SchemaDesignerEvent::SchemaChanged {
            table: self.table.clone(),
        });
        cx.notify();
    }

    fn render_header(&self, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .w_full()
            .bg(theme.table_head)
            .border_1()
            .border_color(theme.border)
            .text_xs()
            .font_weight(gpui::FontWeight::SEMIBOLD)
            .text_color(theme.muted_foreground)
            .child(div().w(px(HANDLE_WIDTH)).py_1())
            .child(header_cell(NAME_WIDTH, "Column Name", theme.border))
            .child(header_cell(LOGICAL_WIDTH, "Logical Name", theme.border))
            .child(header_cell(TYPE_WIDTH, "Data Type", theme.border))
            .child(flag_header_cell(FLAG_WIDTH, "NULL", theme.border))
            .child(flag_header_cell(FLAG_WIDTH, "PK", theme.border))
            .child(div().w(px(DELETE_WIDTH)).py_1())
    }

    fn render_row(&self, row: usize, column: &Column, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme().clone();
        let nullable = column.nullable;
        let primary_key = column.primary_key;
        let drag_name: SharedString = column.name.clone().into();

        h_flex()
            .id(("column-row", row))
            .w_full()
            .bg(if row % 2 == 0 {
                theme.table_even
            } else {
                theme.table
            })
            .border_l_1()
            .border_r_1()
            .border_b_1()
            .border_color(theme.border)
            .drag_over::<DragRow>(|this, _, _, cx| {
                this.border_t_2().border_color(cx.theme().drag_border)
            })
            .on_drop(cx.listener(move |this, drag: &DragRow, _window, cx| {
                this.reorder(drag.row, row, cx);
            }))
            // Drag handle
            .child(
                div()
                    .id(("row-drag-handle", row))
                    .w(px(HANDLE_WIDTH))
                    .py_1()
                    .flex()
                    .justify_center()
                    .cursor_grab()
                    .text_color(theme.muted_foreground)
                    .text_xs()
                    .child("⣿")
                    .on_drag(
                        DragRow {
                            row,
                            name: drag_name,
                        },
                        |drag, _, _, cx| {
                            cx.stop_propagation();
                            cx.new(|_| drag.clone())
                        },
                    ),
            )
            .child(field_cell(NAME_WIDTH, self.name_fields.get(row).cloned(), theme.border))
            .child(field_cell(
                LOGICAL_WIDTH,
                self.logical_fields.get(row).cloned(),
                theme.border,
            ))
            .child(field_cell(TYPE_WIDTH, self.type_fields.get(row).cloned(), theme.border))
            // NULL checkbox
            .child(
                div()
                    .w(px(FLAG_WIDTH))
                    .py_1()
                    .flex()
                    .justify_center()
                    .border_r_1()
                    .border_color(theme.border)
                    .child(
                        Checkbox::new(("nullable", row))
                            .checked(nullable)
                            .on_click(cx.listener(move |this, _, _window, cx| {
                                this.toggle_flag(row, FlagField::Nullable, cx);
                            })),
                    ),
            )
            // Primary key checkbox
            .child(
                div()
                    .w(px(FLAG_WIDTH))
                    .py_1()
                    .flex()
                    .justify_center()
                    .border_r_1()
                    .border_color(theme.border)
                    .child(
                        Checkbox::new(("primary-key", row))
                            .checked(primary_key)
                            .on_click(cx.listener(move |this, _, _window, cx| {
                                this.toggle_flag(row, FlagField::PrimaryKey, cx);
                            })),
                    ),
            )
            // Row delete
            .child(
                div().w(px(DELETE_WIDTH)).py(px(2.0)).flex().justify_center().child(
                    Button::new(("delete-row", row))
                        .label("✕")
                        .ghost()
                        .xsmall()
                        .on_click(cx.listener(move |this, _, _window, cx| {
                            this.delete_row(row, cx);
                        })),
                ),
            )
    }
}

fn header_cell(width: f32, label: &'static str, border: gpui::Hsla) -> impl IntoElement {
    div()
        .w(px(width))
        .px_2()
        .py_1()
        .border_r_1()
        .border_color(border)
        .child(label)
}

fn flag_header_cell(width: f32, label: &'static str, border: gpui::Hsla) -> impl IntoElement {
    div()
        .w(px(width))
        .py_1()
        .flex()
        .justify_center()
        .border_r_1()
        .border_color(border)
        .child(label)
}

fn field_cell(
    width: f32,
    field: Option<Entity<EditableField>>,
    border: gpui::Hsla,
) -> impl IntoElement {
    div()
        .w(px(width))
        .px_1()
        .py(px(2.0))
        .border_r_1()
        .border_color(border)
        .text_xs()
        .when_some(field, |this, field| this.child(field))
}

impl EventEmitter<SchemaDesignerEvent> for SchemaDesignerPanel {}

impl Focusable for SchemaDesignerPanel {
    fn focus_handle(&self, _cx: &gpui::App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for SchemaDesignerPanel {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if self.fields_stale {
            self.rebuild_fields(window, cx);
        }

        let theme = cx.theme().clone();
        let columns = self.table.columns.clone();

        let rows = columns
            .iter()
            .enumerate()
            .map(|(row, column)| self.render_row(row, column, cx).into_any_element())
            .collect::<Vec<_>>();

        v_flex()
            .id("schema-designer")
            .key_context("SchemaDesigner")
            .track_focus(&self.focus_handle)
            .size_full()
            .child(
                h_flex()
                    .w_full()
                    .justify_between()
                    .pb_2()
                    .child(
                        Button::new("add-column")
                            .label("Add Column")
                            .small()
                            .primary()
                            .on_click(cx.listener(|this, _, _window, cx| this.add_column(cx))),
                    )
                    .child(
                        div()
                            .text_xs()
                            .text_color(theme.muted_foreground)
                            .child(format!("{} columns", columns.len())),
                    ),
            )
            .child(self.render_header(cx))
            .when(columns.is_empty(), |this| {
                this.child(
                    div()
                        .w_full()
                        .py_4()
                        .flex()
                        .justify_center()
                        .text_sm()
                        .text_color(theme.muted_foreground)
                        .border_l_1()
                        .border_r_1()
                        .border_b_1()
                        .border_color(theme.border)
                        .child("No columns. Add one to get started."),
                )
            })
            .children(rows)
    }
}
