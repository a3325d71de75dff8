//! Editor page
//!
//! The composition root: owns the [`ErdStore`] exclusively and wires the
//! canvas, the drawer and the schema designer against it. All schema
//! mutation flows through here, synchronously inside UI callbacks: a panel
//! emits an event, the store commits, and the panels are handed fresh
//! store-derived copies to render.

use gpui::prelude::FluentBuilder;
use gpui::{
    Context, Entity, FocusHandle, Focusable, InteractiveElement, IntoElement, ParentElement,
    Pixels, Render, Styled, Subscription, Window, div,
};

use tabula_canvas::{CanvasEvent, CanvasView};
use tabula_designer::{SchemaDesignerEvent, SchemaDesignerPanel};
use tabula_schema::{Table, unique_table_name};
use tabula_store::ErdStore;
use tabula_ui::button::Button;
use tabula_ui::drawer::{self, Drawer};
use tabula_ui::{ActiveTheme, Disableable, h_flex, v_flex};

use crate::actions::{AddTable, CloseDrawer, Redo, Save, Undo};
use crate::keymaps;
use crate::seed;

/// Canvas offset for tables created via Add Table, cascaded so new nodes
/// don't stack exactly on top of each other.
const NEW_TABLE_STEP: f32 = 32.0;

pub struct EditorView {
    focus_handle: FocusHandle,

    /// The single owner of schema state and history
    store: ErdStore,

    canvas: Entity<CanvasView>,
    /// Present while the drawer is open, editing the selected table
    designer: Option<Entity<SchemaDesignerPanel>>,
    drawer_width: Pixels,

    _canvas_subscription: Subscription,
    designer_subscription: Option<Subscription>,
}

impl EditorView {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let store = ErdStore::new(seed::tables());

        let canvas = cx.new(|cx| CanvasView::new(window, cx));
        canvas.update(cx, |canvas, cx| {
            canvas.set_tables(store.tables().to_vec(), window, cx);
            canvas.set_edges(seed::edges(), cx);
        });

        let canvas_subscription = cx.subscribe_in(&canvas, window, {
            move |this: &mut Self, _canvas, event: &CanvasEvent, window, cx| {
                this.handle_canvas_event(event.clone(), window, cx);
            }
        });

        Self {
            focus_handle: cx.focus_handle(),
            store,
            canvas,
            designer: None,
            drawer_width: drawer::DEFAULT_WIDTH,
            _canvas_subscription: canvas_subscription,
            designer_subscription: None,
        }
    }

    fn handle_canvas_event(
        &mut self,
        event: CanvasEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match event {
            CanvasEvent::NodeClicked { table } => {
                tracing::debug!(table = %table.name, "node clicked");
                self.open_drawer_for(table, window, cx);
            }
            CanvasEvent::EdgeClicked { edge } => {
                tracing::debug!(
                    edge = %edge.id,
                    source = %edge.source,
                    target = %edge.target,
                    label = %edge.label,
                    "edge clicked"
                );
            }
            CanvasEvent::NodeMoved { name, position } => {
                self.store.move_table(&name, position);
                self.sync_canvas(window, cx);
            }
            CanvasEvent::TableEdited { table } => {
                self.store.update_table(table);
                self.sync_after_commit(window, cx);
            }
        }
    }

    /// Select the table and open the drawer with a designer seeded for it.
    fn open_drawer_for(&mut self, table: Table, window: &mut Window, cx: &mut Context<Self>) {
        self.store.select_table(Some(&table));

        let designer = cx.new(|cx| SchemaDesignerPanel::new(table, window, cx));
        self.designer_subscription = Some(cx.subscribe_in(&designer, window, {
            move |this: &mut Self, _designer, event: &SchemaDesignerEvent, window, cx| {
                let SchemaDesignerEvent::SchemaChanged { table } = event;
                this.store.update_table(table.clone());
                this.sync_after_commit(window, cx);
            }
        }));
        self.designer = Some(designer);
        cx.notify();
    }

    fn close_drawer(&mut self, cx: &mut Context<Self>) {
        self.store.select_table(None);
        self.designer = None;
        self.designer_subscription = None;
        cx.notify();
    }

    /// Hand the canvas a fresh copy of the live table list.
    fn sync_canvas(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let tables = self.store.tables().to_vec();
        self.canvas
            .update(cx, |canvas, cx| canvas.set_tables(tables, window, cx));
        cx.notify();
    }

    /// After a commit: refresh the canvas and push the committed selection
    /// back into the open designer.
    fn sync_after_commit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.sync_canvas(window, cx);
        if let Some(designer) = self.designer.clone() {
            if let Some(selected) = self.store.selected_table().cloned() {
                designer.update(cx, |designer, cx| designer.set_table(selected, window, cx));
            }
        }
    }

    fn perform_undo(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.store.undo();
        // The store dropped the selection; the drawer follows it.
        self.designer = None;
        self.designer_subscription = None;
        self.sync_canvas(window, cx);
    }

    fn perform_redo(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.store.redo();
        self.designer = None;
        self.designer_subscription = None;
        self.sync_canvas(window, cx);
    }

    fn perform_add_table(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let name = unique_table_name(self.store.tables());
        let offset = 40.0 + NEW_TABLE_STEP * self.store.tables().len() as f32;
        let table = Table::new(name.clone()).position(offset, offset);
        tracing::debug!(table = %name, "adding table");
        self.store.add_table(table);
        self.sync_canvas(window, cx);
    }

    fn handle_undo(&mut self, _: &Undo, window: &mut Window, cx: &mut Context<Self>) {
        self.perform_undo(window, cx);
    }

    fn handle_redo(&mut self, _: &Redo, window: &mut Window, cx: &mut Context<Self>) {
        self.perform_redo(window, cx);
    }

    fn handle_add_table(&mut self, _: &AddTable, window: &mut Window, cx: &mut Context<Self>) {
        self.perform_add_table(window, cx);
    }

    fn handle_save(&mut self, _: &Save, _window: &mut Window, _cx: &mut Context<Self>) {
        tracing::info!("save is a placeholder; the session is in-memory only");
    }

    fn handle_close_drawer(
        &mut self,
        _: &CloseDrawer,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if self.designer.is_some() {
            self.close_drawer(cx);
        }
    }

    fn render_toolbar(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme().clone();

        h_flex()
            .w_full()
            .justify_between()
            .px_3()
            .py_2()
            .gap_2()
            .bg(theme.panel)
            .border_b_1()
            .border_color(theme.border)
            .child(
                h_flex()
                    .gap_2()
                    .child(
                        div()
                            .text_sm()
                            .font_weight(gpui::FontWeight::SEMIBOLD)
                            .mr_2()
                            .child("Tabula"),
                    )
                    .child(
                        Button::new("add-table")
                            .label("Add Table")
                            .small()
                            .primary()
                            .on_click(cx.listener(|this, _, window, cx| {
                                this.perform_add_table(window, cx)
                            })),
                    )
                    .child(
                        Button::new("undo")
                            .label("Undo")
                            .small()
                            .disabled(!self.store.can_undo())
                            .on_click(cx.listener(|this, _, window, cx| {
                                this.perform_undo(window, cx)
                            })),
                    )
                    .child(
                        Button::new("redo")
                            .label("Redo")
                            .small()
                            .disabled(!self.store.can_redo())
                            .on_click(cx.listener(|this, _, window, cx| {
                                this.perform_redo(window, cx)
                            })),
                    ),
            )
            .child(
                div()
                    .text_xs()
                    .text_color(theme.muted_foreground)
                    .child(format!("{} tables", self.store.tables().len())),
            )
    }
}

impl Focusable for EditorView {
    fn focus_handle(&self, _cx: &gpui::App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for EditorView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme().clone();

        let drawer = self.designer.clone().map(|designer| {
            let title = self
                .store
                .selected_table()
                .map(|table| format!("{} ({})", table.logical_name, table.name))
                .unwrap_or_else(|| designer.read(cx).table().name.clone());

            Drawer::new(title)
                .width(self.drawer_width)
                .on_close(cx.listener(|this, _, _window, cx| this.close_drawer(cx)))
                .on_resize(cx.listener(|this, width: &Pixels, _window, cx| {
                    this.drawer_width = *width;
                    cx.notify();
                }))
                .child(designer)
        });

        v_flex()
            .id("editor-page")
            .key_context(keymaps::CONTEXT)
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::handle_undo))
            .on_action(cx.listener(Self::handle_redo))
            .on_action(cx.listener(Self::handle_add_table))
            .on_action(cx.listener(Self::handle_save))
            .on_action(cx.listener(Self::handle_close_drawer))
            .size_full()
            .bg(theme.background)
            .text_color(theme.foreground)
            .font_family(theme.font_family.clone())
            .text_size(theme.font_size)
            .child(self.render_toolbar(cx))
            .child(
                div()
                    .relative()
                    .flex_1()
                    .overflow_hidden()
                    .child(self.canvas.clone())
                    .when_some(drawer, |this, drawer| this.child(drawer)),
            )
    }
}
