//! Canvas view

use std::collections::HashMap;

use gpui::prelude::FluentBuilder;
use gpui::{
    Bounds, Context, DragMoveEvent, Empty, Entity, EventEmitter, InteractiveElement, IntoElement,
    MouseButton, MouseDownEvent, MouseUpEvent, ParentElement, Path, Pixels, Point, Render,
    SharedString, StatefulInteractiveElement, Styled, Subscription, Window, canvas, div, fill,
    point, px, size,
};

use tabula_schema::{Position, Table};
use tabula_ui::ActiveTheme;

use crate::edge::Edge;
use crate::node::{NodeEvent, TableNode, node_size};

const GRID_GAP: f32 = 16.0;
const EDGE_WIDTH: f32 = 1.5;
const ARROW_SIZE: f32 = 8.0;

/// Events the canvas forwards to its owner. Tagged records, no duck
/// typing: each carries exactly the payload the event means.
#[derive(Debug, Clone)]
pub enum CanvasEvent {
    /// A table node was clicked
    NodeClicked { table: Table },
    /// An edge label was clicked
    EdgeClicked { edge: Edge },
    /// A node drag ended; the owner decides whether to persist the move
    NodeMoved { name: String, position: Position },
    /// A node-level field edit (logical name) was committed
    TableEdited { table: Table },
}

/// Drag payload carried while a node is dragged. The preview is empty:
/// the node itself follows the pointer through the live drag position.
#[derive(Clone)]
struct DragNode {
    name: String,
}

impl Render for DragNode {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        Empty
    }
}

struct ActiveDrag {
    name: String,
    /// Pointer offset from the node origin, captured at mouse down
    grab: Point<Pixels>,
    /// Live node position while the drag is in flight
    position: Position,
}

/// The diagram surface: positioned table nodes over a dotted grid, with
/// relationship edges painted underneath.
pub struct CanvasView {
    tables: Vec<Table>,
    edges: Vec<Edge>,
    nodes: HashMap<String, Entity<TableNode>>,
    node_subscriptions: HashMap<String, Subscription>,
    /// Pointer position recorded on node mouse-down, consumed when a drag
    /// actually starts
    pending_grab: Option<(String, Point<Pixels>)>,
    drag: Option<ActiveDrag>,
    /// Canvas bounds from the last prepaint, for window-to-canvas coords
    bounds: Bounds<Pixels>,
}

impl CanvasView {
    pub fn new(_window: &mut Window, cx: &mut Context<Self>) -> Self {
        let _ = cx;
        Self {
            tables: Vec::new(),
            edges: Vec::new(),
            nodes: HashMap::new(),
            node_subscriptions: HashMap::new(),
            pending_grab: None,
            drag: None,
            bounds: Bounds::default(),
        }
    }

    /// Replace the table list with a fresh store-derived copy and
    /// reconcile the node entities: new tables get nodes, dropped tables
    /// lose them, surviving ones re-sync in place so an in-flight label
    /// edit is not discarded by an unrelated commit.
    pub fn set_tables(&mut self, tables: Vec<Table>, window: &mut Window, cx: &mut Context<Self>) {
        for table in &tables {
            match self.nodes.get(&table.name) {
                Some(node) => node.update(cx, |node, cx| node.sync_table(table.clone(), cx)),
                None => {
                    let node = cx.new(|cx| TableNode::new(table.clone(), window, cx));
                    let name = table.name.clone();
                    let subscription = cx.subscribe(&node, {
                        let name = name.clone();
                        move |this: &mut Self, _, event: &NodeEvent, cx| {
                            this.handle_node_event(&name, event, cx)
                        }
                    });
                    self.nodes.insert(name.clone(), node);
                    self.node_subscriptions.insert(name, subscription);
                }
            }
        }

        self.nodes.retain(|name, _| tables.iter().any(|t| &t.name == name));
        self.node_subscriptions
            .retain(|name, _| tables.iter().any(|t| &t.name == name));

        self.tables = tables;
        cx.notify();
    }

    /// Replace the edge list.
    pub fn set_edges(&mut self, edges: Vec<Edge>, cx: &mut Context<Self>) {
        self.edges = edges;
        cx.notify();
    }

    fn handle_node_event(&mut self, name: &str, event: &NodeEvent, cx: &mut Context<Self>) {
        let Some(table) = self.tables.iter().find(|t| t.name == name) else {
            tracing::warn!(table = %name, "node event for a table no longer on the canvas");
            return;
        };

        match event {
            NodeEvent::Clicked => cx.emit(CanvasEvent::NodeClicked {
                table: table.clone(),
            }),
            NodeEvent::LogicalNameChanged(value) => {
                let mut updated = table.clone();
                updated.logical_name = value.clone();
                cx.emit(CanvasEvent::TableEdited { table: updated });
            }
        }
    }

    fn on_drag_move(
        &mut self,
        event: &DragMoveEvent<DragNode>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let name = event.drag(cx).name.clone();

        if self.drag.is_none() {
            let Some(table) = self.tables.iter().find(|t| t.name == name) else {
                return;
            };
            // Grab offset from the mouse-down that started this drag; if it
            // was lost, grab the node by its top-left corner.
            let grab = match self.pending_grab.take() {
                Some((pending_name, down)) if pending_name == name => {
                    let origin = self.bounds.origin
                        + point(px(table.position.x), px(table.position.y));
                    down - origin
                }
                _ => point(px(0.0), px(0.0)),
            };
            self.drag = Some(ActiveDrag {
                name: name.clone(),
                grab,
                position: table.position,
            });
        }

        if let Some(drag) = self.drag.as_mut() {
            let p = event.event.position - self.bounds.origin - drag.grab;
            drag.position = Position::new(f32::from(p.x).max(0.0), f32::from(p.y).max(0.0));
            cx.notify();
        }
    }

    fn finish_drag(&mut self, _: &MouseUpEvent, _window: &mut Window, cx: &mut Context<Self>) {
        self.pending_grab = None;
        if let Some(drag) = self.drag.take() {
            cx.emit(CanvasEvent::NodeMoved {
                name: drag.name,
                position: drag.position,
            });
            cx.notify();
        }
    }

    /// The position a table renders at right now: the live drag position
    /// for the dragged node, the committed one for everything else.
    fn render_position(&self, table: &Table) -> Position {
        match &self.drag {
            Some(drag) if drag.name == table.name => drag.position,
            _ => table.position,
        }
    }

    /// Each edge whose endpoints are both on the canvas, paired with its
    /// segment in canvas-local coordinates: the line between the two node
    /// centers, clipped to the node rectangles so the arrowhead lands on
    /// the target's border. Edges naming a missing table are skipped.
    fn edge_segments(&self) -> Vec<(Edge, (Point<Pixels>, Point<Pixels>))> {
        self.edges
            .iter()
            .filter_map(|edge| {
                let source = self.tables.iter().find(|t| t.name == edge.source)?;
                let target = self.tables.iter().find(|t| t.name == edge.target)?;
                let source_rect = node_rect(self.render_position(source), source);
                let target_rect = node_rect(self.render_position(target), target);
                let from = source_rect.center();
                let to = target_rect.center();
                Some((
                    edge.clone(),
                    (
                        clip_to_rect(to, from, &source_rect),
                        clip_to_rect(from, to, &target_rect),
                    ),
                ))
            })
            .collect()
    }
}

impl EventEmitter<CanvasEvent> for CanvasView {}

impl Render for CanvasView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme().clone();
        let dot_color = theme.canvas_dot;
        let edge_color = theme.edge;
        let segments = self.edge_segments();
        let paint_segments: Vec<_> = segments.iter().map(|(_, segment)| *segment).collect();

        let background = canvas(
            |_, _, _| {},
            move |bounds, _, window, _| {
                // Dotted grid
                let mut y = 0.0;
                while y < f32::from(bounds.size.height) {
                    let mut x = 0.0;
                    while x < f32::from(bounds.size.width) {
                        let origin = bounds.origin + point(px(x), px(y));
                        window.paint_quad(fill(
                            Bounds::new(origin, size(px(1.5), px(1.5))),
                            dot_color,
                        ));
                        x += GRID_GAP;
                    }
                    y += GRID_GAP;
                }

                // Edges with arrowheads
                for (from, to) in &paint_segments {
                    let from = bounds.origin + *from;
                    let to = bounds.origin + *to;
                    if let Some(path) = line_path(from, to, px(EDGE_WIDTH)) {
                        window.paint_path(path, edge_color);
                    }
                    if let Some(path) = arrow_path(from, to, px(ARROW_SIZE)) {
                        window.paint_path(path, edge_color);
                    }
                }
            },
        )
        .size_full();

        let node_slots = self
            .tables
            .iter()
            .map(|table| {
                let position = self.render_position(table);
                let name = table.name.clone();
                div()
                    .id(SharedString::from(format!("node-slot-{}", table.name)))
                    .absolute()
                    .left(px(position.x))
                    .top(px(position.y))
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener({
                            let name = name.clone();
                            move |this, event: &MouseDownEvent, _window, _cx| {
                                this.pending_grab = Some((name.clone(), event.position));
                            }
                        }),
                    )
                    .on_drag(DragNode { name }, |drag, _, _, cx| {
                        cx.stop_propagation();
                        cx.new(|_| drag.clone())
                    })
                    .when_some(
                        self.nodes.get(&table.name).cloned(),
                        |this, node| this.child(node),
                    )
            })
            .collect::<Vec<_>>();

        let edge_labels = segments
            .iter()
            .map(|(edge, (from, to))| {
                let mid = point((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
                let edge = edge.clone();
                div()
                    .id(SharedString::from(format!("edge-{}", edge.id)))
                    .absolute()
                    .left(mid.x - px(14.0))
                    .top(mid.y - px(9.0))
                    .px_1()
                    .rounded(theme.radius)
                    .bg(theme.panel)
                    .border_1()
                    .border_color(theme.border)
                    .text_xs()
                    .text_color(theme.muted_foreground)
                    .cursor_pointer()
                    .child(edge.label.clone())
                    .on_click(cx.listener(move |_, _, _, cx| {
                        cx.emit(CanvasEvent::EdgeClicked { edge: edge.clone() });
                    }))
            })
            .collect::<Vec<_>>();

        div()
            .id("erd-canvas")
            .relative()
            .size_full()
            .overflow_hidden()
            .bg(theme.background)
            .on_prepaint({
                let view = cx.entity().clone();
                move |bounds, _, cx| view.update(cx, |this, _| this.bounds = bounds)
            })
            .on_drag_move(cx.listener(Self::on_drag_move))
            .on_mouse_up(MouseButton::Left, cx.listener(Self::finish_drag))
            .on_mouse_up_out(MouseButton::Left, cx.listener(Self::finish_drag))
            .child(div().absolute().inset_0().child(background))
            .children(edge_labels)
            .children(node_slots)
    }
}

fn node_rect(position: Position, table: &Table) -> Bounds<Pixels> {
    Bounds::new(point(px(position.x), px(position.y)), node_size(table))
}

/// Where the segment from `from` toward `to` crosses the border of `rect`
/// (which contains `to`). Falls back to `to` for degenerate segments.
fn clip_to_rect(from: Point<Pixels>, to: Point<Pixels>, rect: &Bounds<Pixels>) -> Point<Pixels> {
    let dx = f32::from(to.x - from.x);
    let dy = f32::from(to.y - from.y);
    if dx == 0.0 && dy == 0.0 {
        return to;
    }

    let mut t = 1.0f32;
    if dx != 0.0 {
        let plane = if dx > 0.0 {
            f32::from(rect.origin.x)
        } else {
            f32::from(rect.origin.x + rect.size.width)
        };
        let candidate = (plane - f32::from(from.x)) / dx;
        if candidate > 0.0 {
            t = t.min(candidate);
        }
    }
    if dy != 0.0 {
        let plane = if dy > 0.0 {
            f32::from(rect.origin.y)
        } else {
            f32::from(rect.origin.y + rect.size.height)
        };
        let candidate = (plane - f32::from(from.y)) / dy;
        if candidate > 0.0 {
            t = t.min(candidate);
        }
    }

    point(
        from.x + px(dx * t),
        from.y + px(dy * t),
    )
}

/// A straight line as a filled quad of the given thickness.
fn line_path(from: Point<Pixels>, to: Point<Pixels>, width: Pixels) -> Option<Path<Pixels>> {
    let dx = f32::from(to.x - from.x);
    let dy = f32::from(to.y - from.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1.0 {
        return None;
    }
    let half = f32::from(width) / 2.0;
    let nx = -dy / len * half;
    let ny = dx / len * half;

    let mut path = Path::new(point(from.x + px(nx), from.y + px(ny)));
    path.line_to(point(to.x + px(nx), to.y + px(ny)));
    path.line_to(point(to.x - px(nx), to.y - px(ny)));
    path.line_to(point(from.x - px(nx), from.y - px(ny)));
    Some(path)
}

/// A closed arrowhead at `to`, pointing away from `from`.
fn arrow_path(from: Point<Pixels>, to: Point<Pixels>, size: Pixels) -> Option<Path<Pixels>> {
    let dx = f32::from(to.x - from.x);
    let dy = f32::from(to.y - from.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1.0 {
        return None;
    }
    let (ux, uy) = (dx / len, dy / len);
    let size = f32::from(size);
    let base = point(to.x - px(ux * size), to.y - px(uy * size));
    let half = size * 0.5;
    let (nx, ny) = (-uy * half, ux * half);

    let mut path = Path::new(to);
    path.line_to(point(base.x + px(nx), base.y + px(ny)));
    path.line_to(point(base.x - px(nx), base.y - px(ny)));
    Some(path)
}
