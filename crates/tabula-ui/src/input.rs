//! Single-line text input
//!
//! `InputState` owns the value, cursor and selection and implements
//! `EntityInputHandler`, so typed characters and IME composition arrive
//! through the same OS path as any real editor. `Input` is the styled
//! wrapper views embed; action handlers cover movement, selection and
//! deletion under the `"Input"` key context.

use std::ops::Range;

use gpui::prelude::FluentBuilder;
use gpui::{
    App, Bounds, Context, ElementId, ElementInputHandler, Entity, EntityInputHandler,
    EventEmitter, FocusHandle, Focusable, GlobalElementId, InspectorElementId,
    InteractiveElement, IntoElement, KeyBinding, LayoutId, MouseButton, MouseDownEvent,
    ParentElement, Pixels, Refineable, Render, RenderOnce, ShapedLine, SharedString, Style,
    StyleRefinement, Styled, TextAlign, TextRun, UTF16Selection, Window, actions, div, fill,
    point, px, relative, size,
};

use crate::theme::ActiveTheme;

actions!(
    input,
    [
        Backspace,
        Delete,
        Left,
        Right,
        SelectLeft,
        SelectRight,
        SelectAll,
        Home,
        End,
        Enter,
        Escape,
    ]
);

pub const CONTEXT: &str = "Input";

/// Register the input key bindings.
pub fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("backspace", Backspace, Some(CONTEXT)),
        KeyBinding::new("delete", Delete, Some(CONTEXT)),
        KeyBinding::new("left", Left, Some(CONTEXT)),
        KeyBinding::new("right", Right, Some(CONTEXT)),
        KeyBinding::new("shift-left", SelectLeft, Some(CONTEXT)),
        KeyBinding::new("shift-right", SelectRight, Some(CONTEXT)),
        KeyBinding::new("home", Home, Some(CONTEXT)),
        KeyBinding::new("end", End, Some(CONTEXT)),
        KeyBinding::new("enter", Enter, Some(CONTEXT)),
        KeyBinding::new("escape", Escape, Some(CONTEXT)),
        #[cfg(target_os = "macos")]
        KeyBinding::new("cmd-a", SelectAll, Some(CONTEXT)),
        #[cfg(not(target_os = "macos"))]
        KeyBinding::new("ctrl-a", SelectAll, Some(CONTEXT)),
    ]);
}

/// Events emitted by an [`InputState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The value changed through typing, IME or deletion
    Change,
    /// Enter was pressed while the input was focused
    PressEnter,
    /// The input lost focus
    Blur,
    /// Escape was pressed; the owner decides what to restore
    Escape,
}

/// State of a single-line text input.
pub struct InputState {
    focus_handle: FocusHandle,
    value: String,
    placeholder: SharedString,
    /// Cursor position as a byte offset into `value`
    cursor: usize,
    /// Selection anchor; `None` when nothing is selected
    selection_anchor: Option<usize>,
    /// Byte range of an in-progress IME composition
    marked_range: Option<Range<usize>>,
    /// Text layout from the last prepaint, for pixel/index mapping
    last_layout: Option<ShapedLine>,
    /// Element bounds from the last prepaint
    last_bounds: Option<Bounds<Pixels>>,
}

impl InputState {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let focus_handle = cx.focus_handle();
        cx.on_blur(&focus_handle, window, |_, _, cx| {
            cx.emit(InputEvent::Blur);
            cx.notify();
        })
        .detach();

        Self {
            focus_handle,
            value: String::new(),
            placeholder: SharedString::default(),
            cursor: 0,
            selection_anchor: None,
            marked_range: None,
            last_layout: None,
            last_bounds: None,
        }
    }

    /// Builder: set the placeholder text shown while the value is empty.
    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the whole value, putting the cursor at the end. Does not
    /// emit [`InputEvent::Change`]; this is the programmatic path used to
    /// seed the input.
    pub fn set_value(&mut self, value: impl Into<String>, _window: &mut Window, cx: &mut Context<Self>) {
        self.value = value.into();
        self.cursor = self.value.len();
        self.selection_anchor = None;
        self.marked_range = None;
        cx.notify();
    }

    /// Focus this input and select its entire value.
    pub fn focus(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        window.focus(&self.focus_handle, cx);
        self.select_all(&SelectAll, window, cx);
    }

    pub fn is_focused(&self, window: &Window) -> bool {
        self.focus_handle.is_focused(window)
    }

    /// Normalized selected byte range; empty at the cursor when nothing is
    /// selected.
    fn selected_range(&self) -> Range<usize> {
        match self.selection_anchor {
            Some(anchor) if anchor <= self.cursor => anchor..self.cursor,
            Some(anchor) => self.cursor..anchor,
            None => self.cursor..self.cursor,
        }
    }

    fn has_selection(&self) -> bool {
        self.selection_anchor
            .is_some_and(|anchor| anchor != self.cursor)
    }

    /// Splice `text` over `range` and move the cursor after it. Every edit
    /// funnels through here so the change event fires exactly once per
    /// mutation.
    fn replace_range(&mut self, range: Range<usize>, text: &str, cx: &mut Context<Self>) {
        let range = range.start.min(self.value.len())..range.end.min(self.value.len());
        self.value.replace_range(range.clone(), text);
        self.cursor = range.start + text.len();
        self.selection_anchor = None;
        self.marked_range = None;
        cx.emit(InputEvent::Change);
        cx.notify();
    }

    fn prev_boundary(&self, offset: usize) -> usize {
        self.value[..offset]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self, offset: usize) -> usize {
        self.value[offset..]
            .chars()
            .next()
            .map(|c| offset + c.len_utf8())
            .unwrap_or(self.value.len())
    }

    fn backspace(&mut self, _: &Backspace, _window: &mut Window, cx: &mut Context<Self>) {
        if self.has_selection() {
            self.replace_range(self.selected_range(), "", cx);
        } else if self.cursor > 0 {
            let start = self.prev_boundary(self.cursor);
            self.replace_range(start..self.cursor, "", cx);
        }
    }

    fn delete(&mut self, _: &Delete, _window: &mut Window, cx: &mut Context<Self>) {
        if self.has_selection() {
            self.replace_range(self.selected_range(), "", cx);
        } else if self.cursor < self.value.len() {
            let end = self.next_boundary(self.cursor);
            self.replace_range(self.cursor..end, "", cx);
        }
    }

    fn left(&mut self, _: &Left, _window: &mut Window, cx: &mut Context<Self>) {
        if self.has_selection() {
            self.cursor = self.selected_range().start;
        } else {
            self.cursor = self.prev_boundary(self.cursor);
        }
        self.selection_anchor = None;
        cx.notify();
    }

    fn right(&mut self, _: &Right, _window: &mut Window, cx: &mut Context<Self>) {
        if self.has_selection() {
            self.cursor = self.selected_range().end;
        } else {
            self.cursor = self.next_boundary(self.cursor);
        }
        self.selection_anchor = None;
        cx.notify();
    }

    fn select_left(&mut self, _: &SelectLeft, _window: &mut Window, cx: &mut Context<Self>) {
        self.selection_anchor.get_or_insert(self.cursor);
        self.cursor = self.prev_boundary(self.cursor);
        cx.notify();
    }

    fn select_right(&mut self, _: &SelectRight, _window: &mut Window, cx: &mut Context<Self>) {
        self.selection_anchor.get_or_insert(self.cursor);
        self.cursor = self.next_boundary(self.cursor);
        cx.notify();
    }

    fn select_all(&mut self, _: &SelectAll, _window: &mut Window, cx: &mut Context<Self>) {
        self.selection_anchor = Some(0);
        self.cursor = self.value.len();
        cx.notify();
    }

    fn home(&mut self, _: &Home, _window: &mut Window, cx: &mut Context<Self>) {
        self.cursor = 0;
        self.selection_anchor = None;
        cx.notify();
    }

    fn end(&mut self, _: &End, _window: &mut Window, cx: &mut Context<Self>) {
        self.cursor = self.value.len();
        self.selection_anchor = None;
        cx.notify();
    }

    fn enter(&mut self, _: &Enter, _window: &mut Window, cx: &mut Context<Self>) {
        cx.emit(InputEvent::PressEnter);
    }

    fn escape(&mut self, _: &Escape, _window: &mut Window, cx: &mut Context<Self>) {
        cx.emit(InputEvent::Escape);
    }

    fn on_mouse_down(&mut self, event: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        window.focus(&self.focus_handle, cx);

        if event.click_count == 2 {
            self.select_all(&SelectAll, window, cx);
            return;
        }

        // Place the cursor at the clicked glyph; past the end of the text
        // the layout reports nothing and the cursor goes to the end.
        if let (Some(layout), Some(bounds)) = (&self.last_layout, &self.last_bounds) {
            let x = event.position.x - bounds.origin.x;
            self.cursor = layout.index_for_x(x).unwrap_or(self.value.len());
        } else {
            self.cursor = self.value.len();
        }
        self.selection_anchor = None;
        cx.notify();
    }

    // UTF-16 offsets arrive from the OS input path; everything internal is
    // UTF-8 bytes.

    fn offset_from_utf16(&self, offset_utf16: usize) -> usize {
        let mut utf16_count = 0;
        for (byte_offset, ch) in self.value.char_indices() {
            if utf16_count >= offset_utf16 {
                return byte_offset;
            }
            utf16_count += ch.len_utf16();
        }
        self.value.len()
    }

    fn offset_to_utf16(&self, offset: usize) -> usize {
        self.value[..offset.min(self.value.len())]
            .chars()
            .map(char::len_utf16)
            .sum()
    }

    fn range_from_utf16(&self, range_utf16: &Range<usize>) -> Range<usize> {
        self.offset_from_utf16(range_utf16.start)..self.offset_from_utf16(range_utf16.end)
    }

    fn range_to_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_to_utf16(range.start)..self.offset_to_utf16(range.end)
    }
}

/// UTF-16 offset into `text` mapped to a byte offset, clamped to the end.
fn utf16_to_byte_offset(text: &str, offset_utf16: usize) -> usize {
    let mut utf16_count = 0;
    for (byte_offset, ch) in text.char_indices() {
        if utf16_count >= offset_utf16 {
            return byte_offset;
        }
        utf16_count += ch.len_utf16();
    }
    text.len()
}

impl EventEmitter<InputEvent> for InputState {}

impl Focusable for InputState {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl EntityInputHandler for InputState {
    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        adjusted_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<String> {
        let range = self.range_from_utf16(&range_utf16);
        adjusted_range.replace(self.range_to_utf16(&range));
        Some(self.value[range].to_string())
    }

    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<UTF16Selection> {
        Some(UTF16Selection {
            range: self.range_to_utf16(&self.selected_range()),
            reversed: self.selection_anchor.is_some_and(|a| a > self.cursor),
        })
    }

    fn marked_text_range(&self, _window: &mut Window, _cx: &mut Context<Self>) -> Option<Range<usize>> {
        self.marked_range
            .as_ref()
            .map(|range| self.range_to_utf16(range))
    }

    fn unmark_text(&mut self, _window: &mut Window, _cx: &mut Context<Self>) {
        self.marked_range = None;
    }

    fn replace_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        // Explicit IME range > marked range > selection > cursor.
        let range = range_utf16
            .map(|range| self.range_from_utf16(&range))
            .or_else(|| self.marked_range.clone())
            .unwrap_or_else(|| self.selected_range());
        self.replace_range(range, new_text, cx);
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        new_selected_range_utf16: Option<Range<usize>>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let range = range_utf16
            .map(|range| self.range_from_utf16(&range))
            .or_else(|| self.marked_range.clone())
            .unwrap_or_else(|| self.selected_range());

        self.value.replace_range(range.clone(), new_text);
        self.marked_range = Some(range.start..range.start + new_text.len());
        self.cursor = range.start
            + new_selected_range_utf16
                .map(|sel| utf16_to_byte_offset(new_text, sel.end))
                .unwrap_or(new_text.len());
        self.selection_anchor = None;
        cx.emit(InputEvent::Change);
        cx.notify();
    }

    fn bounds_for_range(
        &mut self,
        range_utf16: Range<usize>,
        element_bounds: Bounds<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Bounds<Pixels>> {
        let layout = self.last_layout.as_ref()?;
        let range = self.range_from_utf16(&range_utf16);
        let start_x = layout.x_for_index(range.start);
        let end_x = layout.x_for_index(range.end);
        Some(Bounds::new(
            point(element_bounds.origin.x + start_x, element_bounds.origin.y),
            size(end_x - start_x, element_bounds.size.height),
        ))
    }

    fn character_index_for_point(
        &mut self,
        _point: gpui::Point<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<usize> {
        None
    }
}

impl Render for InputState {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .id("input")
            .key_context(CONTEXT)
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::backspace))
            .on_action(cx.listener(Self::delete))
            .on_action(cx.listener(Self::left))
            .on_action(cx.listener(Self::right))
            .on_action(cx.listener(Self::select_left))
            .on_action(cx.listener(Self::select_right))
            .on_action(cx.listener(Self::select_all))
            .on_action(cx.listener(Self::home))
            .on_action(cx.listener(Self::end))
            .on_action(cx.listener(Self::enter))
            .on_action(cx.listener(Self::escape))
            .on_mouse_down(MouseButton::Left, cx.listener(Self::on_mouse_down))
            .cursor_text()
            .size_full()
            .flex()
            .items_center()
            .overflow_hidden()
            .child(InputElement {
                state: cx.entity().clone(),
            })
    }
}

/// The text element: shapes the line, registers the IME handler and paints
/// selection, text and caret.
struct InputElement {
    state: Entity<InputState>,
}

struct InputPrepaint {
    bounds: Bounds<Pixels>,
    line: ShapedLine,
    line_height: Pixels,
    selection: Option<Bounds<Pixels>>,
    cursor: Option<Bounds<Pixels>>,
}

impl IntoElement for InputElement {
    type Element = Self;

    fn into_element(self) -> Self {
        self
    }
}

impl gpui::Element for InputElement {
    type RequestLayoutState = ();
    type PrepaintState = InputPrepaint;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static std::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let mut style = Style::default();
        style.size.width = relative(1.).into();
        style.size.height = window.line_height().into();
        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let text_style = window.text_style();
        let font_size = text_style.font_size.to_pixels(window.rem_size());
        let line_height = window.line_height();
        let theme = cx.theme().clone();

        let state = self.state.read(cx);
        let value = state.value.clone();
        let placeholder = state.placeholder.clone();
        let selected = state.selected_range();
        let cursor_offset = state.cursor;
        let focused = state.focus_handle.is_focused(window);

        let (display_text, color) = if value.is_empty() {
            (placeholder.to_string(), theme.muted_foreground)
        } else {
            (value, theme.foreground)
        };

        let run = TextRun {
            len: display_text.len(),
            font: text_style.font(),
            color,
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let line = window
            .text_system()
            .shape_line(display_text.into(), font_size, &[run], None);

        let text_origin_y = bounds.origin.y + (bounds.size.height - line_height) / 2.0;

        let selection = (focused && selected.start != selected.end).then(|| {
            let start_x = line.x_for_index(selected.start);
            let end_x = line.x_for_index(selected.end);
            Bounds::new(
                point(bounds.origin.x + start_x, text_origin_y),
                size(end_x - start_x, line_height),
            )
        });

        let cursor = focused.then(|| {
            let x = line.x_for_index(cursor_offset);
            Bounds::new(
                point(bounds.origin.x + x, text_origin_y),
                size(px(1.5), line_height),
            )
        });

        // Remember layout and bounds for mouse hit-testing and IME queries.
        self.state.update(cx, |state, _| {
            state.last_layout = Some(line.clone());
            state.last_bounds = Some(bounds);
        });

        InputPrepaint {
            bounds,
            line,
            line_height,
            selection,
            cursor,
        }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let focus_handle = self.state.read(cx).focus_handle.clone();
        window.handle_input(
            &focus_handle,
            ElementInputHandler::new(bounds, self.state.clone()),
            cx,
        );

        let theme = cx.theme().clone();

        if let Some(selection) = prepaint.selection {
            window.paint_quad(fill(selection, theme.selection));
        }

        let text_origin = point(
            prepaint.bounds.origin.x,
            prepaint.bounds.origin.y + (prepaint.bounds.size.height - prepaint.line_height) / 2.0,
        );
        let _ = prepaint.line.paint(
            text_origin,
            prepaint.line_height,
            TextAlign::Left,
            None,
            window,
            cx,
        );

        if let Some(cursor) = prepaint.cursor {
            window.paint_quad(fill(cursor, theme.caret));
        }
    }
}

/// Styled wrapper around an [`InputState`], sized for toolbar or grid use.
#[derive(IntoElement)]
pub struct Input {
    state: Entity<InputState>,
    style: StyleRefinement,
    xsmall: bool,
}

impl Input {
    pub fn new(state: &Entity<InputState>) -> Self {
        Self {
            state: state.clone(),
            style: StyleRefinement::default(),
            xsmall: false,
        }
    }

    /// Compact variant used inside grid rows.
    pub fn xsmall(mut self) -> Self {
        self.xsmall = true;
        self
    }
}

impl Styled for Input {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for Input {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();
        let focused = self.state.read(cx).is_focused(window);

        let mut base = div()
            .flex()
            .items_center()
            .rounded(theme.radius)
            .border_1()
            .border_color(if focused { theme.primary } else { theme.border })
            .bg(theme.background)
            .map(|this| {
                if self.xsmall {
                    this.px_1().h(px(22.0)).text_xs()
                } else {
                    this.px_2().h(px(28.0)).text_sm()
                }
            })
            .child(self.state.clone());
        base.style().refine(&self.style);
        base
    }
}
