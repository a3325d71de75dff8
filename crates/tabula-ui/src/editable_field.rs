//! In-place editable text field
//!
//! Two states: viewing and editing. Double-click enters editing; Enter or
//! blur commits the buffered value; Escape restores the original without
//! emitting anything. The state machine itself (`EditBuffer`) is a plain
//! struct so the commit/cancel behavior tests without a window.

use gpui::prelude::FluentBuilder;
use gpui::{
    ClickEvent, Context, Entity, EventEmitter, InteractiveElement, IntoElement, ParentElement,
    Render, SharedString, StatefulInteractiveElement, Styled, Subscription, Window, div,
};

use crate::input::{Input, InputEvent, InputState};
use crate::theme::ActiveTheme;

/// The viewing/editing state machine behind an [`EditableField`].
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    value: String,
    /// `Some` while editing; holds the uncommitted draft
    draft: Option<String>,
}

impl EditBuffer {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            draft: None,
        }
    }

    /// The committed, externally visible value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Enter editing with the draft seeded from the current value.
    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.value.clone());
        }
    }

    /// Update the draft while editing. Ignored in the viewing state.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        if self.draft.is_some() {
            self.draft = Some(draft.into());
        }
    }

    /// Leave editing, making the draft the committed value. Returns the
    /// committed value, or `None` when not editing.
    pub fn commit(&mut self) -> Option<String> {
        let draft = self.draft.take()?;
        self.value = draft.clone();
        Some(draft)
    }

    /// Leave editing, discarding the draft.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Replace the committed value from outside. Ignored while editing so
    /// an in-flight draft is not clobbered by a re-render.
    pub fn sync_value(&mut self, value: impl Into<String>) {
        if self.draft.is_none() {
            self.value = value.into();
        }
    }
}

/// Events emitted by an [`EditableField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditableFieldEvent {
    /// The buffered value was committed via Enter or blur
    Saved(String),
}

/// A double-click-to-edit text field.
pub struct EditableField {
    buffer: EditBuffer,
    placeholder: SharedString,
    input: Entity<InputState>,
    _subscription: Subscription,
}

impl EditableField {
    pub fn new(value: impl Into<String>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let input = cx.new(|cx| InputState::new(window, cx));
        let subscription = cx.subscribe(&input, |this: &mut Self, input, event: &InputEvent, cx| {
            match event {
                InputEvent::Change => {
                    let draft = input.read(cx).value().to_string();
                    this.buffer.set_draft(draft);
                }
                InputEvent::PressEnter | InputEvent::Blur => {
                    if let Some(value) = this.buffer.commit() {
                        cx.emit(EditableFieldEvent::Saved(value));
                        cx.notify();
                    }
                }
                InputEvent::Escape => {
                    this.buffer.cancel();
                    cx.notify();
                }
            }
        });

        Self {
            buffer: EditBuffer::new(value),
            placeholder: SharedString::default(),
            input,
            _subscription: subscription,
        }
    }

    /// Builder: muted text shown in the viewing state when the value is
    /// empty.
    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        self.buffer.value()
    }

    /// Push a new committed value from the owner. No-op while editing.
    pub fn sync_value(&mut self, value: impl Into<String>, cx: &mut Context<Self>) {
        self.buffer.sync_value(value);
        cx.notify();
    }

    fn begin_edit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.buffer.begin_edit();
        let value = self.buffer.value().to_string();
        self.input.update(cx, |input, cx| {
            input.set_value(value, window, cx);
            input.focus(window, cx);
        });
        cx.notify();
    }
}

impl EventEmitter<EditableFieldEvent> for EditableField {}

impl Render for EditableField {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme().clone();

        if self.buffer.is_editing() {
            div()
                .w_full()
                .child(Input::new(&self.input).xsmall().w_full())
                .into_any_element()
        } else {
            let value = self.buffer.value().to_string();
            let empty = value.is_empty();
            div()
                .id("field-value")
                .w_full()
                .px_1()
                .rounded(theme.radius)
                .hover(|this| this.bg(theme.muted))
                .when(empty, |this| {
                    this.text_color(theme.muted_foreground)
                        .child(self.placeholder.clone())
                })
                .when(!empty, |this| this.child(value))
                .on_click(cx.listener(|this, event: &ClickEvent, window, cx| {
                    if event.click_count() == 2 {
                        this.begin_edit(window, cx);
                    }
                }))
                .into_any_element()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Escape during an edit leaves the visible value untouched and there
    /// is nothing to commit.
    #[test]
    fn cancel_restores_original_value() {
        let mut buffer = EditBuffer::new("title");
        buffer.begin_edit();
        buffer.set_draft("headline");
        buffer.cancel();
        assert_eq!(buffer.value(), "title");
        assert!(!buffer.is_editing());
        assert_eq!(buffer.commit(), None);
    }

    /// Commit returns the draft and makes it the new value.
    #[test]
    fn commit_applies_draft() {
        let mut buffer = EditBuffer::new("title");
        buffer.begin_edit();
        buffer.set_draft("headline");
        assert_eq!(buffer.commit(), Some("headline".to_string()));
        assert_eq!(buffer.value(), "headline");
    }

    /// Committing without a change still commits the buffered value; the
    /// draft seeds from the original on begin_edit.
    #[test]
    fn commit_without_draft_change_returns_original() {
        let mut buffer = EditBuffer::new("title");
        buffer.begin_edit();
        assert_eq!(buffer.commit(), Some("title".to_string()));
    }

    /// Draft updates are ignored in the viewing state, and a second
    /// begin_edit does not clobber an in-flight draft.
    #[test]
    fn draft_only_mutates_while_editing() {
        let mut buffer = EditBuffer::new("title");
        buffer.set_draft("ignored");
        assert_eq!(buffer.commit(), None);
        assert_eq!(buffer.value(), "title");

        buffer.begin_edit();
        buffer.set_draft("headline");
        buffer.begin_edit();
        assert_eq!(buffer.commit(), Some("headline".to_string()));
    }

    /// External value pushes apply only while viewing; an active edit wins.
    #[test]
    fn sync_value_respects_active_edit() {
        let mut buffer = EditBuffer::new("title");
        buffer.sync_value("renamed");
        assert_eq!(buffer.value(), "renamed");

        buffer.begin_edit();
        buffer.set_draft("draft");
        buffer.sync_value("external");
        assert_eq!(buffer.commit(), Some("draft".to_string()));
    }
}
