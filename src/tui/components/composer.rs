//! # Composer Component
//!
//! The tabbed email/SMS message form. Drafts live in core `App` state; this
//! component owns only presentation state (active tab, focused field) and the
//! translation of key events into whole-field edits.
//!
//! The `to` row is read-only: recipient lists come from vendor group
//! selection, never from typing. Switching tabs touches no draft data.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Tabs, Wrap};

use crate::core::state::{EmailDraft, SmsDraft};
use crate::tui::event::TuiEvent;

/// Which channel's form is on screen. Pure UI state, orthogonal to drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Sms,
}

/// Editable field focus within the active tab. The SMS tab only has a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    Subject,
    Body,
}

/// Persistent composer presentation state.
pub struct ComposerState {
    pub active_tab: Channel,
    pub focus: FocusField,
}

impl ComposerState {
    pub fn new() -> Self {
        Self {
            active_tab: Channel::Email,
            focus: FocusField::Subject,
        }
    }

    /// Toggle between the email and SMS tabs, resetting field focus.
    pub fn switch_tab(&mut self) {
        self.active_tab = match self.active_tab {
            Channel::Email => Channel::Sms,
            Channel::Sms => Channel::Email,
        };
        self.focus = match self.active_tab {
            Channel::Email => FocusField::Subject,
            Channel::Sms => FocusField::Body,
        };
    }

    pub fn focus_up(&mut self) {
        if self.active_tab == Channel::Email {
            self.focus = FocusField::Subject;
        }
    }

    pub fn focus_down(&mut self) {
        self.focus = FocusField::Body;
    }
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply an editing key to a field's current value, returning the new value.
/// Returns None when the event is not an edit (or a backspace on empty text).
/// Enter appends a newline only in multiline fields.
pub fn apply_edit(current: &str, event: &TuiEvent, multiline: bool) -> Option<String> {
    match event {
        TuiEvent::InputChar(c) => {
            let mut value = current.to_string();
            value.push(*c);
            Some(value)
        }
        TuiEvent::Paste(text) => {
            let mut value = current.to_string();
            value.push_str(text);
            Some(value)
        }
        TuiEvent::Backspace => {
            let mut value = current.to_string();
            value.pop().map(|_| value)
        }
        TuiEvent::Submit if multiline => {
            let mut value = current.to_string();
            value.push('\n');
            Some(value)
        }
        _ => None,
    }
}

/// Transient render wrapper over borrowed composer + draft state.
pub struct Composer<'a> {
    state: &'a ComposerState,
    email: &'a EmailDraft,
    sms: &'a SmsDraft,
    is_sending: bool,
}

impl<'a> Composer<'a> {
    pub fn new(
        state: &'a ComposerState,
        email: &'a EmailDraft,
        sms: &'a SmsDraft,
        is_sending: bool,
    ) -> Self {
        Self {
            state,
            email,
            sms,
            is_sending,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};

        let outer = Block::bordered().title(" Compose Incident Message ");
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let [tabs_area, form_area] = Layout::vertical([Length(1), Min(0)]).areas(inner);

        let selected = match self.state.active_tab {
            Channel::Email => 0,
            Channel::Sms => 1,
        };
        let tabs = Tabs::new(vec![" Email ", " SMS "])
            .select(selected)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, tabs_area);

        match self.state.active_tab {
            Channel::Email => self.render_email(frame, form_area),
            Channel::Sms => self.render_sms(frame, form_area),
        }
    }

    fn render_email(&self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [to_area, subject_area, body_area] =
            Layout::vertical([Length(3), Length(3), Min(3)]).areas(area);

        self.render_to_field(frame, to_area, &self.email.to);
        render_field(
            frame,
            subject_area,
            "Subject",
            &self.email.subject,
            self.state.focus == FocusField::Subject,
        );
        render_field(
            frame,
            body_area,
            self.body_title(),
            &self.email.body,
            self.state.focus == FocusField::Body,
        );
    }

    fn render_sms(&self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [to_area, body_area] = Layout::vertical([Length(3), Min(3)]).areas(area);

        self.render_to_field(frame, to_area, &self.sms.to);
        render_field(frame, body_area, self.body_title(), &self.sms.body, true);
    }

    fn body_title(&self) -> &'static str {
        if self.is_sending {
            "Message — sending..."
        } else {
            "Message"
        }
    }

    fn render_to_field(&self, frame: &mut Frame, area: Rect, to: &str) {
        let text = if to.is_empty() {
            "Select a vendor group first... (Ctrl+G)"
        } else {
            to
        };
        let field = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::bordered()
                    .title("To (read-only)")
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(field, area);
    }
}

fn render_field(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let field = Paragraph::new(value)
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title(title)
                .border_style(border_style),
        );
    frame.render_widget(field, area);
}
