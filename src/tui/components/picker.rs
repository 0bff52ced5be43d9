//! # Picker Component
//!
//! Full-screen overlay for choosing one entry from a list. Used for both the
//! customer picker (Ctrl+K) and the vendor group picker (Ctrl+G).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PickerState` lives in `TuiState` while the overlay is open
//! - `Picker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::tui::event::TuiEvent;

/// One selectable row: an id to report on selection, a display name, and a
/// dimmed detail column.
#[derive(Debug, Clone)]
pub struct PickerEntry {
    pub id: u32,
    pub name: String,
    pub detail: String,
}

/// Persistent state for the picker overlay.
pub struct PickerState {
    pub title: String,
    pub entries: Vec<PickerEntry>,
    pub selected: usize,
    pub list_state: ListState,
}

impl PickerState {
    pub fn new(title: impl Into<String>, entries: Vec<PickerEntry>) -> Self {
        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            title: title.into(),
            entries,
            selected: 0,
            list_state,
        }
    }

    /// Handle a key event, returning a PickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.entries.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1).min(self.entries.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .entries
                .get(self.selected)
                .map(|entry| PickerEvent::Select(entry.id)),
            _ => None,
        }
    }
}

/// Events emitted by the picker.
#[derive(Debug, PartialEq, Eq)]
pub enum PickerEvent {
    Select(u32),
    Dismiss,
}

/// Transient render wrapper for the picker overlay.
pub struct Picker<'a> {
    state: &'a mut PickerState,
}

impl<'a> Picker<'a> {
    pub fn new(state: &'a mut PickerState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 50, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let help_text = " ↑/↓ Move  Enter Select  Esc Back ";

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.state.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.state.entries.is_empty() {
            let empty = Paragraph::new("Nothing to choose from.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let inner_width = overlay.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let detail_width = entry.detail.len().min(inner_width / 2);
                let name_width = inner_width.saturating_sub(detail_width + 2);
                let name = truncate_str(&entry.name, name_width);
                let padded_name = format!("{:<width$}", name, width = name_width);

                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let detail_style = if i == self.state.selected {
                    style
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                ListItem::new(Line::from(vec![
                    ratatui::text::Span::styled(padded_name, style),
                    ratatui::text::Span::styled("  ", style),
                    ratatui::text::Span::styled(entry.detail.clone(), detail_style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);

        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
/// Counts chars, not bytes, so multibyte names never split mid-character.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn entries() -> Vec<PickerEntry> {
        vec![
            PickerEntry {
                id: 1,
                name: String::from("Acme Corp"),
                detail: String::from("2 groups"),
            },
            PickerEntry {
                id: 2,
                name: String::from("Beta Inc"),
                detail: String::from("3 groups"),
            },
        ]
    }

    #[test]
    fn test_navigation_clamps_at_bounds() {
        let mut picker = PickerState::new("Customers", entries());
        picker.handle_event(&TuiEvent::CursorUp);
        assert_eq!(picker.selected, 0);
        picker.handle_event(&TuiEvent::CursorDown);
        picker.handle_event(&TuiEvent::CursorDown);
        picker.handle_event(&TuiEvent::CursorDown);
        assert_eq!(picker.selected, 1);
    }

    #[test]
    fn test_submit_reports_selected_id() {
        let mut picker = PickerState::new("Customers", entries());
        picker.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            picker.handle_event(&TuiEvent::Submit),
            Some(PickerEvent::Select(2))
        );
    }

    #[test]
    fn test_escape_dismisses() {
        let mut picker = PickerState::new("Customers", entries());
        assert_eq!(
            picker.handle_event(&TuiEvent::Escape),
            Some(PickerEvent::Dismiss)
        );
    }

    #[test]
    fn test_submit_on_empty_list_is_noop() {
        let mut picker = PickerState::new("Customers", Vec::new());
        assert_eq!(picker.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_truncate_str_is_char_boundary_safe() {
        // Two-byte chars: a byte-index cut would land mid-character
        assert_eq!(truncate_str("üüüüüüüüüüüü", 10), "üüüüüüü...");
        assert_eq!(truncate_str("Müller GmbH", 20), "Müller GmbH");
        assert_eq!(truncate_str("日本エンタープライズ", 6), "日本エ...");
        assert_eq!(truncate_str("ééééé", 2), "..");
    }

    #[test]
    fn test_render_truncates_long_multibyte_names() {
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = PickerState::new(
            "Customers",
            vec![PickerEntry {
                id: 1,
                name: "Überlange Kundennamen GmbH & Co. KGaA München".repeat(2),
                detail: String::from("2 groups"),
            }],
        );
        // Must not panic while fitting the name into the overlay width
        terminal
            .draw(|f| {
                Picker::new(&mut state).render(f, f.area());
            })
            .unwrap();
    }

    #[test]
    fn test_render_shows_entries() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = PickerState::new("Customers", entries());
        terminal
            .draw(|f| {
                Picker::new(&mut state).render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Customers"));
        assert!(text.contains("Acme Corp"));
        assert!(text.contains("Beta Inc"));
    }
}
