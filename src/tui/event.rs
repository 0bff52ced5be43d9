use crossterm::event::{self, Event, KeyCode, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    /// Ctrl+C - quit regardless of focus
    ForceQuit,
    /// Ctrl+K - open the customer picker overlay
    OpenCustomerPicker,
    /// Ctrl+G - open the vendor group picker overlay
    OpenGroupPicker,
    /// Ctrl+S - dispatch the active tab's draft
    Send,
    /// Tab - toggle the email/SMS composer tab
    SwitchTab,
    /// Enter
    Submit,
    Escape,
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    CursorUp,
    CursorDown,
    Resize,
}

/// Poll for an event with the given timeout.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if event::poll(timeout).unwrap_or(false) {
        // A failed read is treated like no event, same as a failed poll
        let Ok(raw_event) = event::read() else {
            return None;
        };
        match raw_event {
            Event::Key(key_event) => {
                log::debug!(
                    "Key event: {:?} with modifiers {:?}",
                    key_event.code,
                    key_event.modifiers
                );
                match (key_event.modifiers, key_event.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                    (KeyModifiers::CONTROL, KeyCode::Char('k')) => {
                        Some(TuiEvent::OpenCustomerPicker)
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('g')) => Some(TuiEvent::OpenGroupPicker),
                    (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(TuiEvent::Send),
                    (_, KeyCode::Tab) => Some(TuiEvent::SwitchTab),
                    (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                    (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                    (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                    (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                    (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                    (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                    _ => None,
                }
            }
            Event::Paste(data) => Some(TuiEvent::Paste(data)),
            Event::Resize(_, _) => Some(TuiEvent::Resize),
            _ => None,
        }
    } else {
        None
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}
