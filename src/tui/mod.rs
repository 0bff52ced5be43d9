//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event loop
//!
//! The loop draws only when something changed, polls the terminal with a
//! short timeout, and drains all pending events before the next draw.
//! Dispatch work runs on spawned tokio tasks; results come back over an
//! `std::sync::mpsc` channel as Actions, so all state mutation stays on this
//! one thread and a customer-change reset can never interleave with a
//! group-selection event.

pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, EmailField, update};
use crate::core::config::ResolvedConfig;
use crate::core::directory::ContactDirectory;
use crate::core::state::{App, EmailDraft, SmsDraft};
use crate::dispatch::{EmailGateway, EmailJsGateway, SmsGateway, SmsRelayGateway};
use crate::tui::components::{
    Channel, ComposerState, FocusField, PickerEntry, PickerEvent, PickerState, apply_edit,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which overlay picker is open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Customer,
    VendorGroup,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub composer: ComposerState,
    /// Overlay picker (None = hidden)
    pub picker: Option<(PickerKind, PickerState)>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            composer: ComposerState::new(),
            picker: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

fn customer_picker(directory: &ContactDirectory) -> PickerState {
    let entries = directory
        .customers()
        .iter()
        .map(|c| PickerEntry {
            id: c.id,
            name: c.name.clone(),
            detail: format!("{} groups", c.vendor_groups.len()),
        })
        .collect();
    PickerState::new("Customers", entries)
}

fn group_picker(app: &App) -> PickerState {
    let entries = app
        .available_vendor_groups()
        .iter()
        .map(|g| PickerEntry {
            id: g.id,
            name: g.name.clone(),
            detail: format!("{} emails · {} phones", g.emails.len(), g.phones.len()),
        })
        .collect();
    PickerState::new("Vendor Groups", entries)
}

pub fn run(config: ResolvedConfig, directory: Arc<ContactDirectory>) -> std::io::Result<()> {
    let email_gateway: Arc<dyn EmailGateway> = Arc::new(EmailJsGateway::from_config(&config));
    let sms_gateway: Arc<dyn SmsGateway> = Arc::new(SmsRelayGateway::from_config(&config));
    let mut app = App::new(directory, email_gateway, sms_gateway);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background dispatch tasks
    let (tx, rx) = mpsc::channel();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // ForceQuit (Ctrl+C) always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // When a picker is open, route all events to it
            if let Some((kind, picker)) = tui.picker.as_mut() {
                if let Some(picker_event) = picker.handle_event(&event) {
                    match picker_event {
                        PickerEvent::Select(id) => {
                            let action = match kind {
                                PickerKind::Customer => Action::SelectCustomer(id),
                                PickerKind::VendorGroup => Action::SelectVendorGroup(id),
                            };
                            let effect = update(&mut app, action);
                            handle_effect(effect, &app, &tx, &mut should_quit);
                            tui.picker = None;
                        }
                        PickerEvent::Dismiss => {
                            tui.picker = None;
                        }
                    }
                }
                continue;
            }

            match event {
                TuiEvent::OpenCustomerPicker => {
                    tui.picker = Some((PickerKind::Customer, customer_picker(&app.directory)));
                }
                TuiEvent::OpenGroupPicker => {
                    if app.selected_customer.is_none() {
                        app.error = Some(String::from("Select a customer before a vendor group"));
                    } else {
                        tui.picker = Some((PickerKind::VendorGroup, group_picker(&app)));
                    }
                }
                TuiEvent::SwitchTab => {
                    // Pure presentation: drafts are untouched
                    tui.composer.switch_tab();
                }
                TuiEvent::Send => {
                    let action = match tui.composer.active_tab {
                        Channel::Email => Action::SubmitEmail,
                        Channel::Sms => Action::SubmitSms,
                    };
                    let effect = update(&mut app, action);
                    handle_effect(effect, &app, &tx, &mut should_quit);
                }
                TuiEvent::CursorUp => tui.composer.focus_up(),
                TuiEvent::CursorDown => tui.composer.focus_down(),
                TuiEvent::Escape => {}
                ref edit_event => {
                    if let Some(action) = edit_action(&app, &tui.composer, edit_event) {
                        let effect = update(&mut app, action);
                        handle_effect(effect, &app, &tx, &mut should_quit);
                    } else if matches!(edit_event, TuiEvent::Submit)
                        && tui.composer.active_tab == Channel::Email
                        && tui.composer.focus == FocusField::Subject
                    {
                        // Enter in the subject row moves down to the body
                        tui.composer.focus_down();
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (dispatch results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            handle_effect(effect, &app, &tx, &mut should_quit);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Translate an editing key into a whole-field update for the focused field.
fn edit_action(app: &App, composer: &ComposerState, event: &TuiEvent) -> Option<Action> {
    match (composer.active_tab, composer.focus) {
        (Channel::Email, FocusField::Subject) => {
            apply_edit(&app.email_draft.subject, event, false).map(|value| {
                Action::SetEmailField {
                    field: EmailField::Subject,
                    value,
                }
            })
        }
        (Channel::Email, FocusField::Body) => {
            apply_edit(&app.email_draft.body, event, true).map(|value| Action::SetEmailField {
                field: EmailField::Body,
                value,
            })
        }
        (Channel::Sms, _) => apply_edit(&app.sms_draft.body, event, true).map(Action::SetSmsBody),
    }
}

fn handle_effect(effect: Effect, app: &App, tx: &mpsc::Sender<Action>, should_quit: &mut bool) {
    match effect {
        Effect::Quit => *should_quit = true,
        Effect::SendEmail(draft) => spawn_email(app.email_gateway.clone(), draft, tx.clone()),
        Effect::SendSms(draft) => spawn_sms(app.sms_gateway.clone(), draft, tx.clone()),
        Effect::None => {}
    }
}

fn spawn_email(gateway: Arc<dyn EmailGateway>, draft: EmailDraft, tx: mpsc::Sender<Action>) {
    info!("Spawning email dispatch via {}", gateway.name());
    tokio::spawn(async move {
        let result = gateway.send(&draft).await;
        let action = Action::EmailDispatched {
            to: draft.to,
            result,
        };
        if tx.send(action).is_err() {
            warn!("Failed to send email dispatch result: receiver dropped");
        }
    });
}

fn spawn_sms(gateway: Arc<dyn SmsGateway>, draft: SmsDraft, tx: mpsc::Sender<Action>) {
    info!("Spawning SMS dispatch via {}", gateway.name());
    tokio::spawn(async move {
        let result = gateway.send(&draft).await;
        if tx.send(Action::SmsDispatched(result)).is_err() {
            warn!("Failed to send SMS dispatch result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_customer_picker_lists_directory_entries() {
        let app = test_app();
        let picker = customer_picker(&app.directory);
        let names: Vec<&str> = picker.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Corp", "Beta Inc"]);
        assert_eq!(picker.entries[1].detail, "3 groups");
    }

    #[test]
    fn test_group_picker_scoped_to_selected_customer() {
        let mut app = test_app();
        update(&mut app, Action::SelectCustomer(1));
        let picker = group_picker(&app);
        assert_eq!(picker.entries.len(), 2);
        assert_eq!(picker.entries[0].detail, "2 emails · 2 phones");
    }

    #[test]
    fn test_group_picker_empty_without_customer() {
        let app = test_app();
        assert!(group_picker(&app).entries.is_empty());
    }

    #[test]
    fn test_edit_action_targets_focused_field() {
        let app = test_app();
        let mut composer = ComposerState::new();

        let action = edit_action(&app, &composer, &TuiEvent::InputChar('x'));
        assert!(matches!(
            action,
            Some(Action::SetEmailField {
                field: EmailField::Subject,
                ..
            })
        ));

        composer.focus_down();
        let action = edit_action(&app, &composer, &TuiEvent::InputChar('x'));
        assert!(matches!(
            action,
            Some(Action::SetEmailField {
                field: EmailField::Body,
                ..
            })
        ));

        composer.switch_tab();
        let action = edit_action(&app, &composer, &TuiEvent::InputChar('x'));
        assert!(matches!(action, Some(Action::SetSmsBody(_))));
    }

    #[test]
    fn test_switching_tabs_never_mutates_drafts() {
        let mut app = test_app();
        update(&mut app, Action::SelectCustomer(1));
        update(&mut app, Action::SelectVendorGroup(1));
        update(
            &mut app,
            Action::SetEmailField {
                field: EmailField::Subject,
                value: String::from("Outage"),
            },
        );
        let email_before = app.email_draft.clone();
        let sms_before = app.sms_draft.clone();

        let mut tui = TuiState::new();
        tui.composer.switch_tab();
        tui.composer.switch_tab();

        assert_eq!(app.email_draft, email_before);
        assert_eq!(app.sms_draft, sms_before);
    }

    #[test]
    fn test_edit_action_ignores_non_edit_events() {
        let app = test_app();
        let composer = ComposerState::new();
        assert!(edit_action(&app, &composer, &TuiEvent::Escape).is_none());
        // Enter in the single-line subject row is not an edit
        assert!(edit_action(&app, &composer, &TuiEvent::Submit).is_none());
    }
}
