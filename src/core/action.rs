//! # Actions
//!
//! Everything that can happen in the console becomes an `Action`.
//! User picks a customer? That's `Action::SelectCustomer(id)`.
//! A dispatch task finishes? That's `Action::EmailDispatched { to, result }`.
//!
//! The `update()` function takes the current state and an action and mutates
//! the state accordingly. I/O never happens here; when an action requires a
//! network call, `update()` returns an `Effect` and the TUI layer spawns the
//! work, feeding the outcome back in as another action.
//!
//! ```text
//! State + Action  →  update()  →  mutated State + Effect
//! ```
//!
//! The cascading selection rules live here:
//! - selecting a customer clears the group and resets both drafts
//! - selecting a group overwrites both drafts' `to` fields (", "-joined)
//! - subject/body edits are per-channel and survive group changes

use chrono::Local;
use log::{info, warn};

use crate::core::state::{App, EmailDraft, SmsDraft};
use crate::dispatch::{DispatchError, SmsReport};

/// Email draft fields editable from the composer. `to` is deliberately
/// absent: recipient lists only come from vendor group selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailField {
    Subject,
    Body,
}

#[derive(Debug)]
pub enum Action {
    SelectCustomer(u32),
    SelectVendorGroup(u32),
    SetEmailField { field: EmailField, value: String },
    SetSmsBody(String),
    SubmitEmail,
    SubmitSms,
    /// `to` is the recipient list of the draft that was actually dispatched;
    /// the live draft may have changed while the send was in flight.
    EmailDispatched {
        to: String,
        result: Result<(), DispatchError>,
    },
    SmsDispatched(Result<SmsReport, DispatchError>),
    Quit,
}

/// Side effects `update()` asks the caller to perform.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    SendEmail(EmailDraft),
    SendSms(SmsDraft),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SelectCustomer(customer_id) => {
            let Some(customer) = app.directory.customer(customer_id) else {
                // Fail fast on unknown ids instead of carrying dangling state.
                warn!("SelectCustomer: unknown customer id {customer_id}");
                app.error = Some(format!("Unknown customer id {customer_id}"));
                return Effect::None;
            };
            let name = customer.name.clone();
            app.selected_customer = Some(customer_id);
            app.selected_group = None;
            app.email_draft = EmailDraft::default();
            app.sms_draft = SmsDraft::default();
            app.error = None;
            app.status_message = format!("Customer: {name} — select a vendor group");
            info!("Selected customer {customer_id} ({name})");
            Effect::None
        }
        Action::SelectVendorGroup(group_id) => {
            let Some(customer) = app.selected_customer() else {
                warn!("SelectVendorGroup: no customer selected");
                app.error = Some(String::from("Select a customer before a vendor group"));
                return Effect::None;
            };
            let Some(group) = customer.vendor_group(group_id) else {
                warn!(
                    "SelectVendorGroup: unknown group id {group_id} for customer {}",
                    customer.id
                );
                app.error = Some(format!("Unknown vendor group id {group_id}"));
                return Effect::None;
            };
            let name = group.name.clone();
            let emails = group.emails.join(", ");
            let phones = group.phones.join(", ");
            app.selected_group = Some(group_id);
            // Overwrite, never merge. Subject and bodies stay as typed.
            app.email_draft.to = emails;
            app.sms_draft.to = phones;
            app.error = None;
            app.status_message = format!("Recipients set from {name}");
            info!("Selected vendor group {group_id} ({name})");
            Effect::None
        }
        Action::SetEmailField { field, value } => {
            match field {
                EmailField::Subject => app.email_draft.subject = value,
                EmailField::Body => app.email_draft.body = value,
            }
            Effect::None
        }
        Action::SetSmsBody(value) => {
            app.sms_draft.body = value;
            Effect::None
        }
        Action::SubmitEmail => {
            if app.is_sending {
                app.status_message = String::from("A send is already in flight");
                return Effect::None;
            }
            app.is_sending = true;
            app.error = None;
            app.status_message = String::from("Sending email...");
            Effect::SendEmail(app.email_draft.clone())
        }
        Action::SubmitSms => {
            if app.is_sending {
                app.status_message = String::from("A send is already in flight");
                return Effect::None;
            }
            app.is_sending = true;
            app.error = None;
            app.status_message = String::from("Sending SMS...");
            Effect::SendSms(app.sms_draft.clone())
        }
        Action::EmailDispatched { to, result } => {
            app.is_sending = false;
            match result {
                Ok(()) => {
                    info!("Email dispatched to {to}");
                    app.status_message =
                        format!("[{}] Email sent to {to}", Local::now().format("%H:%M:%S"));
                }
                Err(e) => {
                    warn!("Email dispatch failed: {e}");
                    app.error = Some(format!("Email failed: {e}"));
                    app.status_message = String::from("Email failed");
                }
            }
            Effect::None
        }
        Action::SmsDispatched(result) => {
            app.is_sending = false;
            match result {
                Ok(report) => {
                    info!("SMS dispatch finished: {}", report.summary());
                    if report.all_sent() {
                        app.status_message = format!(
                            "[{}] SMS {}",
                            Local::now().format("%H:%M:%S"),
                            report.summary()
                        );
                        app.error = None;
                    } else {
                        // Partial failure: keep the per-number detail visible.
                        app.error = Some(format!("SMS incomplete: {}", report.summary()));
                        app.status_message = String::from("SMS incomplete");
                    }
                }
                Err(e) => {
                    warn!("SMS dispatch failed: {e}");
                    app.error = Some(format!("SMS failed: {e}"));
                    app.status_message = String::from("SMS failed");
                }
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_select_customer_lists_its_groups_in_order() {
        let mut app = test_app();
        update(&mut app, Action::SelectCustomer(2));
        let names: Vec<&str> = app
            .available_vendor_groups()
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Vendor Group 1", "Vendor Group 2", "Vendor Group 3"]
        );
    }

    #[test]
    fn test_select_customer_resets_drafts() {
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
        update(&mut app, Action::SetSmsBody(String::from("we are down")));

        update(&mut app, Action::SelectCustomer(2));

        assert_eq!(app.email_draft, crate::core::state::EmailDraft::default());
        assert_eq!(app.sms_draft, crate::core::state::SmsDraft::default());
        assert!(app.selected_group.is_none());
        assert_eq!(app.available_vendor_groups().len(), 3);
    }

    #[test]
    fn test_select_group_overwrites_to_fields() {
        let mut app = test_app();
        update(&mut app, Action::SelectCustomer(1));
        update(&mut app, Action::SelectVendorGroup(1));
        assert_eq!(
            app.email_draft.to,
            "vidhyabharathy65255@gmail.com, secops@acme.com"
        );
        assert_eq!(app.sms_draft.to, "+918825683746, +919843314780");

        // Switching groups overwrites rather than appends.
        update(&mut app, Action::SelectVendorGroup(2));
        assert_eq!(app.email_draft.to, "team1@acme.com, secops@acme.com");
        assert_eq!(app.sms_draft.to, "+447911123456");
    }

    #[test]
    fn test_select_group_leaves_subject_and_bodies_untouched() {
        let mut app = test_app();
        update(&mut app, Action::SelectCustomer(1));
        update(
            &mut app,
            Action::SetEmailField {
                field: EmailField::Subject,
                value: String::from("P1 incident"),
            },
        );
        update(
            &mut app,
            Action::SetEmailField {
                field: EmailField::Body,
                value: String::from("details follow"),
            },
        );
        update(&mut app, Action::SetSmsBody(String::from("check email")));

        update(&mut app, Action::SelectVendorGroup(2));

        assert_eq!(app.email_draft.subject, "P1 incident");
        assert_eq!(app.email_draft.body, "details follow");
        assert_eq!(app.sms_draft.body, "check email");
    }

    #[test]
    fn test_select_group_requires_customer() {
        let mut app = test_app();
        update(&mut app, Action::SelectVendorGroup(1));
        assert!(app.selected_group.is_none());
        assert!(app.error.is_some());
    }

    #[test]
    fn test_unknown_customer_id_is_an_error_and_a_noop() {
        let mut app = test_app();
        update(&mut app, Action::SelectCustomer(1));
        update(&mut app, Action::SelectCustomer(99));
        // Prior selection survives; the error is surfaced.
        assert_eq!(app.selected_customer, Some(1));
        assert_eq!(app.error.as_deref(), Some("Unknown customer id 99"));
    }

    #[test]
    fn test_unknown_group_id_is_an_error_and_a_noop() {
        let mut app = test_app();
        update(&mut app, Action::SelectCustomer(1));
        update(&mut app, Action::SelectVendorGroup(42));
        assert!(app.selected_group.is_none());
        assert_eq!(app.error.as_deref(), Some("Unknown vendor group id 42"));
    }

    #[test]
    fn test_group_ids_resolve_within_selected_customer_only() {
        let mut app = test_app();
        // Group id 1 exists for both customers but maps to different contacts.
        update(&mut app, Action::SelectCustomer(2));
        update(&mut app, Action::SelectVendorGroup(1));
        assert_eq!(app.email_draft.to, "team1@beta.com, secops1@beta.com");
        assert_eq!(app.sms_draft.to, "+14151234567, +919876543210");
    }

    #[test]
    fn test_submit_email_yields_send_effect_with_draft() {
        let mut app = test_app();
        update(&mut app, Action::SelectCustomer(1));
        update(&mut app, Action::SelectVendorGroup(1));
        update(
            &mut app,
            Action::SetEmailField {
                field: EmailField::Subject,
                value: String::from("s"),
            },
        );
        let effect = update(&mut app, Action::SubmitEmail);
        match effect {
            Effect::SendEmail(draft) => {
                assert_eq!(draft.subject, "s");
                assert_eq!(
                    draft.to,
                    "vidhyabharathy65255@gmail.com, secops@acme.com"
                );
            }
            other => panic!("expected SendEmail effect, got {other:?}"),
        }
        assert!(app.is_sending);
    }

    #[test]
    fn test_submit_blocked_while_sending() {
        let mut app = test_app();
        update(&mut app, Action::SubmitSms);
        assert!(app.is_sending);
        let effect = update(&mut app, Action::SubmitEmail);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_dispatch_results_clear_sending_flag() {
        let mut app = test_app();
        update(&mut app, Action::SubmitEmail);
        update(
            &mut app,
            Action::EmailDispatched {
                to: String::from("a@example.com"),
                result: Ok(()),
            },
        );
        assert!(!app.is_sending);
        assert!(app.status_message.contains("Email sent"));

        update(&mut app, Action::SubmitSms);
        update(
            &mut app,
            Action::SmsDispatched(Err(DispatchError::Validation(String::from(
                "recipient list is empty",
            )))),
        );
        assert!(!app.is_sending);
        assert!(app.error.as_deref().unwrap().contains("recipient list"));
    }

    #[test]
    fn test_email_completion_reports_dispatched_recipients() {
        let mut app = test_app();
        update(&mut app, Action::SelectCustomer(1));
        update(&mut app, Action::SelectVendorGroup(1));
        let effect = update(&mut app, Action::SubmitEmail);
        let Effect::SendEmail(draft) = effect else {
            panic!("expected SendEmail effect");
        };

        // The operator changes selection while the send is in flight,
        // which resets the live draft.
        update(&mut app, Action::SelectCustomer(2));
        assert_eq!(app.email_draft.to, "");

        update(
            &mut app,
            Action::EmailDispatched {
                to: draft.to,
                result: Ok(()),
            },
        );
        // The status names the recipients that were actually sent to.
        assert!(
            app.status_message
                .contains("vidhyabharathy65255@gmail.com, secops@acme.com")
        );
    }

    #[test]
    fn test_email_failure_surfaces_provider_text() {
        let mut app = test_app();
        update(&mut app, Action::SubmitEmail);
        update(
            &mut app,
            Action::EmailDispatched {
                to: String::from("a@example.com"),
                result: Err(DispatchError::Provider {
                    status: 422,
                    message: String::from("template not found"),
                }),
            },
        );
        let error = app.error.as_deref().unwrap();
        assert!(error.contains("422"));
        assert!(error.contains("template not found"));
    }

    #[test]
    fn test_partial_sms_failure_is_reported_with_counts() {
        use crate::dispatch::SmsOutcome;
        let mut app = test_app();
        update(&mut app, Action::SubmitSms);
        let report = SmsReport {
            outcomes: vec![
                SmsOutcome {
                    number: String::from("+1111111111"),
                    error: None,
                },
                SmsOutcome {
                    number: String::from("+2222222222"),
                    error: Some(String::from("HTTP 500")),
                },
            ],
        };
        update(&mut app, Action::SmsDispatched(Ok(report)));
        let error = app.error.as_deref().unwrap();
        assert!(error.contains("1 sent"));
        assert!(error.contains("1 failed"));
        assert!(error.contains("+2222222222"));
    }

    #[test]
    fn test_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
