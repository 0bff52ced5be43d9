//! # Application State
//!
//! Core business state for the incident console. This module contains domain
//! logic only - no TUI-specific types. Presentation state lives in the `tui`
//! module.
//!
//! ```text
//! App
//! ├── directory: Arc<ContactDirectory>   // immutable lookup table
//! ├── email_gateway: Arc<dyn EmailGateway>
//! ├── sms_gateway: Arc<dyn SmsGateway>
//! ├── selected_customer: Option<u32>     // customer id
//! ├── selected_group: Option<u32>        // group id, scoped to customer
//! ├── email_draft: EmailDraft            // to/subject/body
//! ├── sms_draft: SmsDraft                // to/body
//! ├── status_message: String             // status bar text
//! ├── error: Option<String>              // last error, if any
//! └── is_sending: bool                   // a dispatch is in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::directory::{ContactDirectory, Customer, VendorGroup};
use crate::dispatch::{EmailGateway, SmsGateway};
use std::sync::Arc;

/// An in-progress email prior to dispatch. `to` holds comma-joined addresses
/// and is only ever written by group selection or the customer-change reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// An in-progress SMS prior to dispatch. `to` holds comma-joined numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsDraft {
    pub to: String,
    pub body: String,
}

pub struct App {
    pub directory: Arc<ContactDirectory>,
    pub email_gateway: Arc<dyn EmailGateway>,
    pub sms_gateway: Arc<dyn SmsGateway>,
    pub selected_customer: Option<u32>,
    pub selected_group: Option<u32>,
    pub email_draft: EmailDraft,
    pub sms_draft: SmsDraft,
    pub status_message: String,
    pub error: Option<String>,
    pub is_sending: bool,
}

impl App {
    pub fn new(
        directory: Arc<ContactDirectory>,
        email_gateway: Arc<dyn EmailGateway>,
        sms_gateway: Arc<dyn SmsGateway>,
    ) -> Self {
        Self {
            directory,
            email_gateway,
            sms_gateway,
            selected_customer: None,
            selected_group: None,
            email_draft: EmailDraft::default(),
            sms_draft: SmsDraft::default(),
            status_message: String::from("Select a customer to begin"),
            error: None,
            is_sending: false,
        }
    }

    /// The currently selected customer, if any.
    pub fn selected_customer(&self) -> Option<&Customer> {
        self.selected_customer
            .and_then(|id| self.directory.customer(id))
    }

    /// The currently selected vendor group, scoped to the selected customer.
    pub fn selected_group(&self) -> Option<&VendorGroup> {
        let customer = self.selected_customer()?;
        self.selected_group.and_then(|id| customer.vendor_group(id))
    }

    /// The selected customer's vendor groups in directory order, or an empty
    /// slice when no customer is selected.
    pub fn available_vendor_groups(&self) -> &[VendorGroup] {
        self.selected_customer()
            .map(|c| c.vendor_groups.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.selected_customer.is_none());
        assert!(app.selected_group.is_none());
        assert!(app.available_vendor_groups().is_empty());
        assert!(!app.is_sending);
        assert_eq!(app.status_message, "Select a customer to begin");
    }

    #[test]
    fn test_drafts_start_empty() {
        let app = test_app();
        assert!(app.email_draft.to.is_empty());
        assert!(app.email_draft.subject.is_empty());
        assert!(app.email_draft.body.is_empty());
        assert!(app.sms_draft.to.is_empty());
        assert!(app.sms_draft.body.is_empty());
    }
}
