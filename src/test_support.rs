//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::directory::ContactDirectory;
use crate::core::state::{App, EmailDraft, SmsDraft};
use crate::dispatch::{DispatchError, EmailGateway, SmsGateway, SmsOutcome, SmsReport};

/// A no-op email gateway for tests that don't need real network calls.
pub struct NoopEmailGateway;

#[async_trait]
impl EmailGateway for NoopEmailGateway {
    fn name(&self) -> &str {
        "noop-email"
    }

    async fn send(&self, _draft: &EmailDraft) -> Result<(), DispatchError> {
        Ok(())
    }
}

/// A no-op SMS gateway that reports every number as sent.
pub struct NoopSmsGateway;

#[async_trait]
impl SmsGateway for NoopSmsGateway {
    fn name(&self) -> &str {
        "noop-sms"
    }

    async fn send(&self, draft: &SmsDraft) -> Result<SmsReport, DispatchError> {
        let outcomes = draft
            .to
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| SmsOutcome {
                number: n.to_string(),
                error: None,
            })
            .collect();
        Ok(SmsReport { outcomes })
    }
}

/// Creates a test App over the embedded directory with no-op gateways.
pub fn test_app() -> App {
    App::new(
        Arc::new(ContactDirectory::embedded()),
        Arc::new(NoopEmailGateway),
        Arc::new(NoopSmsGateway),
    )
}
