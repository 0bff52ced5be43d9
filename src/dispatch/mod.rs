//! # Dispatch Gateways
//!
//! Outbound delivery of finalized drafts. Two independent seams, each behind
//! a trait so the TUI and tests can swap in doubles:
//!
//! - [`EmailGateway`]: one provider call per email send
//! - [`SmsGateway`]: one relay POST per phone number, sequential, with a
//!   per-number outcome collected into an [`SmsReport`]
//!
//! Every send is fire-once: no retries, no idempotency keys, no cancellation
//! once a request is on the wire.

pub mod email;
pub mod sms;

pub use email::EmailJsGateway;
pub use sms::{SmsRelayGateway, SmsReport, SmsOutcome};

use std::fmt;

use async_trait::async_trait;

use crate::core::state::{EmailDraft, SmsDraft};

/// Errors that can occur while dispatching a draft.
#[derive(Debug)]
pub enum DispatchError {
    /// A required draft field was empty. No network call was made.
    Validation(String),
    /// The delivery provider rejected or failed the request.
    Provider { status: u16, message: String },
    /// Network-level failure (timeout, DNS, connection refused).
    Transport(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Validation(msg) => write!(f, "validation error: {msg}"),
            DispatchError::Provider { status, message } => {
                write!(f, "provider error (HTTP {status}): {message}")
            }
            DispatchError::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for DispatchError {}

#[async_trait]
pub trait EmailGateway: Send + Sync {
    /// Returns the name of the gateway.
    fn name(&self) -> &str;

    /// Dispatch a finalized email draft. Validates `to`, `subject`, and
    /// `body` are non-empty before any network call.
    async fn send(&self, draft: &EmailDraft) -> Result<(), DispatchError>;
}

#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Returns the name of the gateway.
    fn name(&self) -> &str;

    /// Dispatch a finalized SMS draft to each number in its `to` list,
    /// sequentially. Validates `to` and `body` are non-empty before any
    /// network call. Per-number failures do not abort the loop.
    async fn send(&self, draft: &SmsDraft) -> Result<SmsReport, DispatchError>;
}
