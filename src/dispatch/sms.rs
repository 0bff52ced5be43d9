//! SMS relay gateway.
//!
//! The relay accepts one number per POST, so a draft addressed to several
//! numbers becomes a sequential loop of independent requests. Total latency
//! scales linearly with recipient count.
//!
//! Each number gets its own recorded outcome: a non-2xx status or a network
//! error marks that number failed and the loop moves on. The caller receives
//! an aggregate [`SmsReport`] rather than an all-or-nothing signal, so a
//! partial delivery is visible as exactly that.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use std::time::Duration;

use crate::core::config::ResolvedConfig;
use crate::core::state::SmsDraft;
use crate::dispatch::{DispatchError, SmsGateway};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The request body for the relay's send endpoint, one number at a time.
#[derive(Serialize, Debug)]
struct RelayRequest<'a> {
    to: &'a str,
    message: &'a str,
}

/// Outcome for a single phone number. `error` is None on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsOutcome {
    pub number: String,
    pub error: Option<String>,
}

/// Aggregate result of one SMS dispatch across all recipient numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsReport {
    pub outcomes: Vec<SmsOutcome>,
}

impl SmsReport {
    pub fn sent(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_none()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.sent()
    }

    pub fn all_sent(&self) -> bool {
        self.failed() == 0
    }

    /// One-line summary for the status bar, naming the first failed number.
    pub fn summary(&self) -> String {
        if self.all_sent() {
            format!("{} sent", self.sent())
        } else {
            let first_failed = self
                .outcomes
                .iter()
                .find(|o| o.error.is_some())
                .map(|o| o.number.as_str())
                .unwrap_or("?");
            format!(
                "{} sent, {} failed (first: {})",
                self.sent(),
                self.failed(),
                first_failed
            )
        }
    }
}

pub struct SmsRelayGateway {
    base_url: String,
    client: reqwest::Client,
}

impl SmsRelayGateway {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.sms_base_url.clone())
    }

    /// POST one message to one number. Returns the failure text, if any.
    async fn send_one(&self, number: &str, message: &str) -> Option<String> {
        let request = RelayRequest { to: number, message };
        let response = self
            .client
            .post(format!("{}/send-sms", self.base_url))
            .json(&request)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                debug!("SMS accepted for {number}");
                None
            }
            Ok(response) => {
                let status = response.status().as_u16();
                warn!("SMS relay rejected {number}: HTTP {status}");
                Some(format!("HTTP {status}"))
            }
            Err(e) => {
                warn!("SMS transport failure for {number}: {e}");
                Some(e.to_string())
            }
        }
    }
}

/// Split a comma-joined recipient string into trimmed numbers, dropping
/// empty tokens (e.g. a trailing comma).
fn split_numbers(to: &str) -> Vec<&str> {
    to.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect()
}

fn validate(draft: &SmsDraft) -> Result<(), DispatchError> {
    if split_numbers(&draft.to).is_empty() {
        return Err(DispatchError::Validation(String::from(
            "recipient list is empty — select a vendor group",
        )));
    }
    if draft.body.trim().is_empty() {
        return Err(DispatchError::Validation(String::from("message body is empty")));
    }
    Ok(())
}

#[async_trait]
impl SmsGateway for SmsRelayGateway {
    fn name(&self) -> &str {
        "sms-relay"
    }

    async fn send(&self, draft: &SmsDraft) -> Result<SmsReport, DispatchError> {
        validate(draft)?;

        let numbers = split_numbers(&draft.to);
        info!("SMS send: {} recipient(s)", numbers.len());

        // Sequential by design: one request at a time, each awaited in turn.
        let mut outcomes = Vec::with_capacity(numbers.len());
        for number in numbers {
            let error = self.send_one(number, &draft.body).await;
            outcomes.push(SmsOutcome {
                number: number.to_string(),
                error,
            });
        }

        let report = SmsReport { outcomes };
        info!("SMS dispatch finished: {}", report.summary());
        Ok(report)
    }
}
