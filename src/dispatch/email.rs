//! EmailJS-shaped email gateway.
//!
//! The provider takes a single POST carrying a fixed service/template/key
//! triple plus the draft fields as template params. The address list goes
//! through as one comma-joined `to_email` parameter; fan-out to individual
//! mailboxes is the provider's job.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use std::time::Duration;

use crate::core::config::ResolvedConfig;
use crate::core::state::EmailDraft;
use crate::dispatch::{DispatchError, EmailGateway};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Template parameters the provider substitutes into the configured template.
#[derive(Serialize, Debug)]
struct TemplateParams<'a> {
    to_email: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// The request body for the provider's send endpoint.
#[derive(Serialize, Debug)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

pub struct EmailJsGateway {
    base_url: String,
    service_id: String,
    template_id: String,
    public_key: String,
    client: reqwest::Client,
}

impl EmailJsGateway {
    pub fn new(base_url: String, service_id: String, template_id: String, public_key: String) -> Self {
        Self {
            base_url,
            service_id,
            template_id,
            public_key,
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.email_base_url.clone(),
            config.email_service_id.clone(),
            config.email_template_id.clone(),
            config.email_public_key.clone(),
        )
    }
}

/// All three fields are required before a send is attempted.
fn validate(draft: &EmailDraft) -> Result<(), DispatchError> {
    if draft.to.trim().is_empty() {
        return Err(DispatchError::Validation(String::from(
            "recipient list is empty — select a vendor group",
        )));
    }
    if draft.subject.trim().is_empty() {
        return Err(DispatchError::Validation(String::from("subject is empty")));
    }
    if draft.body.trim().is_empty() {
        return Err(DispatchError::Validation(String::from("message body is empty")));
    }
    Ok(())
}

#[async_trait]
impl EmailGateway for EmailJsGateway {
    fn name(&self) -> &str {
        "emailjs"
    }

    async fn send(&self, draft: &EmailDraft) -> Result<(), DispatchError> {
        validate(draft)?;

        let request = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: TemplateParams {
                to_email: &draft.to,
                subject: &draft.subject,
                message: &draft.body,
            },
        };

        info!(
            "Email send: service={}, template={}, to={}",
            self.service_id, self.template_id, draft.to
        );

        let response = self
            .client
            .post(format!("{}/api/v1.0/email/send", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        debug!("Email provider response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Email provider error: {} - {}", status, err_body);
            return Err(DispatchError::Provider {
                status,
                message: err_body,
            });
        }

        info!("Email accepted by provider");
        Ok(())
    }
}
