// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Client side of lead capture.
//!
//! [`LeadForm`] holds what the visitor typed and walks the submission state
//! machine:
//!
//! ```text
//! idle ──submit (all required fields valid)──▶ submitting ──ok──▶ success
//!   ▲                                              │
//!   └──────── edit any field ◀── error ◀──failure──┘
//! ```
//!
//! Field checks go through the same [`crate::contract`] rules the server
//! uses. [`LeadClient`] drives the form against a running endpoint.

use crate::contract::{Field, FieldViolation};
use crate::handlers::LEAD_PATH;
use crate::lead::LeadSubmission;
use crate::validator::{FieldErrors, LeadValidator, ValidationResult};
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const SUCCESS_STATUS: &str = "Success! Redirecting…";
pub const GENERIC_FAILURE_STATUS: &str = "Something went wrong. Try again.";
pub const NETWORK_FAILURE_STATUS: &str = "Network error. Please try again.";

/// Which optional inputs the form shows, and where it goes on success.
#[derive(Debug, Clone)]
pub struct FormConfig {
    pub show_zip: bool,
    pub show_surface_size: bool,
    pub show_current_surface: bool,
    pub thanks_url: String,
    /// Pause between showing the success status and navigating, so screen
    /// readers get to announce it.
    pub redirect_delay: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            show_zip: true,
            show_surface_size: false,
            show_current_surface: false,
            thanks_url: "/thanks".to_string(),
            redirect_delay: Duration::from_millis(200),
        }
    }
}

/// Submission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success,
    Error,
}

/// How the endpoint answered a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResponse {
    Accepted,
    Rejected { message: Option<String> },
    NetworkError,
}

/// Why a submit action did not send a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("a submission is already in progress")]
    Pending,
    #[error("the lead was already submitted")]
    Completed,
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),
}

/// Navigation scheduled after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub url: String,
    pub after: Duration,
}

impl Redirect {
    /// Wait out the delay and return the destination.
    pub async fn follow(self) -> String {
        tokio::time::sleep(self.after).await;
        self.url
    }
}

/// Lead form state.
#[derive(Debug, Clone)]
pub struct LeadForm {
    config: FormConfig,
    validator: LeadValidator,
    values: LeadSubmission,
    errors: FieldErrors,
    state: FormState,
    status: String,
}

impl LeadForm {
    pub fn new(config: FormConfig) -> Self {
        let mut values = LeadSubmission::default();
        for field in Field::ALL {
            values.set(field, "");
        }

        Self {
            config,
            validator: LeadValidator::new(),
            values,
            errors: FieldErrors::new(),
            state: FormState::Idle,
            status: String::new(),
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// The live status line (success, server error, or network error).
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field).unwrap_or("")
    }

    pub fn error(&self, field: Field) -> Option<&FieldViolation> {
        self.errors.get(&field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The submit control is disabled while a request is pending.
    pub fn is_submit_disabled(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn is_visible(&self, field: Field) -> bool {
        match field {
            Field::Zip => self.config.show_zip,
            Field::SurfaceSize => self.config.show_surface_size,
            Field::CurrentSurface => self.config.show_current_surface,
            _ => true,
        }
    }

    /// Fields checked on submit: the required ones, plus ZIP when shown.
    pub fn submit_fields(&self) -> Vec<Field> {
        let mut fields = Field::REQUIRED.to_vec();
        if self.config.show_zip {
            fields.push(Field::Zip);
        }
        fields
    }

    /// Record an edit. Clears a visible error status.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        if self.state == FormState::Error {
            self.state = FormState::Idle;
            self.status.clear();
        }
    }

    /// Check one field when it loses focus.
    pub fn blur(&mut self, field: Field) -> Option<FieldViolation> {
        match self.validator.validate_field(field, self.values.get(field)) {
            ValidationResult::Valid => {
                self.errors.remove(&field);
                None
            }
            ValidationResult::Invalid(violation) => {
                self.errors.insert(field, violation);
                Some(violation)
            }
        }
    }

    /// Start a submission.
    ///
    /// Validates every submit field; on success moves to `Submitting` and
    /// returns the body to send. Nothing is sent while a request is pending
    /// or after the lead went through.
    pub fn begin_submit(&mut self) -> Result<LeadSubmission, SubmitBlocked> {
        match self.state {
            FormState::Submitting => return Err(SubmitBlocked::Pending),
            FormState::Success => return Err(SubmitBlocked::Completed),
            FormState::Idle | FormState::Error => {}
        }

        self.errors = self.validator.validate_all(&self.values, &self.submit_fields());
        if !self.errors.is_empty() {
            debug!(count = self.errors.len(), "Submit blocked by field errors");
            return Err(SubmitBlocked::Invalid(self.errors.clone()));
        }

        self.state = FormState::Submitting;
        self.status.clear();
        Ok(self.values.clone())
    }

    /// Give up on a pending submission without an answer.
    ///
    /// The form returns to `Idle` with its values intact, so the visitor can
    /// submit again. Does nothing outside of a submission.
    pub fn abandon(&mut self) {
        if self.state == FormState::Submitting {
            debug!("Pending submission abandoned");
            self.state = FormState::Idle;
            self.status.clear();
        }
    }

    /// Apply the endpoint's answer. Returns the redirect to perform on success.
    ///
    /// Entered values are kept on failure so the visitor can fix and retry.
    pub fn finish(&mut self, response: SubmitResponse) -> Option<Redirect> {
        if self.state != FormState::Submitting {
            debug!(state = ?self.state, "Ignoring response outside of a submission");
            return None;
        }

        match response {
            SubmitResponse::Accepted => {
                self.state = FormState::Success;
                self.status = SUCCESS_STATUS.to_string();
                Some(Redirect {
                    url: self.config.thanks_url.clone(),
                    after: self.config.redirect_delay,
                })
            }
            SubmitResponse::Rejected { message } => {
                self.state = FormState::Error;
                self.status = message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE_STATUS.to_string());
                None
            }
            SubmitResponse::NetworkError => {
                self.state = FormState::Error;
                self.status = NETWORK_FAILURE_STATUS.to_string();
                None
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Reply {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the submission endpoint.
pub struct LeadClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl LeadClient {
    /// Client for the endpoint under `base_url` (e.g. `https://example.com`).
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid base url {base_url}"))?;
        let endpoint = base.join(LEAD_PATH).context("failed to build lead endpoint url")?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one submission and classify the answer.
    pub async fn post(&self, lead: &LeadSubmission) -> SubmitResponse {
        let response = match self.http.post(self.endpoint.clone()).json(lead).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "Lead submission request failed");
                return SubmitResponse::NetworkError;
            }
        };

        let success = response.status().is_success();
        let reply: Reply = response.json().await.unwrap_or_default();

        if success && reply.ok {
            SubmitResponse::Accepted
        } else {
            SubmitResponse::Rejected {
                message: reply.error,
            }
        }
    }

    /// Run one submit action on `form`: validate, send once, update state.
    ///
    /// Dropping the returned future mid-request abandons the submission, so
    /// the submit control is enabled again.
    pub async fn submit(&self, form: &mut LeadForm) -> Result<Option<Redirect>, SubmitBlocked> {
        let payload = form.begin_submit()?;
        let mut pending = PendingSubmit(form);
        let response = self.post(&payload).await;
        Ok(pending.0.finish(response))
    }
}

/// A form in `Submitting`; abandons the submission if dropped unfinished.
struct PendingSubmit<'a>(&'a mut LeadForm);

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        self.0.abandon();
    }
}
