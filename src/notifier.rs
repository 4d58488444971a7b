// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lead notification.
//!
//! A sanitized lead is rendered into an HTML email and handed to a
//! [`Transport`] exactly once. Delivery is best effort: failures are logged
//! and reported as [`NotifyOutcome::Failed`], never as an error, so a
//! provider outage cannot cost a captured lead. Without transport
//! credentials the notifier only logs the lead.

use crate::config::TransportSettings;
use crate::lead::SanitizedLead;
use anyhow::{anyhow, Context};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use url::Url;

/// Rendered notification, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Outbound delivery of a rendered notification.
pub trait Transport: Send + Sync + 'static {
    fn send(&self, notification: Notification) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// What happened to a lead's notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// No transport configured; the lead was written to the log.
    Logged,
    /// The transport accepted the notification.
    Dispatched,
    /// The single dispatch attempt failed and was logged.
    Failed,
}

impl NotifyOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logged => "logged",
            Self::Dispatched => "dispatched",
            Self::Failed => "failed",
        }
    }
}

struct Dispatch<T> {
    transport: Arc<T>,
    from: String,
    to: String,
}

/// Fail-open lead notifier.
pub struct Notifier<T> {
    dispatch: Option<Dispatch<T>>,
}

impl<T: Transport> Notifier<T> {
    /// A notifier that never dispatches.
    pub fn log_only() -> Self {
        Self { dispatch: None }
    }

    /// A notifier that dispatches through `transport` with the given addresses.
    pub fn new(transport: T, settings: &TransportSettings) -> Self {
        Self {
            dispatch: Some(Dispatch {
                transport: Arc::new(transport),
                from: settings.from.clone(),
                to: settings.to.clone(),
            }),
        }
    }

    pub fn is_log_only(&self) -> bool {
        self.dispatch.is_none()
    }

    /// Notify about a lead. Never fails.
    ///
    /// The dispatch runs on its own task, so dropping the request (a client
    /// disconnect) does not abort an attempt that is already in flight.
    pub async fn notify(&self, lead: &SanitizedLead) -> NotifyOutcome {
        let Some(dispatch) = &self.dispatch else {
            info!(
                name = %lead.name,
                email = %lead.email,
                phone = %lead.phone,
                zip = %lead.zip,
                surface_size = %lead.surface_size,
                current_surface = %lead.current_surface,
                message = %lead.message,
                "Lead received (notifications disabled)"
            );
            return NotifyOutcome::Logged;
        };

        let notification = Notification {
            from: dispatch.from.clone(),
            to: dispatch.to.clone(),
            subject: render_subject(lead),
            html: render_html(lead),
        };

        let transport = Arc::clone(&dispatch.transport);
        let attempt = tokio::spawn(async move { transport.send(notification).await });

        match attempt.await {
            Ok(Ok(())) => {
                info!(name = %lead.name, "Lead notification sent");
                NotifyOutcome::Dispatched
            }
            Ok(Err(err)) => {
                let detail = format!("{err:#}");
                error!(error = %detail, name = %lead.name, "Lead notification failed");
                NotifyOutcome::Failed
            }
            Err(err) => {
                error!(error = %err, name = %lead.name, "Lead notification task aborted");
                NotifyOutcome::Failed
            }
        }
    }
}

/// Subject line: the lead's name, plus the ZIP when there is one.
pub fn render_subject(lead: &SanitizedLead) -> String {
    if lead.zip.is_empty() {
        format!("New Lead: {}", lead.name)
    } else {
        format!("New Lead: {} ({})", lead.name, lead.zip)
    }
}

/// Render the lead as a labeled HTML table.
pub fn render_html(lead: &SanitizedLead) -> String {
    let rows = [
        ("Name", lead.name.clone()),
        ("Email", lead.email.clone()),
        ("Phone", lead.phone.clone()),
        ("ZIP", lead.zip.clone()),
        ("Surface Size", lead.surface_size.clone()),
        ("Current Surface", lead.current_surface.clone()),
        ("Message", lead.message.replace('\n', "<br/>")),
    ];

    let mut html = String::from(
        "<div style=\"font-family:ui-sans-serif,system-ui,Segoe UI,Roboto,Helvetica,Arial\">\n\
         <h2 style=\"margin:0 0 8px\">New Lead</h2>\n\
         <table style=\"border-collapse:collapse;width:100%;font-size:14px\">\n",
    );
    for (label, value) in rows {
        html.push_str(&format!(
            "<tr><td style=\"padding:8px 12px;border:1px solid #e5e7eb;font-weight:600;background:#f8fafc\">{label}</td>\
             <td style=\"padding:8px 12px;border:1px solid #e5e7eb\">{value}</td></tr>\n"
        ));
    }
    html.push_str("</table>\n</div>");
    html
}

/// Transport backed by the Resend email API.
pub struct ResendTransport {
    client: reqwest::Client,
    api_url: Url,
    api_key: String,
}

impl ResendTransport {
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let api_url = Url::parse(api_url).with_context(|| format!("invalid email API url {api_url}"))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url,
            api_key: api_key.to_string(),
        })
    }
}

impl Transport for ResendTransport {
    async fn send(&self, notification: Notification) -> anyhow::Result<()> {
        let response = self
            .client
            .post(self.api_url.clone())
            .bearer_auth(&self.api_key)
            .json(&notification)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(anyhow!("Email API error: {}", response.status()))
        }
    }
}
