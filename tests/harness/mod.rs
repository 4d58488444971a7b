// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test harness for the lead intake service.
//!
//! Builds the real router around a recording transport and provides
//! generators, attack patterns and outcome metrics for abuse simulation.

#![allow(dead_code)]

pub mod attacks;
pub mod generators;
pub mod metrics;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lead_intake::{
    config::{Config, RateLimitConfig, TransportSettings},
    handlers::{router, AppState},
    limiter::RateLimiter,
    metrics::Metrics,
    notifier::{Notification, Notifier, Transport},
    validator::LeadValidator,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Transport double that records every notification it is handed.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<Notification>>>,
    fail: bool,
}

impl RecordingTransport {
    /// A transport whose every send fails, like a provider outage.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, notification: Notification) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(notification);
        if self.fail {
            anyhow::bail!("provider unavailable");
        }
        Ok(())
    }
}

pub fn transport_settings() -> TransportSettings {
    TransportSettings {
        api_key: "re_test".to_string(),
        from: "leads@example.com".to_string(),
        to: "owner@example.com".to_string(),
    }
}

/// Build the app. `None` runs the notifier in log-only mode.
pub fn test_app(
    transport: Option<RecordingTransport>,
    rate_limit: RateLimitConfig,
) -> (Router, Arc<AppState<RecordingTransport>>) {
    let notifier = match transport {
        Some(transport) => Notifier::new(transport, &transport_settings()),
        None => Notifier::log_only(),
    };

    let state = Arc::new(AppState {
        limiter: RateLimiter::new(rate_limit.clone()),
        validator: LeadValidator::new(),
        notifier,
        metrics: Metrics::new().unwrap(),
        config: Config {
            rate_limit,
            ..Default::default()
        },
    });

    (router(Arc::clone(&state)), state)
}

/// Default app with a recording transport.
pub fn default_app() -> (Router, Arc<AppState<RecordingTransport>>, RecordingTransport) {
    let transport = RecordingTransport::default();
    let (app, state) = test_app(Some(transport.clone()), RateLimitConfig::default());
    (app, state, transport)
}

/// Send a request and return the status and the decoded JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// POST a raw body to the lead endpoint as `client`.
pub async fn post_raw(app: &Router, client: Option<&str>, body: impl Into<Body>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/lead")
        .header("content-type", "application/json");
    if let Some(client) = client {
        builder = builder.header("x-forwarded-for", client);
    }
    send(app, builder.body(body.into()).unwrap()).await
}

/// POST a JSON lead to the lead endpoint as `client`.
pub async fn post_lead(app: &Router, client: &str, lead: &Value) -> (StatusCode, Value) {
    post_raw(app, Some(client), lead.to_string()).await
}
