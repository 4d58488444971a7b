// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the lead intake service.
//!
//! A submission runs through client identification, rate limiting, decoding,
//! validation, sanitizing and notification, stopping at the first failure.
//! Once a lead passes validation the response is success, whatever happens
//! to its notification.

use crate::client::ClientId;
use crate::config::Config;
use crate::contract::FieldViolation;
use crate::error::LeadError;
use crate::lead::LeadSubmission;
use crate::limiter::{RateLimitResult, RateLimiter};
use crate::metrics::{Metrics, SubmissionOutcome};
use crate::notifier::{Notifier, NotifyOutcome, Transport};
use crate::sanitizer::sanitize;
use crate::validator::{LeadValidator, ValidationResult};
use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Path of the submission endpoint.
pub const LEAD_PATH: &str = "/api/lead";

/// Shared application state.
pub struct AppState<T> {
    pub limiter: RateLimiter,
    pub validator: LeadValidator,
    pub notifier: Notifier<T>,
    pub metrics: Metrics,
    pub config: Config,
}

/// Success response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub notifications: &'static str,
}

/// Build the service router.
pub fn router<T: Transport>(state: Arc<AppState<T>>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::<T>))
        .route("/healthz", get(health::<T>))
        .route(
            LEAD_PATH,
            post(submit_lead::<T>).fallback(method_not_allowed::<T>),
        );

    if state.config.metrics.enabled {
        router = router.route(&state.config.metrics.path, get(metrics::<T>));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Health check endpoint.
pub async fn health<T: Transport>(State(state): State<Arc<AppState<T>>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "lead-intake",
        version: env!("CARGO_PKG_VERSION"),
        notifications: if state.notifier.is_log_only() {
            "log-only"
        } else {
            "enabled"
        },
    })
}

/// Prometheus scrape endpoint.
pub async fn metrics<T: Transport>(State(state): State<Arc<AppState<T>>>) -> Response {
    match state.metrics.render() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Any method other than POST on the submission path.
pub async fn method_not_allowed<T: Transport>(State(state): State<Arc<AppState<T>>>) -> Response {
    let err = LeadError::MethodNotAllowed;
    state.metrics.record_submission(err.outcome());
    err.into_response()
}

/// Accept a lead submission.
pub async fn submit_lead<T: Transport>(
    State(state): State<Arc<AppState<T>>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let client = ClientId::from_request(&headers, connect_info.map(|ConnectInfo(addr)| addr));

    match process_submission(&state, &client, &body).await {
        Ok(outcome) => {
            state.metrics.record_submission(SubmissionOutcome::Accepted);
            debug!(%client, notification = outcome.as_str(), "Lead accepted");
            (StatusCode::OK, Json(OkResponse { ok: true })).into_response()
        }
        Err(err) => {
            state.metrics.record_submission(err.outcome());
            err.into_response()
        }
    }
}

async fn process_submission<T: Transport>(
    state: &AppState<T>,
    client: &ClientId,
    body: &[u8],
) -> Result<NotifyOutcome, LeadError> {
    if let RateLimitResult::Limited { retry_after } = state.limiter.check(client).await {
        info!(
            %client,
            retry_after_secs = retry_after.as_secs(),
            "Submission rate limited"
        );
        return Err(LeadError::RateLimited { retry_after });
    }

    let submission: LeadSubmission = serde_json::from_slice(body).map_err(|err| {
        info!(%client, error = %err, "Submission body rejected");
        LeadError::invalid_input()
    })?;

    if let ValidationResult::Invalid(violation) = state.validator.validate(&submission) {
        if violation == FieldViolation::HoneypotFilled {
            warn!(%client, "Honeypot field filled, dropping submission");
        } else {
            info!(%client, field = %violation.field(), error = %violation, "Validation failed");
        }
        return Err(violation.into());
    }

    let lead = sanitize(&submission);
    let outcome = state.notifier.notify(&lead).await;
    state.metrics.record_notification(outcome);

    Ok(outcome)
}
