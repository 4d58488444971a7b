// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error responses of the submission endpoint.
//!
//! These are the only ways a submission can fail. Notification failures
//! are not among them.

use crate::contract::FieldViolation;
use crate::metrics::SubmissionOutcome;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Submission endpoint error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LeadError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Too many requests.")]
    RateLimited { retry_after: Duration },

    #[error("{0}")]
    ValidationFailed(String),
}

impl LeadError {
    /// The body did not decode as a lead submission.
    pub fn invalid_input() -> Self {
        Self::ValidationFailed("Invalid input.".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn outcome(&self) -> SubmissionOutcome {
        match self {
            Self::MethodNotAllowed => SubmissionOutcome::MethodNotAllowed,
            Self::RateLimited { .. } => SubmissionOutcome::RateLimited,
            Self::ValidationFailed(_) => SubmissionOutcome::Invalid,
        }
    }
}

impl From<FieldViolation> for LeadError {
    fn from(violation: FieldViolation) -> Self {
        Self::ValidationFailed(violation.to_string())
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for LeadError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        match self {
            Self::RateLimited { retry_after } => {
                // Round up so clients never retry inside the window
                let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                (status, [(header::RETRY_AFTER, secs.to_string())], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
