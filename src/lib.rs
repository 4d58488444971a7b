// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lead Intake
//!
//! This crate provides the lead-capture pipeline of a business website:
//!
//! - Per-client fixed-window rate limiting (5 submissions per minute)
//! - Field validation shared by the server and the form client
//! - Sanitizing of free text (escaped angle brackets, links removed)
//! - Honeypot spam rejection
//! - Fail-open email notification with a log-only fallback
//! - A form state machine and HTTP client for the submission endpoint

pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod form;
pub mod handlers;
pub mod lead;
pub mod limiter;
pub mod metrics;
pub mod notifier;
pub mod sanitizer;
pub mod validator;

pub use config::Config;
pub use error::LeadError;
pub use handlers::{router, AppState};
pub use lead::{LeadSubmission, SanitizedLead};
pub use limiter::{RateLimitResult, RateLimiter};
pub use notifier::{Notifier, NotifyOutcome, Transport};
pub use validator::{LeadValidator, ValidationResult};
