// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus counters for submissions and notifications.

use crate::notifier::NotifyOutcome;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// How a submission request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    RateLimited,
    Invalid,
    MethodNotAllowed,
}

impl SubmissionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::RateLimited => "rate_limited",
            Self::Invalid => "invalid",
            Self::MethodNotAllowed => "method_not_allowed",
        }
    }
}

/// Service metrics, registered on a private registry.
pub struct Metrics {
    registry: Registry,
    submissions: IntCounterVec,
    notifications: IntCounterVec,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let submissions = IntCounterVec::new(
            Opts::new("lead_submissions_total", "Lead submissions by outcome"),
            &["outcome"],
        )?;
        let notifications = IntCounterVec::new(
            Opts::new("lead_notifications_total", "Lead notifications by result"),
            &["result"],
        )?;

        registry.register(Box::new(submissions.clone()))?;
        registry.register(Box::new(notifications.clone()))?;

        Ok(Self {
            registry,
            submissions,
            notifications,
        })
    }

    pub fn record_submission(&self, outcome: SubmissionOutcome) {
        self.submissions.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn record_notification(&self, outcome: NotifyOutcome) {
        self.notifications.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn submissions(&self, outcome: SubmissionOutcome) -> u64 {
        self.submissions.with_label_values(&[outcome.as_str()]).get()
    }

    pub fn notifications(&self, outcome: NotifyOutcome) -> u64 {
        self.notifications.with_label_values(&[outcome.as_str()]).get()
    }

    /// Render all metrics in the Prometheus text format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
