// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Abuse simulation patterns for security testing.

use std::time::Duration;

/// What kind of body each simulated request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Valid,
    Honeypot,
    Injection,
    MissingFields,
}

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of requests to send
    pub total_requests: usize,
    /// Requests per second rate
    pub requests_per_second: f64,
    /// Number of unique client addresses to simulate
    pub unique_ips: usize,
    /// Body of every request
    pub payload: Payload,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            requests_per_second: 10.0,
            unique_ips: 1,
            payload: Payload::Valid,
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Single client flood - one address hammering the form.
    pub fn single_ip_flood() -> Self {
        Self {
            total_requests: 200,
            requests_per_second: 100.0,
            unique_ips: 1,
            ..Default::default()
        }
    }

    /// Distributed flood - many addresses, a few requests each.
    pub fn distributed_attack() -> Self {
        Self {
            total_requests: 300,
            requests_per_second: 50.0,
            unique_ips: 100,
            ..Default::default()
        }
    }

    /// Form-filling bot that also fills the hidden field.
    pub fn honeypot_spam() -> Self {
        Self {
            total_requests: 50,
            requests_per_second: 10.0,
            unique_ips: 50,
            payload: Payload::Honeypot,
        }
    }

    /// Markup and links in the message.
    pub fn injection_attempt() -> Self {
        Self {
            total_requests: 20,
            requests_per_second: 10.0,
            unique_ips: 20,
            payload: Payload::Injection,
        }
    }

    /// Empty bodies from many addresses.
    pub fn missing_fields_attack() -> Self {
        Self {
            total_requests: 50,
            requests_per_second: 10.0,
            unique_ips: 10,
            payload: Payload::MissingFields,
        }
    }

    /// Slow drip - one client staying under 5 per minute.
    pub fn slow_drip() -> Self {
        Self {
            total_requests: 12,
            requests_per_second: 1.0 / 13.0,
            unique_ips: 1,
            ..Default::default()
        }
    }

    /// Time between consecutive requests.
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.requests_per_second)
    }
}
