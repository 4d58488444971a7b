// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter for lead submissions.
//!
//! Each client gets a `{count, reset_at}` window. A check that arrives after
//! `reset_at` starts a fresh window; otherwise it increments the count and is
//! allowed while the count stays within the limit.
//!
//! Windows are fixed, not sliding: a client that bursts at the end of one
//! window and again at the start of the next can land up to twice the limit
//! in a short span. That is accepted for abuse mitigation.

use crate::client::ClientId;
use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request is allowed
    Allowed {
        /// Remaining requests in current window
        remaining: u32,
        /// Time until window resets
        reset_in: Duration,
    },
    /// Request is rate limited
    Limited {
        /// Time until the window resets
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Per-client counting window.
#[derive(Debug, Clone, Copy)]
struct RateWindow {
    count: u32,
    reset_at: Instant,
}

impl RateWindow {
    fn new(now: Instant, window: Duration) -> Self {
        Self {
            count: 0,
            reset_at: now + window,
        }
    }

    /// Count one request, resetting first if the window has passed.
    fn hit(&mut self, now: Instant, window: Duration) -> u32 {
        if now > self.reset_at {
            self.count = 0;
            self.reset_at = now + window;
        }
        self.count = self.count.saturating_add(1);
        self.count
    }

    fn is_expired(&self, now: Instant) -> bool {
        now > self.reset_at
    }
}

/// Thread-safe rate limiter.
///
/// The whole check runs under one write lock, so concurrent requests from
/// the same client never lose an increment.
#[derive(Clone)]
pub struct RateLimiter {
    /// Configuration
    config: RateLimitConfig,
    /// Per-client windows
    windows: Arc<RwLock<HashMap<ClientId, RateWindow>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Count a request from `client` and decide whether it may proceed.
    pub async fn check(&self, client: &ClientId) -> RateLimitResult {
        let now = Instant::now();
        let window = self.config.window_duration();

        let mut windows = self.windows.write().await;
        let state = windows
            .entry(client.clone())
            .or_insert_with(|| RateWindow::new(now, window));

        let count = state.hit(now, window);
        let reset_in = state.reset_at.saturating_duration_since(now);

        if count <= self.config.max_requests {
            RateLimitResult::Allowed {
                remaining: self.config.max_requests - count,
                reset_in,
            }
        } else {
            debug!(%client, count, ?reset_in, "Client rate limit exceeded");
            RateLimitResult::Limited {
                retry_after: reset_in,
            }
        }
    }

    /// Drop windows that have already passed their reset time.
    ///
    /// A swept client starts a fresh window on its next request, which is
    /// exactly what an expired window would have done, so sweeping never
    /// changes a decision. Returns the number of windows removed.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut windows = self.windows.write().await;
        let before = windows.len();
        windows.retain(|_, state| !state.is_expired(now));
        let removed = before - windows.len();
        if removed > 0 {
            debug!(removed, remaining = windows.len(), "Swept expired rate windows");
        }
        removed
    }

    /// Number of clients currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.windows.read().await.len()
    }
}
