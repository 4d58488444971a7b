// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the lead intake service.
//!
//! Every value has a default so the service starts with an empty
//! environment; the notifier then runs in log-only mode.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Longest accepted rate window: one day.
pub const MAX_WINDOW_MS: u64 = 86_400_000;

/// Longest accepted sweep interval: one day.
pub const MAX_SWEEP_INTERVAL_SECS: u64 = 86_400;

/// Configuration for the lead intake service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Outbound notification configuration
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Fixed-window rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum submissions per window per client (default: 5)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in milliseconds (default: 60000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Interval between sweeps of expired windows in seconds; 0 disables (default: 60)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

/// Notification transport configuration.
///
/// The key, sender and recipient are only meaningful together; see
/// [`NotifierConfig::transport`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifierConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub to: Option<String>,

    /// Email API endpoint (default: https://api.resend.com/emails)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Transport timeout in seconds for the single dispatch attempt (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// The complete set of transport credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub api_key: String,
    pub from: String,
    pub to: String,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            notifier: NotifierConfig {
                api_url: default_api_url(),
                timeout_secs: default_timeout_secs(),
                ..NotifierConfig::default()
            },
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_ms: default_window_ms(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rate window duration, capped at [`MAX_WINDOW_MS`]
    pub fn window_duration(&self) -> Duration {
        Duration::from_millis(self.window_ms.clamp(1, MAX_WINDOW_MS))
    }

    /// Get the sweep interval, or `None` when sweeping is disabled
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0)
            .then(|| Duration::from_secs(self.sweep_interval_secs.min(MAX_SWEEP_INTERVAL_SECS)))
    }
}

impl NotifierConfig {
    /// Returns the transport credentials if all three are present.
    pub fn transport(&self) -> Option<TransportSettings> {
        Some(TransportSettings {
            api_key: non_empty(self.api_key.as_deref())?,
            from: non_empty(self.from.as_deref())?,
            to: non_empty(self.to.as_deref())?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset. Unparseable numbers fall back to
    /// their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Config {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            rate_limit: RateLimitConfig {
                max_requests: parsed(&get, "LEAD_RATE_LIMIT", defaults.rate_limit.max_requests),
                window_ms: within(
                    "LEAD_RATE_WINDOW_MS",
                    parsed(&get, "LEAD_RATE_WINDOW_MS", defaults.rate_limit.window_ms),
                    1..=MAX_WINDOW_MS,
                    defaults.rate_limit.window_ms,
                ),
                sweep_interval_secs: within(
                    "LEAD_SWEEP_INTERVAL_SECS",
                    parsed(
                        &get,
                        "LEAD_SWEEP_INTERVAL_SECS",
                        defaults.rate_limit.sweep_interval_secs,
                    ),
                    0..=MAX_SWEEP_INTERVAL_SECS,
                    defaults.rate_limit.sweep_interval_secs,
                ),
            },
            notifier: NotifierConfig {
                api_key: get("RESEND_API_KEY"),
                from: get("LEAD_FROM_EMAIL"),
                to: get("LEAD_TO_EMAIL"),
                api_url: get("RESEND_API_URL").unwrap_or(defaults.notifier.api_url),
                timeout_secs: parsed(&get, "NOTIFY_TIMEOUT_SECS", defaults.notifier.timeout_secs),
            },
            metrics: MetricsConfig {
                enabled: parsed(&get, "METRICS_ENABLED", defaults.metrics.enabled),
                ..defaults.metrics
            },
        }
    }
}

fn parsed<T, G>(get: &G, key: &str, default: T) -> T
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring unparseable configuration value");
            default
        }),
        None => default,
    }
}

fn within(key: &str, value: u64, range: RangeInclusive<u64>, default: u64) -> u64 {
    if range.contains(&value) {
        value
    } else {
        warn!(
            key,
            value,
            min = *range.start(),
            max = *range.end(),
            "Ignoring out-of-range configuration value"
        );
        default
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
