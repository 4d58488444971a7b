// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Client identification for rate limiting.

use axum::http::HeaderMap;
use std::fmt;
use std::net::SocketAddr;

/// Header set by the reverse proxy in front of the service.
pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Key for the rate limiter. Only ever used for counting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    /// Used when neither a forwarded address nor a peer address is known.
    pub const UNKNOWN: &'static str = "unknown";

    /// Derive the identifier for a request.
    ///
    /// Takes the first entry of `X-Forwarded-For`, then the peer address,
    /// then falls back to `"unknown"`.
    pub fn from_request(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let forwarded = headers
            .get(FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match (forwarded, peer) {
            (Some(addr), _) => Self(addr.to_string()),
            (None, Some(peer)) => Self(peer.ip().to_string()),
            (None, None) => Self(Self::UNKNOWN.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
