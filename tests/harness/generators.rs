// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test data generators for submission simulation.

use serde_json::{json, Value};
use std::net::{IpAddr, Ipv4Addr};

/// Generate a pool of client addresses for testing.
pub fn generate_ips(count: usize) -> Vec<IpAddr> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = ((i >> 16) & 0xFF) as u8;
            let b = ((i >> 8) & 0xFF) as u8;
            let c = (i & 0xFF) as u8;
            IpAddr::V4(Ipv4Addr::new(10, a, b, c))
        })
        .collect()
}

/// The smallest lead the endpoint accepts.
pub fn minimal_lead() -> Value {
    json!({
        "name": "Jo Ann",
        "email": "a@b.co",
        "phone": "5551234567",
    })
}

/// A valid lead with every field filled in; varies with `i`.
pub fn valid_lead(i: usize) -> Value {
    json!({
        "name": format!("Visitor {i}"),
        "email": format!("visitor{i}@example.com"),
        "phone": format!("(757) 555-{:04}", i % 10_000),
        "zip": "23451",
        "surfaceSize": "2-car",
        "currentSurface": "bare",
        "message": "Looking for a quote\nbefore spring.",
        "website": "",
    })
}

/// A lead a bot would send: valid fields plus a filled honeypot.
pub fn honeypot_lead(i: usize) -> Value {
    let mut lead = valid_lead(i);
    lead["website"] = json!(format!("https://seo-deals-{i}.example"));
    lead
}

/// A valid lead whose message carries markup and links.
pub fn injection_lead(i: usize) -> Value {
    let payloads = generate_injection_payloads();
    let mut lead = valid_lead(i);
    lead["message"] = json!(payloads[i % payloads.len()]);
    lead
}

/// Message payloads that must never reach the notification verbatim.
pub fn generate_injection_payloads() -> Vec<&'static str> {
    vec![
        "<script>alert(1)</script>",
        "<img src=x onerror=alert(1)>",
        "Visit https://evil.example/x today",
        "HTTPS://EVIL.EXAMPLE/promo<script>",
        "<a href=\"http://spam.example\">cheap</a>",
    ]
}

/// Email values the contract rejects.
pub fn generate_malformed_emails() -> Vec<&'static str> {
    vec!["plainaddress", "a@b", "@example.com", "a b@c.co", "a@b .co", "a@@b.co"]
}

/// Phone values the contract rejects.
pub fn generate_malformed_phones() -> Vec<&'static str> {
    vec!["123", "phone", "555-12", "(757) 5", "+1 555 555 5555 555 555 5555 55"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ips() {
        let ips = generate_ips(256);
        assert_eq!(ips.len(), 256);
        // All should be unique
        let unique: std::collections::HashSet<_> = ips.iter().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn test_honeypot_lead_is_otherwise_valid() {
        let lead = honeypot_lead(3);
        assert_eq!(lead["name"], "Visitor 3");
        assert_ne!(lead["website"], "");
    }
}
