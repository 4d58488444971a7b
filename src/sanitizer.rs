// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Turns a validated submission into a [`SanitizedLead`].
//!
//! Sanitizing never rejects. Angle brackets are escaped in every field and
//! links are removed from the message so they carry no value to spammers.
//! The message is cut to its length limit last, so the output never exceeds
//! it and a second pass leaves it unchanged.

use crate::contract::MESSAGE_MAX_CHARS;
use crate::lead::{LeadSubmission, SanitizedLead};
use once_cell::sync::Lazy;
use regex::Regex;

/// Text that replaces each link found in a message.
pub const LINK_PLACEHOLDER: &str = "[link removed]";

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://\S+").expect("valid url regex"));

/// Sanitize a submission. Must only be called after validation passed.
pub fn sanitize(lead: &LeadSubmission) -> SanitizedLead {
    let trimmed = |v: &Option<String>| escape(v.as_deref().unwrap_or("").trim());
    let raw = |v: &Option<String>| escape(v.as_deref().unwrap_or(""));

    SanitizedLead {
        name: trimmed(&lead.name),
        email: trimmed(&lead.email),
        phone: trimmed(&lead.phone),
        zip: trimmed(&lead.zip),
        surface_size: raw(&lead.surface_size),
        current_surface: raw(&lead.current_surface),
        message: truncate(
            &escape(&strip_links(lead.message.as_deref().unwrap_or(""))),
            MESSAGE_MAX_CHARS,
        ),
    }
}

/// Replace `<` and `>` with their HTML entities.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace every `http://` or `https://` link with [`LINK_PLACEHOLDER`].
pub fn strip_links(value: &str) -> String {
    URL_PATTERN.replace_all(value, LINK_PLACEHOLDER).into_owned()
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
