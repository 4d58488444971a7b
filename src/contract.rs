// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-field rules for a lead submission.
//!
//! The server-side [`LeadValidator`](crate::validator::LeadValidator) and the
//! client-side [`LeadForm`](crate::form::LeadForm) both check fields through
//! [`check_field`], so the two can never disagree on a rule or its wording.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 80;
pub const PHONE_MIN_DIGITS: usize = 7;
pub const PHONE_MAX_CHARS: usize = 25;
pub const MESSAGE_MAX_CHARS: usize = 1000;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static ZIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("valid zip regex"));

/// A field of the lead form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Zip,
    SurfaceSize,
    CurrentSurface,
    Message,
    /// Honeypot. Rendered hidden; people never fill it in.
    Website,
}

impl Field {
    /// Fields in the order they are checked.
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Zip,
        Field::SurfaceSize,
        Field::CurrentSurface,
        Field::Message,
        Field::Website,
    ];

    /// Fields a submission cannot go without.
    pub const REQUIRED: [Field; 3] = [Field::Name, Field::Email, Field::Phone];

    /// Wire name, as used in the JSON body.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Zip => "zip",
            Field::SurfaceSize => "surfaceSize",
            Field::CurrentSurface => "currentSurface",
            Field::Message => "message",
            Field::Website => "website",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule a field value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldViolation {
    #[error("Name is required.")]
    NameMissing,
    #[error("Name is too short.")]
    NameTooShort,
    #[error("Name is too long.")]
    NameTooLong,
    #[error("Email is required.")]
    EmailMissing,
    #[error("Enter a valid email address.")]
    EmailInvalid,
    #[error("Phone is required.")]
    PhoneMissing,
    #[error("Enter a valid phone number.")]
    PhoneInvalid,
    #[error("Enter a valid ZIP or ZIP+4.")]
    ZipInvalid,
    #[error("Message must be 1000 characters or fewer.")]
    MessageTooLong,
    #[error("Invalid submission.")]
    HoneypotFilled,
}

impl FieldViolation {
    /// The field this violation belongs to.
    pub fn field(&self) -> Field {
        match self {
            Self::NameMissing | Self::NameTooShort | Self::NameTooLong => Field::Name,
            Self::EmailMissing | Self::EmailInvalid => Field::Email,
            Self::PhoneMissing | Self::PhoneInvalid => Field::Phone,
            Self::ZipInvalid => Field::Zip,
            Self::MessageTooLong => Field::Message,
            Self::HoneypotFilled => Field::Website,
        }
    }
}

/// Check a single field value against its rule.
///
/// An absent value and an empty value are the same thing here.
pub fn check_field(field: Field, value: Option<&str>) -> Result<(), FieldViolation> {
    let value = value.unwrap_or("");
    match field {
        Field::Name => check_name(value),
        Field::Email => check_email(value),
        Field::Phone => check_phone(value),
        Field::Zip => check_zip(value),
        Field::Message => check_message(value),
        Field::Website => check_honeypot(value),
        Field::SurfaceSize | Field::CurrentSurface => Ok(()),
    }
}

fn check_name(value: &str) -> Result<(), FieldViolation> {
    let len = value.trim().chars().count();
    if len == 0 {
        Err(FieldViolation::NameMissing)
    } else if len < NAME_MIN_CHARS {
        Err(FieldViolation::NameTooShort)
    } else if len > NAME_MAX_CHARS {
        Err(FieldViolation::NameTooLong)
    } else {
        Ok(())
    }
}

fn check_email(value: &str) -> Result<(), FieldViolation> {
    let value = value.trim();
    if value.is_empty() {
        Err(FieldViolation::EmailMissing)
    } else if !EMAIL_PATTERN.is_match(value) {
        Err(FieldViolation::EmailInvalid)
    } else {
        Ok(())
    }
}

fn check_phone(value: &str) -> Result<(), FieldViolation> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldViolation::PhoneMissing);
    }
    if value.chars().count() > PHONE_MAX_CHARS || phone_digits(value) < PHONE_MIN_DIGITS {
        return Err(FieldViolation::PhoneInvalid);
    }
    Ok(())
}

/// Number of decimal digits in a phone number; punctuation is ignored.
pub fn phone_digits(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

fn check_zip(value: &str) -> Result<(), FieldViolation> {
    let value = value.trim();
    if value.is_empty() || ZIP_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(FieldViolation::ZipInvalid)
    }
}

fn check_message(value: &str) -> Result<(), FieldViolation> {
    if value.chars().count() > MESSAGE_MAX_CHARS {
        Err(FieldViolation::MessageTooLong)
    } else {
        Ok(())
    }
}

fn check_honeypot(value: &str) -> Result<(), FieldViolation> {
    if value.is_empty() {
        Ok(())
    } else {
        Err(FieldViolation::HoneypotFilled)
    }
}
