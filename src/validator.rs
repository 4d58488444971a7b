// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lead submission validator.
//!
//! The server reports only the first violation; the form reports every
//! violation at once through [`LeadValidator::validate_all`]. Both walk the
//! same rules in [`crate::contract`].

use crate::contract::{check_field, Field, FieldViolation};
use crate::lead::LeadSubmission;
use std::collections::BTreeMap;
use tracing::debug;

/// Result of validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Submission is valid
    Valid,
    /// Submission broke a rule
    Invalid(FieldViolation),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&FieldViolation> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }
}

impl From<Result<(), FieldViolation>> for ValidationResult {
    fn from(result: Result<(), FieldViolation>) -> Self {
        match result {
            Ok(()) => ValidationResult::Valid,
            Err(violation) => ValidationResult::Invalid(violation),
        }
    }
}

/// Every violation found in a submission, keyed by field.
pub type FieldErrors = BTreeMap<Field, FieldViolation>;

/// Lead submission validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadValidator;

impl LeadValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a single field value.
    pub fn validate_field(&self, field: Field, value: Option<&str>) -> ValidationResult {
        check_field(field, value).into()
    }

    /// Validate a complete submission, stopping at the first violation.
    pub fn validate(&self, lead: &LeadSubmission) -> ValidationResult {
        for field in Field::ALL {
            if let Err(violation) = check_field(field, lead.get(field)) {
                debug!(field = %field, error = %violation, "Lead validation failed");
                return ValidationResult::Invalid(violation);
            }
        }

        debug!("Lead valid");
        ValidationResult::Valid
    }

    /// Validate the given fields and collect every violation.
    pub fn validate_all(&self, lead: &LeadSubmission, fields: &[Field]) -> FieldErrors {
        fields
            .iter()
            .filter_map(|&field| {
                check_field(field, lead.get(field))
                    .err()
                    .map(|violation| (field, violation))
            })
            .collect()
    }
}
