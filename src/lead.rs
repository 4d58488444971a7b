// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lead data as it arrives and as it leaves.

use crate::contract::Field;
use serde::{Deserialize, Serialize};

/// Raw lead input, exactly as the client sent it.
///
/// All fields are optional at this layer so that a missing required field
/// surfaces as a validation message rather than a decode error. Unknown keys
/// are rejected at decode time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LeadSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_surface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Honeypot
    #[serde(default)]
    pub website: Option<String>,
}

impl LeadSubmission {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Zip => &self.zip,
            Field::SurfaceSize => &self.surface_size,
            Field::CurrentSurface => &self.current_surface,
            Field::Message => &self.message,
            Field::Website => &self.website,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Zip => &mut self.zip,
            Field::SurfaceSize => &mut self.surface_size,
            Field::CurrentSurface => &mut self.current_surface,
            Field::Message => &mut self.message,
            Field::Website => &mut self.website,
        }
    }
}

/// A lead that is safe to embed in rendered content.
///
/// Produced only by [`sanitize`](crate::sanitizer::sanitize). Optional fields
/// are empty strings when the client left them out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub zip: String,
    pub surface_size: String,
    pub current_surface: String,
    pub message: String,
}

impl From<SanitizedLead> for LeadSubmission {
    fn from(lead: SanitizedLead) -> Self {
        Self {
            name: Some(lead.name),
            email: Some(lead.email),
            phone: Some(lead.phone),
            zip: Some(lead.zip),
            surface_size: Some(lead.surface_size),
            current_surface: Some(lead.current_surface),
            message: Some(lead.message),
            website: Some(String::new()),
        }
    }
}
