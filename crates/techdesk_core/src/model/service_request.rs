//! Service request records.
//!
//! # Invariants
//! - `budget` is validated positive at the form boundary, not here.
//! - A non-finite budget is stored as JSON `null` and reads back as NaN, so
//!   one bad field never makes the whole collection unreadable.
//! - `client_id` may reference a deleted client.

use super::id::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Suggested service-type labels for the request form's picker.
///
/// The stored label is free text; this list is not enforced.
pub const SERVICE_TYPES: &[&str] = &[
    "Computer Maintenance",
    "Network Installation",
    "Technical Support",
    "Software Development",
    "IT Consulting",
    "Backup and Recovery",
    "Information Security",
    "Cloud Computing",
    "Infrastructure",
    "Other",
];

/// Lifecycle state of a service request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    /// Accepted, work not finished yet.
    #[default]
    Pending,
    /// Delivered. Only completed requests may be rated.
    Completed,
    Cancelled,
}

impl ServiceStatus {
    pub const ALL: [ServiceStatus; 3] = [Self::Pending, Self::Completed, Self::Cancelled];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parses a status label, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }
}

impl Display for ServiceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work requested by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: RecordId,
    pub client_id: RecordId,
    pub service_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "budget_or_nan")]
    pub budget: f64,
    pub status: ServiceStatus,
    pub date: NaiveDate,
}

fn budget_or_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl ServiceRequest {
    pub fn is_completed(&self) -> bool {
        self.status == ServiceStatus::Completed
    }

    /// Merges `patch` into this record in place.
    pub fn apply(&mut self, patch: ServicePatch) {
        if let Some(client_id) = patch.client_id {
            self.client_id = client_id;
        }
        if let Some(service_type) = patch.service_type {
            self.service_type = service_type;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(budget) = patch.budget {
            self.budget = budget;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

/// Typed field set for creating a service request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewServiceRequest {
    pub client_id: RecordId,
    pub service_type: String,
    pub description: Option<String>,
    pub budget: f64,
    pub status: ServiceStatus,
    pub date: NaiveDate,
}

impl NewServiceRequest {
    pub fn into_request(self, id: RecordId) -> ServiceRequest {
        ServiceRequest {
            id,
            client_id: self.client_id,
            service_type: self.service_type,
            description: self.description,
            budget: self.budget,
            status: self.status,
            date: self.date,
        }
    }
}

/// Partial update for a service request.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServicePatch {
    pub client_id: Option<RecordId>,
    pub service_type: Option<String>,
    pub description: Option<Option<String>>,
    pub budget: Option<f64>,
    pub status: Option<ServiceStatus>,
    pub date: Option<NaiveDate>,
}

impl ServicePatch {
    pub fn status(status: ServiceStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
