use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::geo::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "incident_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IncidentType {
    Fire,
    Flood,
    Earthquake,
    Storm,
    Accident,
    Medical,
    Other,
}

impl IncidentType {
    pub const ALL: [IncidentType; 7] = [
        IncidentType::Fire,
        IncidentType::Flood,
        IncidentType::Earthquake,
        IncidentType::Storm,
        IncidentType::Accident,
        IncidentType::Medical,
        IncidentType::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            IncidentType::Fire => "fire",
            IncidentType::Flood => "flood",
            IncidentType::Earthquake => "earthquake",
            IncidentType::Storm => "storm",
            IncidentType::Accident => "accident",
            IncidentType::Medical => "medical",
            IncidentType::Other => "other",
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared by incidents and alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub const fn is_urgent(self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "incident_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Reported,
    Investigating,
    Responding,
    Resolved,
}

impl IncidentStatus {
    pub const ALL: [IncidentStatus; 4] = [
        IncidentStatus::Reported,
        IncidentStatus::Investigating,
        IncidentStatus::Responding,
        IncidentStatus::Resolved,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            IncidentStatus::Reported => "reported",
            IncidentStatus::Investigating => "investigating",
            IncidentStatus::Responding => "responding",
            IncidentStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Incident {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub incident_type: IncidentType,
    pub severity: Severity,
    pub status: IncidentStatus,
    #[sqlx(flatten)]
    pub location: Location,
    pub reported_by: Uuid,
    pub assigned_to: Option<Uuid>,
    pub images: Vec<Uuid>,
    pub tags: Vec<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const URGENT_TAG: &str = "urgent";

/// Description keywords and the tag each group adds. Checked in this order.
const KEYWORD_TAGS: &[(&[&str], &str)] = &[
    (&["injury", "hurt"], "medical-emergency"),
    (&["evacuation", "evacuate"], "evacuation-needed"),
    (&["road", "traffic"], "traffic-related"),
];

/// Tags attached to a newly reported incident.
///
/// Starts with the incident type, adds `urgent` for high/critical severity, then one tag
/// per keyword group found in the lowercased description. Matching is plain substring
/// containment, so "roadmap" counts as "road".
pub fn derive_tags(incident_type: IncidentType, severity: Severity, description: &str) -> Vec<String> {
    let mut tags = vec![incident_type.as_str().to_string()];

    if severity.is_urgent() {
        tags.push(URGENT_TAG.to_string());
    }

    let description = description.to_lowercase();
    for (keywords, tag) in KEYWORD_TAGS {
        if keywords.iter().any(|keyword| description.contains(keyword)) {
            tags.push((*tag).to_string());
        }
    }

    tags
}
