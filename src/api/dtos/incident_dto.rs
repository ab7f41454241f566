use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::LocationDto;
use crate::domain::{IncidentStatus, IncidentType, Severity, UserSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactInfoDto {
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateIncidentRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 5000, message = "description must be 1-5000 characters"))]
    pub description: String,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub severity: Severity,
    #[validate(nested)]
    pub location: LocationDto,
    #[serde(default)]
    pub images: Vec<Uuid>,
    #[validate(nested)]
    pub contact_info: Option<ContactInfoDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateIncidentStatusRequest {
    pub status: IncidentStatus,
    pub assigned_to: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IncidentQuery {
    pub status: Option<IncidentStatus>,
    #[serde(rename = "type")]
    pub incident_type: Option<IncidentType>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IncidentSearchQuery {
    #[validate(length(min = 1, max = 200, message = "q must be 1-200 characters"))]
    pub q: String,
    #[serde(rename = "type")]
    pub incident_type: Option<IncidentType>,
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImageResponse {
    pub storage_id: Uuid,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IncidentResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub severity: Severity,
    pub status: IncidentStatus,
    pub location: LocationDto,
    pub reported_by: Uuid,
    pub reporter: Option<UserSummary>,
    pub assigned_to: Option<Uuid>,
    pub assignee: Option<UserSummary>,
    pub images: Vec<ImageResponse>,
    pub tags: Vec<String>,
    pub contact_info: Option<ContactInfoDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short form of an incident embedded in other records.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct IncidentSummary {
    pub title: String,
    pub status: IncidentStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IncidentStatsResponse {
    pub total: i64,
    pub by_status: BTreeMap<String, i64>,
    pub by_severity: BTreeMap<String, i64>,
    pub by_type: BTreeMap<String, i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadUrlResponse {
    pub storage_id: Uuid,
    pub upload_url: String,
    pub expires_at: DateTime<Utc>,
}
