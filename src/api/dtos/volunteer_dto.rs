use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{split_csv, LocationDto, LocationQuery};
use super::incident_dto::IncidentSummary;
use crate::domain::{Availability, UserSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct EmergencyContactDto {
    #[validate(length(min = 1, max = 200, message = "emergency contact name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "emergency contact phone is required"))]
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterVolunteerRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    #[validate(nested)]
    pub location: LocationDto,
    #[validate(length(min = 1, max = 50, message = "phone must be 1-50 characters"))]
    pub phone: String,
    #[validate(nested)]
    pub emergency_contact: EmergencyContactDto,
    #[serde(default)]
    pub certifications: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateVolunteerRequest {
    pub skills: Option<Vec<String>>,
    pub availability: Option<Availability>,
    #[validate(nested)]
    pub location: Option<LocationDto>,
    #[validate(length(min = 1, max = 50, message = "phone must be 1-50 characters"))]
    pub phone: Option<String>,
    #[validate(nested)]
    pub emergency_contact: Option<EmergencyContactDto>,
    pub certifications: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignVolunteerRequest {
    pub incident_id: Uuid,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VolunteerQuery {
    pub availability: Option<Availability>,
    /// Comma-separated; a volunteer matches when it has any of them.
    pub skills: Option<String>,
}

impl VolunteerQuery {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills.as_deref().map(split_csv).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailableVolunteersQuery {
    /// Comma-separated; a volunteer matches when it has any of them.
    pub skills: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
}

impl AvailableVolunteersQuery {
    pub fn skill_list(&self) -> Vec<String> {
        split_csv(&self.skills)
    }

    pub fn location(&self) -> LocationQuery {
        LocationQuery {
            latitude: self.latitude,
            longitude: self.longitude,
            radius_km: self.radius_km,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VolunteerResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user: Option<UserSummary>,
    pub skills: Vec<String>,
    pub availability: Availability,
    pub location: LocationDto,
    pub phone: String,
    pub emergency_contact: EmergencyContactDto,
    pub certifications: Vec<String>,
    pub assigned_incident: Option<Uuid>,
    /// Title and status of the assigned incident.
    pub incident: Option<IncidentSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VolunteerStatsResponse {
    pub total: i64,
    pub by_availability: BTreeMap<String, i64>,
    pub skills: BTreeMap<String, i64>,
}
