use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::{LocationDto, LocationQuery};
use super::incident_dto::IncidentSummary;
use crate::domain::{ResourceStatus, ResourceType};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateResourceRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i32,
    #[validate(nested)]
    pub location: LocationDto,
    #[validate(length(min = 1, max = 200, message = "contact_person must be 1-200 characters"))]
    pub contact_person: String,
    #[validate(length(min = 1, max = 50, message = "contact_phone must be 1-50 characters"))]
    pub contact_phone: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateResourceStatusRequest {
    pub status: ResourceStatus,
    pub assigned_to: Option<Uuid>,
    #[validate(range(min = 0, message = "available must not be negative"))]
    pub available: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResourceQuery {
    #[serde(rename = "type")]
    pub resource_type: Option<ResourceType>,
    pub status: Option<ResourceStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailableResourcesQuery {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
}

impl AvailableResourcesQuery {
    pub fn location(&self) -> LocationQuery {
        LocationQuery {
            latitude: self.latitude,
            longitude: self.longitude,
            radius_km: self.radius_km,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResourceResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub quantity: i32,
    pub available: i32,
    pub location: LocationDto,
    pub status: ResourceStatus,
    pub assigned_to: Option<Uuid>,
    pub assigned_incident: Option<IncidentSummary>,
    pub contact_person: String,
    pub contact_phone: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceStatsResponse {
    pub total: i64,
    pub by_status: BTreeMap<String, i64>,
    pub by_type: BTreeMap<String, i64>,
}
