use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::incident_dto::IncidentSummary;
use crate::domain::{AlertType, Severity, TargetArea, UserSummary};

/// Target area at the API boundary. `radius` is in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TargetAreaDto {
    pub latitude: f64,
    pub longitude: f64,
    #[validate(range(exclusive_min = 0.0, message = "radius must be positive"))]
    pub radius: f64,
}

impl From<TargetAreaDto> for TargetArea {
    fn from(dto: TargetAreaDto) -> Self {
        TargetArea::new(dto.latitude, dto.longitude, dto.radius)
    }
}

impl From<TargetArea> for TargetAreaDto {
    fn from(area: TargetArea) -> Self {
        Self {
            latitude: area.center.latitude,
            longitude: area.center.longitude,
            radius: area.radius_km,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlertRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "message must be 1-2000 characters"))]
    pub message: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    #[validate(nested)]
    pub target_area: Option<TargetAreaDto>,
    pub expires_at: Option<DateTime<Utc>>,
    pub related_incident: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlertQuery {
    pub is_active: Option<bool>,
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyAlertsQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlertResponse {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub target_area: Option<TargetAreaDto>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub creator: Option<UserSummary>,
    pub related_incident: Option<Uuid>,
    pub incident: Option<IncidentSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of the notification fan-out for one alert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeliveryReport {
    pub recipients: usize,
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateAlertResponse {
    pub alert: AlertResponse,
    pub delivery: DeliveryReport,
}
