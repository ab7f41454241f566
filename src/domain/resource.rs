use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::geo::{GeoPoint, Locatable, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "resource_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Personnel,
    Vehicle,
    Equipment,
    Medical,
    Shelter,
    Food,
    Water,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Personnel,
        ResourceType::Vehicle,
        ResourceType::Equipment,
        ResourceType::Medical,
        ResourceType::Shelter,
        ResourceType::Food,
        ResourceType::Water,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceType::Personnel => "personnel",
            ResourceType::Vehicle => "vehicle",
            ResourceType::Equipment => "equipment",
            ResourceType::Medical => "medical",
            ResourceType::Shelter => "shelter",
            ResourceType::Food => "food",
            ResourceType::Water => "water",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "resource_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Available,
    Deployed,
    Maintenance,
    Unavailable,
}

impl ResourceStatus {
    pub const ALL: [ResourceStatus; 4] = [
        ResourceStatus::Available,
        ResourceStatus::Deployed,
        ResourceStatus::Maintenance,
        ResourceStatus::Unavailable,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceStatus::Available => "available",
            ResourceStatus::Deployed => "deployed",
            ResourceStatus::Maintenance => "maintenance",
            ResourceStatus::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resource {
    pub id: Uuid,
    pub name: String,
    pub resource_type: ResourceType,
    pub quantity: i32,
    pub available: i32,
    #[sqlx(flatten)]
    pub location: Location,
    pub status: ResourceStatus,
    pub assigned_to: Option<Uuid>,
    pub contact_person: String,
    pub contact_phone: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Locatable for Resource {
    fn geo_point(&self) -> GeoPoint {
        self.location.point()
    }
}
