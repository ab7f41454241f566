use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::geo::{GeoPoint, Locatable, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "availability", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
    Unavailable,
}

impl Availability {
    pub const ALL: [Availability; 3] = [
        Availability::Available,
        Availability::Busy,
        Availability::Unavailable,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Busy => "busy",
            Availability::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Volunteer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skills: Vec<String>,
    pub availability: Availability,
    #[sqlx(flatten)]
    pub location: Location,
    pub phone: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub certifications: Vec<String>,
    pub assigned_incident: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Volunteer {
    /// True when the volunteer lists at least one of `wanted`. Exact, case-sensitive match.
    pub fn has_any_skill(&self, wanted: &[String]) -> bool {
        wanted.iter().any(|skill| self.skills.contains(skill))
    }
}

impl Locatable for Volunteer {
    fn geo_point(&self) -> GeoPoint {
        self.location.point()
    }
}
