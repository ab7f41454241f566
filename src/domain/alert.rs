use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::geo::TargetArea;
use super::incident::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "alert_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Emergency,
    Warning,
    Info,
    Update,
}

impl AlertType {
    pub const fn as_str(self) -> &'static str {
        match self {
            AlertType::Emergency => "emergency",
            AlertType::Warning => "warning",
            AlertType::Info => "info",
            AlertType::Update => "update",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A broadcast message, optionally scoped to a target area.
///
/// The area is stored as three nullable columns and only exists when all three are set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub target_latitude: Option<f64>,
    pub target_longitude: Option<f64>,
    pub target_radius_km: Option<f64>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub related_incident: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Alert {
    pub fn target_area(&self) -> Option<TargetArea> {
        match (self.target_latitude, self.target_longitude, self.target_radius_km) {
            (Some(latitude), Some(longitude), Some(radius_km)) => {
                Some(TargetArea::new(latitude, longitude, radius_km))
            }
            _ => None,
        }
    }

    pub fn notification_title(&self) -> String {
        format!("{}: {}", self.alert_type.as_str().to_uppercase(), self.title)
    }

    /// Active and either without expiry or expiring after `now`.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.map_or(true, |expires_at| expires_at > now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn alert() -> Alert {
        Alert {
            id: Uuid::new_v4(),
            title: "River cresting".to_string(),
            message: "Move to higher ground".to_string(),
            alert_type: AlertType::Warning,
            severity: Severity::High,
            target_latitude: Some(1.0),
            target_longitude: Some(2.0),
            target_radius_km: Some(15.0),
            is_active: true,
            expires_at: None,
            created_by: Uuid::new_v4(),
            related_incident: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn target_area_needs_all_three_columns() {
        let full = alert();
        assert_eq!(full.target_area(), Some(TargetArea::new(1.0, 2.0, 15.0)));

        let missing_radius = Alert {
            target_radius_km: None,
            ..alert()
        };
        assert_eq!(missing_radius.target_area(), None);

        let missing_latitude = Alert {
            target_latitude: None,
            ..alert()
        };
        assert_eq!(missing_latitude.target_area(), None);
    }

    #[test]
    fn notification_title_uppercases_type() {
        assert_eq!(alert().notification_title(), "WARNING: River cresting");
    }

    #[test]
    fn is_current_respects_expiry_and_flag() {
        let now = Utc::now();
        assert!(alert().is_current(now));

        let future = Alert {
            expires_at: Some(now + Duration::hours(1)),
            ..alert()
        };
        assert!(future.is_current(now));

        let expired = Alert {
            expires_at: Some(now - Duration::minutes(1)),
            ..alert()
        };
        assert!(!expired.is_current(now));

        let inactive = Alert {
            is_active: false,
            ..alert()
        };
        assert!(!inactive.is_current(now));
    }
}
