use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    IncidentAssigned,
    ResourceRequested,
    AlertIssued,
    StatusUpdate,
}

impl NotificationType {
    pub const fn as_str(self) -> &'static str {
        match self {
            NotificationType::IncidentAssigned => "incident_assigned",
            NotificationType::ResourceRequested => "resource_requested",
            NotificationType::AlertIssued => "alert_issued",
            NotificationType::StatusUpdate => "status_update",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub related_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// A fresh, unread notification for `user_id`.
    pub fn unread(
        user_id: Uuid,
        title: impl Into<String>,
        message: impl Into<String>,
        notification_type: NotificationType,
        related_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            message: message.into(),
            notification_type,
            is_read: false,
            related_id,
            created_at: Utc::now(),
        }
    }

    pub fn incident_assigned(user_id: Uuid, title: &str, incident_title: &str, incident_id: Uuid) -> Self {
        Self::unread(
            user_id,
            title,
            format!("You have been assigned to incident: {incident_title}"),
            NotificationType::IncidentAssigned,
            Some(incident_id.to_string()),
        )
    }
}
