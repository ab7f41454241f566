use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::fanout::deliver_all;
use super::mapper::{load_incident_summaries, load_user_summaries, map_alert};
use super::targeting::{alert_applies_near, volunteers_in_area};
use crate::api::dtos::{
    validated_radius, AlertQuery, AlertResponse, CreateAlertRequest, CreateAlertResponse,
    NearbyAlertsQuery,
};
use crate::domain::{Alert, DomainError, GeoPoint, Notification, NotificationType, TargetArea};
use crate::error::AppResult;
use crate::infrastructure::repositories::{
    AlertFilter, AlertRepository, IncidentRepository, NotificationRepository, UserRepository,
    VolunteerRepository,
};

#[derive(Clone)]
pub struct AlertService {
    alert_repo: Arc<dyn AlertRepository>,
    incident_repo: Arc<dyn IncidentRepository>,
    user_repo: Arc<dyn UserRepository>,
    volunteer_repo: Arc<dyn VolunteerRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
}

impl AlertService {
    pub fn new(
        alert_repo: Arc<dyn AlertRepository>,
        incident_repo: Arc<dyn IncidentRepository>,
        user_repo: Arc<dyn UserRepository>,
        volunteer_repo: Arc<dyn VolunteerRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            alert_repo,
            incident_repo,
            user_repo,
            volunteer_repo,
            notification_repo,
        }
    }

    pub async fn list(&self, query: AlertQuery) -> AppResult<Vec<AlertResponse>> {
        let filter = AlertFilter::from_query(query.is_active, query.alert_type);
        let alerts = self.alert_repo.list(filter).await?;
        self.to_responses(alerts).await
    }

    /// Active alerts that have not expired.
    pub async fn active(&self) -> AppResult<Vec<AlertResponse>> {
        let now = Utc::now();
        let alerts = self
            .alert_repo
            .list(AlertFilter::Active(true))
            .await?
            .into_iter()
            .filter(|alert| alert.is_current(now))
            .collect();
        self.to_responses(alerts).await
    }

    /// Active alerts concerning the given point. Expiry is not checked here.
    pub async fn by_location(&self, query: NearbyAlertsQuery) -> AppResult<Vec<AlertResponse>> {
        let radius_km = validated_radius(query.radius_km)?;
        let point = GeoPoint::new(query.latitude, query.longitude);

        let alerts = self
            .alert_repo
            .list(AlertFilter::Active(true))
            .await?
            .into_iter()
            .filter(|alert| alert_applies_near(alert, point, radius_km))
            .collect();
        self.to_responses(alerts).await
    }

    /// Stores the alert, then notifies volunteers inside its target area, or every user
    /// when it has none.
    pub async fn create(
        &self,
        creator_id: Uuid,
        request: CreateAlertRequest,
    ) -> AppResult<CreateAlertResponse> {
        request.validate()?;

        if let Some(incident_id) = request.related_incident {
            if self.incident_repo.find_by_id(incident_id).await?.is_none() {
                return Err(DomainError::not_found("Incident", incident_id).into());
            }
        }

        let now = Utc::now();
        let area: Option<TargetArea> = request.target_area.map(Into::into);
        let alert = Alert {
            id: Uuid::new_v4(),
            title: request.title,
            message: request.message,
            alert_type: request.alert_type,
            severity: request.severity,
            target_latitude: area.map(|area| area.center.latitude),
            target_longitude: area.map(|area| area.center.longitude),
            target_radius_km: area.map(|area| area.radius_km),
            is_active: true,
            expires_at: request.expires_at,
            created_by: creator_id,
            related_incident: request.related_incident,
            created_at: now,
            updated_at: now,
        };

        let created = self.alert_repo.create(&alert).await?;

        let recipients = self.recipients(created.target_area()).await?;
        let title = created.notification_title();
        let related_id = created.id.to_string();
        let notifications = recipients
            .into_iter()
            .map(|user_id| {
                Notification::unread(
                    user_id,
                    title.clone(),
                    created.message.clone(),
                    NotificationType::AlertIssued,
                    Some(related_id.clone()),
                )
            })
            .collect();
        let delivery = deliver_all(self.notification_repo.as_ref(), notifications).await;

        info!(
            alert_id = %created.id,
            targeted = created.target_area().is_some(),
            recipients = delivery.recipients,
            delivered = delivery.delivered,
            failed = delivery.failed,
            "alert issued"
        );

        let mut responses = self.to_responses(vec![created]).await?;
        Ok(CreateAlertResponse {
            alert: responses.remove(0),
            delivery,
        })
    }

    pub async fn deactivate(&self, id: Uuid) -> AppResult<AlertResponse> {
        let alert = self
            .alert_repo
            .deactivate(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Alert", id))?;
        info!(alert_id = %id, "alert deactivated");
        let mut responses = self.to_responses(vec![alert]).await?;
        Ok(responses.remove(0))
    }

    async fn recipients(&self, area: Option<TargetArea>) -> AppResult<Vec<Uuid>> {
        match area {
            Some(area) => {
                let volunteers = self.volunteer_repo.list_all().await?;
                Ok(volunteers_in_area(volunteers, &area))
            }
            None => {
                let users = self.user_repo.list_all().await?;
                Ok(users.into_iter().map(|user| user.id).collect())
            }
        }
    }

    async fn to_responses(&self, alerts: Vec<Alert>) -> AppResult<Vec<AlertResponse>> {
        let users =
            load_user_summaries(self.user_repo.as_ref(), alerts.iter().map(|a| a.created_by))
                .await?;
        let incidents = load_incident_summaries(
            self.incident_repo.as_ref(),
            alerts.iter().filter_map(|a| a.related_incident),
        )
        .await?;
        Ok(alerts
            .into_iter()
            .map(|alert| map_alert(alert, &users, &incidents))
            .collect())
    }
}
