use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::mapper::{load_user_summaries, map_incident};
use crate::api::dtos::{
    CreateIncidentRequest, IncidentQuery, IncidentResponse, IncidentSearchQuery,
    IncidentStatsResponse, UpdateIncidentStatusRequest, UploadUrlResponse,
};
use crate::config::defaults::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, SEARCH_RESULT_LIMIT};
use crate::domain::stats::tally;
use crate::domain::{
    derive_tags, DomainError, Incident, IncidentStatus, IncidentType, Notification, Severity,
};
use crate::error::AppResult;
use crate::infrastructure::repositories::{
    IncidentFilter, IncidentRepository, NotificationRepository, UserRepository,
};
use crate::infrastructure::storage::BlobStore;

#[derive(Clone)]
pub struct IncidentService {
    incident_repo: Arc<dyn IncidentRepository>,
    user_repo: Arc<dyn UserRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    blob_store: Arc<dyn BlobStore>,
}

impl IncidentService {
    pub fn new(
        incident_repo: Arc<dyn IncidentRepository>,
        user_repo: Arc<dyn UserRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            incident_repo,
            user_repo,
            notification_repo,
            blob_store,
        }
    }

    pub async fn list(&self, query: IncidentQuery) -> AppResult<Vec<IncidentResponse>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        let filter = IncidentFilter::from_query(query.status, query.incident_type);
        let incidents = self.incident_repo.list(filter, limit).await?;
        self.to_responses(incidents).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<IncidentResponse> {
        let incident = self.find(id).await?;
        let mut responses = self.to_responses(vec![incident]).await?;
        Ok(responses.remove(0))
    }

    pub async fn create(
        &self,
        reporter_id: Uuid,
        request: CreateIncidentRequest,
    ) -> AppResult<IncidentResponse> {
        request.validate()?;

        let now = Utc::now();
        let tags = derive_tags(request.incident_type, request.severity, &request.description);
        let (contact_phone, contact_email) = request
            .contact_info
            .map(|contact| (contact.phone, contact.email))
            .unwrap_or_default();

        let incident = Incident {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            incident_type: request.incident_type,
            severity: request.severity,
            status: IncidentStatus::Reported,
            location: request.location.into(),
            reported_by: reporter_id,
            assigned_to: None,
            images: request.images,
            tags,
            contact_phone,
            contact_email,
            created_at: now,
            updated_at: now,
        };

        let created = self.incident_repo.create(&incident).await?;
        info!(
            incident_id = %created.id,
            incident_type = %created.incident_type,
            severity = %created.severity,
            tags = ?created.tags,
            "incident reported"
        );

        let mut responses = self.to_responses(vec![created]).await?;
        Ok(responses.remove(0))
    }

    /// Sets the status and replaces the assignee; a newly assigned user is notified.
    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateIncidentStatusRequest,
    ) -> AppResult<IncidentResponse> {
        let current = self.find(id).await?;

        if let Some(assignee) = request.assigned_to {
            if !self.user_repo.exists(assignee).await? {
                return Err(DomainError::not_found("User", assignee).into());
            }
        }

        let updated = self
            .incident_repo
            .update_status(id, request.status, request.assigned_to)
            .await?
            .ok_or_else(|| DomainError::not_found("Incident", id))?;

        info!(
            incident_id = %id,
            from = %current.status,
            to = %updated.status,
            "incident status updated"
        );

        if let Some(assignee) = updated.assigned_to {
            if current.assigned_to != Some(assignee) {
                let notification = Notification::incident_assigned(
                    assignee,
                    "Incident Assigned",
                    &updated.title,
                    updated.id,
                );
                match self.notification_repo.create(&notification).await {
                    Ok(_) => info!(incident_id = %id, user_id = %assignee, "incident assigned"),
                    Err(error) => warn!(
                        incident_id = %id,
                        user_id = %assignee,
                        error = %error,
                        "assignment notification failed"
                    ),
                }
            }
        }

        let mut responses = self.to_responses(vec![updated]).await?;
        Ok(responses.remove(0))
    }

    pub async fn search(&self, query: IncidentSearchQuery) -> AppResult<Vec<IncidentResponse>> {
        query.validate()?;
        let incidents = self
            .incident_repo
            .search(
                query.q.trim(),
                query.incident_type,
                query.severity,
                SEARCH_RESULT_LIMIT,
            )
            .await?;
        self.to_responses(incidents).await
    }

    pub async fn stats(&self) -> AppResult<IncidentStatsResponse> {
        let incidents = self.incident_repo.list_all().await?;
        Ok(IncidentStatsResponse {
            total: incidents.len() as i64,
            by_status: tally(&IncidentStatus::ALL, incidents.iter().map(|i| i.status)),
            by_severity: tally(&Severity::ALL, incidents.iter().map(|i| i.severity)),
            by_type: tally(&IncidentType::ALL, incidents.iter().map(|i| i.incident_type)),
        })
    }

    pub fn upload_url(&self) -> AppResult<UploadUrlResponse> {
        let ticket = self.blob_store.issue_upload_url()?;
        Ok(UploadUrlResponse {
            storage_id: ticket.storage_id,
            upload_url: ticket.upload_url,
            expires_at: ticket.expires_at,
        })
    }

    async fn find(&self, id: Uuid) -> AppResult<Incident> {
        self.incident_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Incident", id).into())
    }

    async fn to_responses(&self, incidents: Vec<Incident>) -> AppResult<Vec<IncidentResponse>> {
        let user_ids = incidents
            .iter()
            .flat_map(|incident| std::iter::once(incident.reported_by).chain(incident.assigned_to));
        let users = load_user_summaries(self.user_repo.as_ref(), user_ids).await?;
        Ok(incidents
            .into_iter()
            .map(|incident| map_incident(incident, &users, self.blob_store.as_ref()))
            .collect())
    }
}
