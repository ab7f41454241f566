use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Alert, AlertType, Availability, Incident, IncidentStatus, IncidentType, Notification,
    Resource, ResourceStatus, ResourceType, Severity, User, Volunteer,
};
use crate::error::AppResult;

/// Incident list filter. Status wins over type when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IncidentFilter {
    #[default]
    All,
    Status(IncidentStatus),
    Type(IncidentType),
}

impl IncidentFilter {
    pub fn from_query(status: Option<IncidentStatus>, incident_type: Option<IncidentType>) -> Self {
        match (status, incident_type) {
            (Some(status), _) => IncidentFilter::Status(status),
            (None, Some(incident_type)) => IncidentFilter::Type(incident_type),
            (None, None) => IncidentFilter::All,
        }
    }
}

/// Resource list filter. Type wins over status when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResourceFilter {
    #[default]
    All,
    Type(ResourceType),
    Status(ResourceStatus),
}

impl ResourceFilter {
    pub fn from_query(resource_type: Option<ResourceType>, status: Option<ResourceStatus>) -> Self {
        match (resource_type, status) {
            (Some(resource_type), _) => ResourceFilter::Type(resource_type),
            (None, Some(status)) => ResourceFilter::Status(status),
            (None, None) => ResourceFilter::All,
        }
    }
}

/// Alert list filter. The active flag wins over type when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertFilter {
    #[default]
    All,
    Active(bool),
    Type(AlertType),
}

impl AlertFilter {
    pub fn from_query(is_active: Option<bool>, alert_type: Option<AlertType>) -> Self {
        match (is_active, alert_type) {
            (Some(is_active), _) => AlertFilter::Active(is_active),
            (None, Some(alert_type)) => AlertFilter::Type(alert_type),
            (None, None) => AlertFilter::All,
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn create(&self, user: &User) -> AppResult<User>;
    async fn list_all(&self) -> AppResult<Vec<User>>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(user) = self.find_by_id(*id).await? {
                users.push(user);
            }
        }
        Ok(users)
    }
    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

#[async_trait]
pub trait IncidentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Incident>>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Incident>> {
        let mut incidents = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(incident) = self.find_by_id(*id).await? {
                incidents.push(incident);
            }
        }
        Ok(incidents)
    }
    /// Newest first.
    async fn list(&self, filter: IncidentFilter, limit: i64) -> AppResult<Vec<Incident>>;
    async fn list_all(&self) -> AppResult<Vec<Incident>>;
    /// Full-text match on the description.
    async fn search(
        &self,
        query: &str,
        incident_type: Option<IncidentType>,
        severity: Option<Severity>,
        limit: i64,
    ) -> AppResult<Vec<Incident>>;
    async fn create(&self, incident: &Incident) -> AppResult<Incident>;
    /// Sets status and replaces the assignee. `None` when the incident does not exist.
    async fn update_status(
        &self,
        id: Uuid,
        status: IncidentStatus,
        assigned_to: Option<Uuid>,
    ) -> AppResult<Option<Incident>>;
}

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>>;
    async fn list(&self, filter: ResourceFilter) -> AppResult<Vec<Resource>>;
    async fn list_all(&self) -> AppResult<Vec<Resource>>;
    async fn find_available_by_type(&self, resource_type: ResourceType) -> AppResult<Vec<Resource>>;
    async fn create(&self, resource: &Resource) -> AppResult<Resource>;
    async fn update_status(
        &self,
        id: Uuid,
        status: ResourceStatus,
        assigned_to: Option<Uuid>,
        available: i32,
    ) -> AppResult<Option<Resource>>;
}

#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Volunteer>>;
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Volunteer>>;
    async fn list(&self, availability: Option<Availability>) -> AppResult<Vec<Volunteer>>;
    async fn list_all(&self) -> AppResult<Vec<Volunteer>> {
        self.list(None).await
    }
    async fn create(&self, volunteer: &Volunteer) -> AppResult<Volunteer>;
    async fn update(&self, volunteer: &Volunteer) -> AppResult<Volunteer>;
    async fn assign(&self, id: Uuid, incident_id: Uuid) -> AppResult<Option<Volunteer>>;
}

#[async_trait]
pub trait AlertRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Alert>>;
    /// Newest first.
    async fn list(&self, filter: AlertFilter) -> AppResult<Vec<Alert>>;
    async fn create(&self, alert: &Alert) -> AppResult<Alert>;
    async fn deactivate(&self, id: Uuid) -> AppResult<Option<Alert>>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;
    /// Newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        is_read: Option<bool>,
        limit: i64,
    ) -> AppResult<Vec<Notification>>;
    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64>;
    async fn create(&self, notification: &Notification) -> AppResult<Notification>;
    async fn mark_as_read(&self, id: Uuid) -> AppResult<Option<Notification>>;
    async fn mark_all_as_read(&self, user_id: Uuid) -> AppResult<u64>;
}
