use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use relief_backend::domain::{
    Alert, Availability, Incident, IncidentStatus, IncidentType, Notification, Resource,
    ResourceStatus, ResourceType, Severity, User, Volunteer,
};
use relief_backend::error::{AppError, AppResult};
use relief_backend::infrastructure::repositories::{
    AlertFilter, AlertRepository, IncidentFilter, IncidentRepository, NotificationRepository,
    ResourceFilter, ResourceRepository, UserRepository, VolunteerRepository,
};
use relief_backend::infrastructure::storage::{BlobStore, UploadTicket};
use uuid::Uuid;

#[derive(Default)]
pub struct MockUserRepo {
    pub users: Mutex<Vec<User>>,
}

impl MockUserRepo {
    pub fn push(&self, user: User) {
        self.users.lock().expect("users mutex poisoned").push(user);
    }

    pub fn count(&self) -> usize {
        self.users.lock().expect("users mutex poisoned").len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .expect("users mutex poisoned")
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.lock().expect("users mutex poisoned");
        if users
            .iter()
            .any(|existing| existing.id == user.id || existing.email == user.email)
        {
            return Err(AppError::Conflict("email already registered".to_string()));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().expect("users mutex poisoned").clone())
    }
}

#[derive(Default)]
pub struct MockIncidentRepo {
    pub incidents: Mutex<Vec<Incident>>,
}

impl MockIncidentRepo {
    pub fn push(&self, incident: Incident) {
        self.incidents
            .lock()
            .expect("incidents mutex poisoned")
            .push(incident);
    }

    pub fn get(&self, id: Uuid) -> Option<Incident> {
        self.incidents
            .lock()
            .expect("incidents mutex poisoned")
            .iter()
            .find(|incident| incident.id == id)
            .cloned()
    }

    fn newest_first(&self, keep: impl Fn(&Incident) -> bool) -> Vec<Incident> {
        let mut incidents: Vec<Incident> = self
            .incidents
            .lock()
            .expect("incidents mutex poisoned")
            .iter()
            .filter(|incident| keep(incident))
            .cloned()
            .collect();
        incidents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        incidents
    }
}

#[async_trait]
impl IncidentRepository for MockIncidentRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Incident>> {
        Ok(self.get(id))
    }

    async fn list(&self, filter: IncidentFilter, limit: i64) -> AppResult<Vec<Incident>> {
        let mut incidents = self.newest_first(|incident| match filter {
            IncidentFilter::All => true,
            IncidentFilter::Status(status) => incident.status == status,
            IncidentFilter::Type(incident_type) => incident.incident_type == incident_type,
        });
        incidents.truncate(limit.max(0) as usize);
        Ok(incidents)
    }

    async fn list_all(&self) -> AppResult<Vec<Incident>> {
        Ok(self.newest_first(|_| true))
    }

    async fn search(
        &self,
        query: &str,
        incident_type: Option<IncidentType>,
        severity: Option<Severity>,
        limit: i64,
    ) -> AppResult<Vec<Incident>> {
        let words: Vec<String> = query
            .split_whitespace()
            .map(|word| word.to_lowercase())
            .collect();
        let mut incidents = self.newest_first(|incident| {
            let description = incident.description.to_lowercase();
            words.iter().all(|word| description.contains(word.as_str()))
                && incident_type.map_or(true, |t| incident.incident_type == t)
                && severity.map_or(true, |s| incident.severity == s)
        });
        incidents.truncate(limit.max(0) as usize);
        Ok(incidents)
    }

    async fn create(&self, incident: &Incident) -> AppResult<Incident> {
        self.push(incident.clone());
        Ok(incident.clone())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: IncidentStatus,
        assigned_to: Option<Uuid>,
    ) -> AppResult<Option<Incident>> {
        let mut incidents = self.incidents.lock().expect("incidents mutex poisoned");
        Ok(incidents
            .iter_mut()
            .find(|incident| incident.id == id)
            .map(|incident| {
                incident.status = status;
                incident.assigned_to = assigned_to;
                incident.updated_at = Utc::now();
                incident.clone()
            }))
    }
}

#[derive(Default)]
pub struct MockResourceRepo {
    pub resources: Mutex<Vec<Resource>>,
}

impl MockResourceRepo {
    pub fn push(&self, resource: Resource) {
        self.resources
            .lock()
            .expect("resources mutex poisoned")
            .push(resource);
    }

    fn newest_first(&self, keep: impl Fn(&Resource) -> bool) -> Vec<Resource> {
        let mut resources: Vec<Resource> = self
            .resources
            .lock()
            .expect("resources mutex poisoned")
            .iter()
            .filter(|resource| keep(resource))
            .cloned()
            .collect();
        resources.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        resources
    }
}

#[async_trait]
impl ResourceRepository for MockResourceRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        Ok(self.newest_first(|resource| resource.id == id).pop())
    }

    async fn list(&self, filter: ResourceFilter) -> AppResult<Vec<Resource>> {
        Ok(self.newest_first(|resource| match filter {
            ResourceFilter::All => true,
            ResourceFilter::Type(resource_type) => resource.resource_type == resource_type,
            ResourceFilter::Status(status) => resource.status == status,
        }))
    }

    async fn list_all(&self) -> AppResult<Vec<Resource>> {
        Ok(self.newest_first(|_| true))
    }

    async fn find_available_by_type(&self, resource_type: ResourceType) -> AppResult<Vec<Resource>> {
        Ok(self.newest_first(|resource| {
            resource.resource_type == resource_type && resource.status == ResourceStatus::Available
        }))
    }

    async fn create(&self, resource: &Resource) -> AppResult<Resource> {
        self.push(resource.clone());
        Ok(resource.clone())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ResourceStatus,
        assigned_to: Option<Uuid>,
        available: i32,
    ) -> AppResult<Option<Resource>> {
        let mut resources = self.resources.lock().expect("resources mutex poisoned");
        Ok(resources
            .iter_mut()
            .find(|resource| resource.id == id)
            .map(|resource| {
                resource.status = status;
                resource.assigned_to = assigned_to;
                resource.available = available;
                resource.updated_at = Utc::now();
                resource.clone()
            }))
    }
}

#[derive(Default)]
pub struct MockVolunteerRepo {
    pub volunteers: Mutex<Vec<Volunteer>>,
}

impl MockVolunteerRepo {
    pub fn push(&self, volunteer: Volunteer) {
        self.volunteers
            .lock()
            .expect("volunteers mutex poisoned")
            .push(volunteer);
    }

    pub fn get(&self, id: Uuid) -> Option<Volunteer> {
        self.volunteers
            .lock()
            .expect("volunteers mutex poisoned")
            .iter()
            .find(|volunteer| volunteer.id == id)
            .cloned()
    }
}

#[async_trait]
impl VolunteerRepository for MockVolunteerRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Volunteer>> {
        Ok(self.get(id))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Volunteer>> {
        Ok(self
            .volunteers
            .lock()
            .expect("volunteers mutex poisoned")
            .iter()
            .find(|volunteer| volunteer.user_id == user_id)
            .cloned())
    }

    async fn list(&self, availability: Option<Availability>) -> AppResult<Vec<Volunteer>> {
        Ok(self
            .volunteers
            .lock()
            .expect("volunteers mutex poisoned")
            .iter()
            .filter(|volunteer| availability.map_or(true, |a| volunteer.availability == a))
            .cloned()
            .collect())
    }

    async fn create(&self, volunteer: &Volunteer) -> AppResult<Volunteer> {
        self.push(volunteer.clone());
        Ok(volunteer.clone())
    }

    async fn update(&self, volunteer: &Volunteer) -> AppResult<Volunteer> {
        let mut volunteers = self.volunteers.lock().expect("volunteers mutex poisoned");
        if let Some(existing) = volunteers.iter_mut().find(|v| v.id == volunteer.id) {
            *existing = volunteer.clone();
        }
        Ok(volunteer.clone())
    }

    async fn assign(&self, id: Uuid, incident_id: Uuid) -> AppResult<Option<Volunteer>> {
        let mut volunteers = self.volunteers.lock().expect("volunteers mutex poisoned");
        Ok(volunteers
            .iter_mut()
            .find(|volunteer| volunteer.id == id)
            .map(|volunteer| {
                volunteer.assigned_incident = Some(incident_id);
                volunteer.availability = Availability::Busy;
                volunteer.clone()
            }))
    }
}

#[derive(Default)]
pub struct MockAlertRepo {
    pub alerts: Mutex<Vec<Alert>>,
}

impl MockAlertRepo {
    pub fn push(&self, alert: Alert) {
        self.alerts.lock().expect("alerts mutex poisoned").push(alert);
    }

    pub fn all(&self) -> Vec<Alert> {
        self.alerts.lock().expect("alerts mutex poisoned").clone()
    }
}

#[async_trait]
impl AlertRepository for MockAlertRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Alert>> {
        Ok(self.all().into_iter().find(|alert| alert.id == id))
    }

    async fn list(&self, filter: AlertFilter) -> AppResult<Vec<Alert>> {
        let mut alerts: Vec<Alert> = self
            .all()
            .into_iter()
            .filter(|alert| match filter {
                AlertFilter::All => true,
                AlertFilter::Active(is_active) => alert.is_active == is_active,
                AlertFilter::Type(alert_type) => alert.alert_type == alert_type,
            })
            .collect();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(alerts)
    }

    async fn create(&self, alert: &Alert) -> AppResult<Alert> {
        self.push(alert.clone());
        Ok(alert.clone())
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<Option<Alert>> {
        let mut alerts = self.alerts.lock().expect("alerts mutex poisoned");
        Ok(alerts.iter_mut().find(|alert| alert.id == id).map(|alert| {
            alert.is_active = false;
            alert.clone()
        }))
    }
}

/// Stores notifications in memory. Inserts for users in `failing_users` fail.
#[derive(Default)]
pub struct MockNotificationRepo {
    pub notifications: Mutex<Vec<Notification>>,
    pub failing_users: Mutex<HashSet<Uuid>>,
}

impl MockNotificationRepo {
    pub fn push(&self, notification: Notification) {
        self.notifications
            .lock()
            .expect("notifications mutex poisoned")
            .push(notification);
    }

    pub fn all(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("notifications mutex poisoned")
            .clone()
    }

    pub fn for_user(&self, user_id: Uuid) -> Vec<Notification> {
        self.all()
            .into_iter()
            .filter(|notification| notification.user_id == user_id)
            .collect()
    }

    pub fn fail_for(&self, user_id: Uuid) {
        self.failing_users
            .lock()
            .expect("failing users mutex poisoned")
            .insert(user_id);
    }
}

#[async_trait]
impl NotificationRepository for MockNotificationRepo {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        Ok(self.all().into_iter().find(|n| n.id == id))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        is_read: Option<bool>,
        limit: i64,
    ) -> AppResult<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .for_user(user_id)
            .into_iter()
            .filter(|n| is_read.map_or(true, |read| n.is_read == read))
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications.truncate(limit.max(0) as usize);
        Ok(notifications)
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        Ok(self.for_user(user_id).iter().filter(|n| !n.is_read).count() as i64)
    }

    async fn create(&self, notification: &Notification) -> AppResult<Notification> {
        let failing = self
            .failing_users
            .lock()
            .expect("failing users mutex poisoned")
            .contains(&notification.user_id);
        if failing {
            return Err(AppError::database_unavailable("notification store offline"));
        }
        self.push(notification.clone());
        Ok(notification.clone())
    }

    async fn mark_as_read(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let mut notifications = self
            .notifications
            .lock()
            .expect("notifications mutex poisoned");
        Ok(notifications.iter_mut().find(|n| n.id == id).map(|n| {
            n.is_read = true;
            n.clone()
        }))
    }

    async fn mark_all_as_read(&self, user_id: Uuid) -> AppResult<u64> {
        let mut notifications = self
            .notifications
            .lock()
            .expect("notifications mutex poisoned");
        let mut updated = 0;
        for n in notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            n.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }
}

pub const BLOB_BASE_URL: &str = "https://blobs.test";

/// Deterministic blob store for response mapping assertions.
#[derive(Default)]
pub struct FixedBlobStore;

impl BlobStore for FixedBlobStore {
    fn issue_upload_url(&self) -> AppResult<UploadTicket> {
        let storage_id = Uuid::new_v4();
        Ok(UploadTicket {
            storage_id,
            upload_url: format!("{BLOB_BASE_URL}/{storage_id}?token=test"),
            expires_at: Utc::now() + Duration::minutes(15),
        })
    }

    fn public_url(&self, storage_id: Uuid) -> String {
        format!("{BLOB_BASE_URL}/{storage_id}")
    }
}
