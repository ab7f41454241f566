use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::mapper::{load_incident_summaries, load_user_summaries, map_volunteer};
use super::targeting::volunteers_with_any_skill;
use crate::api::dtos::{
    AssignVolunteerRequest, AvailableVolunteersQuery, RegisterVolunteerRequest,
    UpdateVolunteerRequest, VolunteerQuery, VolunteerResponse, VolunteerStatsResponse,
};
use crate::domain::stats::{tally, tally_labels};
use crate::domain::{retain_within, Availability, DomainError, Notification, Volunteer};
use crate::error::AppResult;
use crate::infrastructure::repositories::{
    IncidentRepository, NotificationRepository, UserRepository, VolunteerRepository,
};

#[derive(Clone)]
pub struct VolunteerService {
    volunteer_repo: Arc<dyn VolunteerRepository>,
    user_repo: Arc<dyn UserRepository>,
    incident_repo: Arc<dyn IncidentRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
}

impl VolunteerService {
    pub fn new(
        volunteer_repo: Arc<dyn VolunteerRepository>,
        user_repo: Arc<dyn UserRepository>,
        incident_repo: Arc<dyn IncidentRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            volunteer_repo,
            user_repo,
            incident_repo,
            notification_repo,
        }
    }

    /// Filters by availability, then keeps volunteers with any requested skill. No skills
    /// means no skill filter.
    pub async fn list(&self, query: VolunteerQuery) -> AppResult<Vec<VolunteerResponse>> {
        let skills = query.skill_list();
        let mut volunteers = self.volunteer_repo.list(query.availability).await?;
        if !skills.is_empty() {
            volunteers = volunteers_with_any_skill(volunteers, &skills);
        }
        self.to_responses(volunteers).await
    }

    pub async fn get_by_user(&self, user_id: Uuid) -> AppResult<VolunteerResponse> {
        let volunteer = self.find_by_user(user_id).await?;
        let mut responses = self.to_responses(vec![volunteer]).await?;
        Ok(responses.remove(0))
    }

    pub async fn register(
        &self,
        user_id: Uuid,
        request: RegisterVolunteerRequest,
    ) -> AppResult<VolunteerResponse> {
        request.validate()?;

        if self.volunteer_repo.find_by_user(user_id).await?.is_some() {
            return Err(DomainError::Conflict(
                "user is already registered as a volunteer".to_string(),
            )
            .into());
        }

        let now = Utc::now();
        let volunteer = Volunteer {
            id: Uuid::new_v4(),
            user_id,
            skills: request.skills,
            availability: Availability::Available,
            location: request.location.into(),
            phone: request.phone,
            emergency_contact_name: request.emergency_contact.name,
            emergency_contact_phone: request.emergency_contact.phone,
            certifications: request.certifications,
            assigned_incident: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.volunteer_repo.create(&volunteer).await?;
        info!(volunteer_id = %created.id, user_id = %user_id, "volunteer registered");

        let mut responses = self.to_responses(vec![created]).await?;
        Ok(responses.remove(0))
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateVolunteerRequest,
    ) -> AppResult<VolunteerResponse> {
        request.validate()?;
        let mut volunteer = self.find_by_user(user_id).await?;

        if let Some(skills) = request.skills {
            volunteer.skills = skills;
        }
        if let Some(availability) = request.availability {
            volunteer.availability = availability;
        }
        if let Some(location) = request.location {
            volunteer.location = location.into();
        }
        if let Some(phone) = request.phone {
            volunteer.phone = phone;
        }
        if let Some(contact) = request.emergency_contact {
            volunteer.emergency_contact_name = contact.name;
            volunteer.emergency_contact_phone = contact.phone;
        }
        if let Some(certifications) = request.certifications {
            volunteer.certifications = certifications;
        }

        let updated = self.volunteer_repo.update(&volunteer).await?;
        let mut responses = self.to_responses(vec![updated]).await?;
        Ok(responses.remove(0))
    }

    /// Puts a volunteer on an incident, marks them busy and notifies their user.
    pub async fn assign(
        &self,
        volunteer_id: Uuid,
        request: AssignVolunteerRequest,
    ) -> AppResult<VolunteerResponse> {
        let incident = self
            .incident_repo
            .find_by_id(request.incident_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Incident", request.incident_id))?;

        let assigned = self
            .volunteer_repo
            .assign(volunteer_id, incident.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Volunteer", volunteer_id))?;

        let notification = Notification::incident_assigned(
            assigned.user_id,
            "Assigned to Incident",
            &incident.title,
            incident.id,
        );
        if let Err(error) = self.notification_repo.create(&notification).await {
            warn!(
                volunteer_id = %volunteer_id,
                user_id = %assigned.user_id,
                error = %error,
                "assignment notification failed"
            );
        }
        info!(volunteer_id = %volunteer_id, incident_id = %incident.id, "volunteer assigned");

        let mut responses = self.to_responses(vec![assigned]).await?;
        Ok(responses.remove(0))
    }

    /// Available volunteers with any of the requested skills, narrowed to the requested
    /// area when a point is given. An empty skill list matches nobody.
    pub async fn available_by_skills(
        &self,
        query: AvailableVolunteersQuery,
    ) -> AppResult<Vec<VolunteerResponse>> {
        let area = query.location().target_area()?;
        let skills = query.skill_list();

        let available = self.volunteer_repo.list(Some(Availability::Available)).await?;
        let mut volunteers = volunteers_with_any_skill(available, &skills);
        if let Some(area) = area {
            volunteers = retain_within(volunteers, &area);
        }
        self.to_responses(volunteers).await
    }

    pub async fn stats(&self) -> AppResult<VolunteerStatsResponse> {
        let volunteers = self.volunteer_repo.list_all().await?;
        Ok(VolunteerStatsResponse {
            total: volunteers.len() as i64,
            by_availability: tally(
                &Availability::ALL,
                volunteers.iter().map(|volunteer| volunteer.availability),
            ),
            skills: tally_labels(volunteers.iter().flat_map(|volunteer| &volunteer.skills)),
        })
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Volunteer> {
        self.volunteer_repo
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("no volunteer profile for user {user_id}")).into()
            })
    }

    async fn to_responses(&self, volunteers: Vec<Volunteer>) -> AppResult<Vec<VolunteerResponse>> {
        let user_ids = volunteers.iter().map(|volunteer| volunteer.user_id);
        let users = load_user_summaries(self.user_repo.as_ref(), user_ids).await?;
        let incident_ids = volunteers.iter().filter_map(|volunteer| volunteer.assigned_incident);
        let incidents = load_incident_summaries(self.incident_repo.as_ref(), incident_ids).await?;
        Ok(volunteers
            .into_iter()
            .map(|volunteer| map_volunteer(volunteer, &users, &incidents))
            .collect())
    }
}
