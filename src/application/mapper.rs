use std::collections::HashMap;

use uuid::Uuid;

use crate::api::dtos::{
    AlertResponse, ContactInfoDto, EmergencyContactDto, ImageResponse, IncidentResponse,
    IncidentSummary, ResourceResponse, VolunteerResponse,
};
use crate::domain::{Alert, Incident, Resource, User, UserSummary, Volunteer};
use crate::error::AppResult;
use crate::infrastructure::repositories::{IncidentRepository, UserRepository};
use crate::infrastructure::storage::BlobStore;

pub type UserSummaries = HashMap<Uuid, UserSummary>;
pub type IncidentSummaries = HashMap<Uuid, IncidentSummary>;

pub async fn load_user_summaries(
    repo: &dyn UserRepository,
    ids: impl IntoIterator<Item = Uuid>,
) -> AppResult<UserSummaries> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    let users = repo.find_by_ids(&ids).await?;
    Ok(users
        .iter()
        .map(|user: &User| (user.id, UserSummary::from(user)))
        .collect())
}

pub async fn load_incident_summaries(
    repo: &dyn IncidentRepository,
    ids: impl IntoIterator<Item = Uuid>,
) -> AppResult<IncidentSummaries> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    let incidents = repo.find_by_ids(&ids).await?;
    Ok(incidents
        .into_iter()
        .map(|incident| (incident.id, incident_summary(&incident)))
        .collect())
}

pub fn incident_summary(incident: &Incident) -> IncidentSummary {
    IncidentSummary {
        title: incident.title.clone(),
        status: incident.status,
    }
}

pub fn map_incident(
    incident: Incident,
    users: &UserSummaries,
    blob_store: &dyn BlobStore,
) -> IncidentResponse {
    let contact_info = if incident.contact_phone.is_some() || incident.contact_email.is_some() {
        Some(ContactInfoDto {
            phone: incident.contact_phone,
            email: incident.contact_email,
        })
    } else {
        None
    };

    IncidentResponse {
        id: incident.id,
        title: incident.title,
        description: incident.description,
        incident_type: incident.incident_type,
        severity: incident.severity,
        status: incident.status,
        location: incident.location.into(),
        reported_by: incident.reported_by,
        reporter: users.get(&incident.reported_by).cloned(),
        assigned_to: incident.assigned_to,
        assignee: incident.assigned_to.and_then(|id| users.get(&id).cloned()),
        images: incident
            .images
            .into_iter()
            .map(|storage_id| ImageResponse {
                storage_id,
                url: blob_store.public_url(storage_id),
            })
            .collect(),
        tags: incident.tags,
        contact_info,
        created_at: incident.created_at,
        updated_at: incident.updated_at,
    }
}

pub fn map_resource(resource: Resource, incidents: &IncidentSummaries) -> ResourceResponse {
    ResourceResponse {
        id: resource.id,
        name: resource.name,
        resource_type: resource.resource_type,
        quantity: resource.quantity,
        available: resource.available,
        location: resource.location.into(),
        status: resource.status,
        assigned_to: resource.assigned_to,
        assigned_incident: resource.assigned_to.and_then(|id| incidents.get(&id).cloned()),
        contact_person: resource.contact_person,
        contact_phone: resource.contact_phone,
        description: resource.description,
        created_at: resource.created_at,
        updated_at: resource.updated_at,
    }
}

pub fn map_volunteer(
    volunteer: Volunteer,
    users: &UserSummaries,
    incidents: &IncidentSummaries,
) -> VolunteerResponse {
    VolunteerResponse {
        id: volunteer.id,
        user_id: volunteer.user_id,
        user: users.get(&volunteer.user_id).cloned(),
        skills: volunteer.skills,
        availability: volunteer.availability,
        location: volunteer.location.into(),
        phone: volunteer.phone,
        emergency_contact: EmergencyContactDto {
            name: volunteer.emergency_contact_name,
            phone: volunteer.emergency_contact_phone,
        },
        certifications: volunteer.certifications,
        incident: volunteer
            .assigned_incident
            .and_then(|id| incidents.get(&id).cloned()),
        assigned_incident: volunteer.assigned_incident,
        created_at: volunteer.created_at,
        updated_at: volunteer.updated_at,
    }
}

pub fn map_alert(alert: Alert, users: &UserSummaries, incidents: &IncidentSummaries) -> AlertResponse {
    AlertResponse {
        target_area: alert.target_area().map(Into::into),
        creator: users.get(&alert.created_by).cloned(),
        incident: alert.related_incident.and_then(|id| incidents.get(&id).cloned()),
        id: alert.id,
        title: alert.title,
        message: alert.message,
        alert_type: alert.alert_type,
        severity: alert.severity,
        is_active: alert.is_active,
        expires_at: alert.expires_at,
        created_by: alert.created_by,
        related_incident: alert.related_incident,
        created_at: alert.created_at,
        updated_at: alert.updated_at,
    }
}
