use chrono::{Duration, Utc};
use relief_backend::api::dtos::{
    CreateAlertRequest, CreateIncidentRequest, EmergencyContactDto, LocationDto,
    RegisterVolunteerRequest, TargetAreaDto,
};
use relief_backend::domain::{
    Alert, AlertType, Availability, Incident, IncidentStatus, IncidentType, Location, Resource,
    ResourceStatus, ResourceType, Severity, User, Volunteer,
};
use uuid::Uuid;

/// 1° of longitude on the equator, in km.
pub const KM_PER_DEGREE: f64 = 111.194_926_644_558_73;

pub fn location(latitude: f64, longitude: f64) -> Location {
    Location {
        latitude,
        longitude,
        address: format!("{latitude}, {longitude}"),
    }
}

pub fn location_dto(latitude: f64, longitude: f64) -> LocationDto {
    location(latitude, longitude).into()
}

/// A point `km` east of (0, 0) along the equator.
pub fn km_east(km: f64) -> Location {
    location(0.0, km / KM_PER_DEGREE)
}

pub fn test_user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: Some(email.split('@').next().unwrap_or(email).to_string()),
        created_at: now,
        updated_at: now,
    }
}

pub fn test_incident(reported_by: Uuid) -> Incident {
    let now = Utc::now();
    Incident {
        id: Uuid::new_v4(),
        title: "Warehouse fire".to_string(),
        description: "Smoke visible from the north side".to_string(),
        incident_type: IncidentType::Fire,
        severity: Severity::High,
        status: IncidentStatus::Reported,
        location: location(40.7128, -74.0060),
        reported_by,
        assigned_to: None,
        images: Vec::new(),
        tags: vec!["fire".to_string(), "urgent".to_string()],
        contact_phone: None,
        contact_email: None,
        created_at: now,
        updated_at: now,
    }
}

/// An incident created `minutes_ago` minutes in the past.
pub fn aged_incident(reported_by: Uuid, minutes_ago: i64) -> Incident {
    let mut incident = test_incident(reported_by);
    incident.created_at = Utc::now() - Duration::minutes(minutes_ago);
    incident.updated_at = incident.created_at;
    incident
}

pub fn test_resource(resource_type: ResourceType, at: Location) -> Resource {
    let now = Utc::now();
    Resource {
        id: Uuid::new_v4(),
        name: format!("{resource_type} unit"),
        resource_type,
        quantity: 10,
        available: 10,
        location: at,
        status: ResourceStatus::Available,
        assigned_to: None,
        contact_person: "Dispatch".to_string(),
        contact_phone: "555-0100".to_string(),
        description: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_volunteer(user_id: Uuid, at: Location, skills: &[&str]) -> Volunteer {
    let now = Utc::now();
    Volunteer {
        id: Uuid::new_v4(),
        user_id,
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        availability: Availability::Available,
        location: at,
        phone: "555-0101".to_string(),
        emergency_contact_name: "Next of kin".to_string(),
        emergency_contact_phone: "555-0102".to_string(),
        certifications: Vec::new(),
        assigned_incident: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_alert(created_by: Uuid, target: Option<(f64, f64, f64)>) -> Alert {
    let now = Utc::now();
    Alert {
        id: Uuid::new_v4(),
        title: "Flash flood".to_string(),
        message: "Move to higher ground".to_string(),
        alert_type: AlertType::Warning,
        severity: Severity::High,
        target_latitude: target.map(|t| t.0),
        target_longitude: target.map(|t| t.1),
        target_radius_km: target.map(|t| t.2),
        is_active: true,
        expires_at: None,
        created_by,
        related_incident: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn create_incident_request(description: &str) -> CreateIncidentRequest {
    CreateIncidentRequest {
        title: "Building fire".to_string(),
        description: description.to_string(),
        incident_type: IncidentType::Fire,
        severity: Severity::Critical,
        location: location_dto(40.7128, -74.0060),
        images: Vec::new(),
        contact_info: None,
    }
}

pub fn register_volunteer_request(skills: &[&str]) -> RegisterVolunteerRequest {
    RegisterVolunteerRequest {
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        location: location_dto(0.0, 0.0),
        phone: "555-0199".to_string(),
        emergency_contact: EmergencyContactDto {
            name: "Sam".to_string(),
            phone: "555-0198".to_string(),
        },
        certifications: vec!["CPR".to_string()],
    }
}

pub fn create_alert_request(target_area: Option<TargetAreaDto>) -> CreateAlertRequest {
    CreateAlertRequest {
        title: "Evacuate".to_string(),
        message: "Leave the river district now".to_string(),
        alert_type: AlertType::Emergency,
        severity: Severity::Critical,
        target_area,
        expires_at: None,
        related_incident: None,
    }
}
