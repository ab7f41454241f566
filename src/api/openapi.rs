use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::dtos::{
    AlertResponse, AssignVolunteerRequest, ContactInfoDto, CreateAlertRequest,
    CreateAlertResponse, CreateIncidentRequest, CreateNotificationRequest, CreateResourceRequest,
    DeliveryReport, EmergencyContactDto, ErrorResponse, ImageResponse, IncidentResponse,
    IncidentStatsResponse, IncidentSummary, LocationDto, MarkAllReadResponse,
    NotificationResponse, RegisterVolunteerRequest, ResourceResponse, ResourceStatsResponse,
    TargetAreaDto, UnreadCountResponse, UpdateIncidentStatusRequest, UpdateResourceStatusRequest,
    UpdateVolunteerRequest, UploadUrlResponse, ValidationIssue, VolunteerResponse,
    VolunteerStatsResponse,
};
use crate::domain::{
    AlertType, Availability, IncidentStatus, IncidentType, NotificationType, ResourceStatus,
    ResourceType, Severity, UserSummary,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::routes::health,
        crate::api::routes::ready,
        crate::api::routes::incidents::list_incidents,
        crate::api::routes::incidents::create_incident,
        crate::api::routes::incidents::search_incidents,
        crate::api::routes::incidents::incident_stats,
        crate::api::routes::incidents::upload_url,
        crate::api::routes::incidents::get_incident,
        crate::api::routes::incidents::update_incident_status,
        crate::api::routes::resources::list_resources,
        crate::api::routes::resources::create_resource,
        crate::api::routes::resources::available_resources,
        crate::api::routes::resources::resource_stats,
        crate::api::routes::resources::get_resource,
        crate::api::routes::resources::update_resource_status,
        crate::api::routes::volunteers::list_volunteers,
        crate::api::routes::volunteers::register_volunteer,
        crate::api::routes::volunteers::my_profile,
        crate::api::routes::volunteers::update_my_profile,
        crate::api::routes::volunteers::profile_by_user,
        crate::api::routes::volunteers::available_volunteers,
        crate::api::routes::volunteers::volunteer_stats,
        crate::api::routes::volunteers::assign_volunteer,
        crate::api::routes::alerts::list_alerts,
        crate::api::routes::alerts::create_alert,
        crate::api::routes::alerts::active_alerts,
        crate::api::routes::alerts::nearby_alerts,
        crate::api::routes::alerts::deactivate_alert,
        crate::api::routes::notifications::list_notifications,
        crate::api::routes::notifications::create_notification,
        crate::api::routes::notifications::unread_count,
        crate::api::routes::notifications::mark_all_read,
        crate::api::routes::notifications::mark_read,
    ),
    components(
        schemas(
            ErrorResponse,
            ValidationIssue,
            LocationDto,
            UserSummary,
            IncidentType,
            IncidentStatus,
            Severity,
            ResourceType,
            ResourceStatus,
            Availability,
            AlertType,
            NotificationType,
            ContactInfoDto,
            CreateIncidentRequest,
            UpdateIncidentStatusRequest,
            ImageResponse,
            IncidentResponse,
            IncidentSummary,
            IncidentStatsResponse,
            UploadUrlResponse,
            CreateResourceRequest,
            UpdateResourceStatusRequest,
            ResourceResponse,
            ResourceStatsResponse,
            EmergencyContactDto,
            RegisterVolunteerRequest,
            UpdateVolunteerRequest,
            AssignVolunteerRequest,
            VolunteerResponse,
            VolunteerStatsResponse,
            TargetAreaDto,
            CreateAlertRequest,
            AlertResponse,
            DeliveryReport,
            CreateAlertResponse,
            CreateNotificationRequest,
            NotificationResponse,
            UnreadCountResponse,
            MarkAllReadResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "incidents", description = "Incident reporting and triage"),
        (name = "resources", description = "Resource inventory and deployment"),
        (name = "volunteers", description = "Volunteer registry and assignment"),
        (name = "alerts", description = "Broadcast and geo-targeted alerts"),
        (name = "notifications", description = "Per-user notification inbox"),
        (name = "health", description = "Health check endpoints"),
    ),
    info(
        title = "Relief Backend API",
        version = "0.1.0",
        description = "Disaster-response coordination backend API"
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
