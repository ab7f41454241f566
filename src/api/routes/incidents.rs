use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::api::dtos::{
    CreateIncidentRequest, IncidentQuery, IncidentSearchQuery, UpdateIncidentStatusRequest,
};
use crate::api::routes::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/incidents")
            .route("", web::get().to(list_incidents))
            .route("", web::post().to(create_incident))
            .route("/search", web::get().to(search_incidents))
            .route("/stats", web::get().to(incident_stats))
            .route("/upload-url", web::post().to(upload_url))
            .route("/{id}", web::get().to(get_incident))
            .route("/{id}/status", web::patch().to(update_incident_status)),
    );
}

#[utoipa::path(
    get,
    path = "/api/v1/incidents",
    params(IncidentQuery),
    responses(
        (status = 200, description = "Incidents, newest first", body = [crate::api::dtos::IncidentResponse]),
        (status = 401, description = "Missing or invalid token", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "incidents"
)]
pub async fn list_incidents(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    query: web::Query<IncidentQuery>,
) -> AppResult<HttpResponse> {
    let result = state.incident_service.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/incidents",
    request_body = CreateIncidentRequest,
    responses(
        (status = 201, description = "Incident reported", body = crate::api::dtos::IncidentResponse),
        (status = 400, description = "Validation failed", body = crate::api::dtos::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "incidents"
)]
pub async fn create_incident(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<CreateIncidentRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .incident_service
        .create(auth.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/incidents/search",
    params(IncidentSearchQuery),
    responses(
        (status = 200, description = "Full-text matches on description", body = [crate::api::dtos::IncidentResponse]),
    ),
    security(("bearer_auth" = [])),
    tag = "incidents"
)]
pub async fn search_incidents(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    query: web::Query<IncidentSearchQuery>,
) -> AppResult<HttpResponse> {
    let result = state.incident_service.search(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/incidents/stats",
    responses((status = 200, body = crate::api::dtos::IncidentStatsResponse)),
    security(("bearer_auth" = [])),
    tag = "incidents"
)]
pub async fn incident_stats(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let result = state.incident_service.stats().await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/incidents/upload-url",
    responses((status = 200, body = crate::api::dtos::UploadUrlResponse)),
    security(("bearer_auth" = [])),
    tag = "incidents"
)]
pub async fn upload_url(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let result = state.incident_service.upload_url()?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/incidents/{id}",
    params(("id" = Uuid, Path, description = "Incident id")),
    responses(
        (status = 200, body = crate::api::dtos::IncidentResponse),
        (status = 404, description = "No such incident", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "incidents"
)]
pub async fn get_incident(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state.incident_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    patch,
    path = "/api/v1/incidents/{id}/status",
    params(("id" = Uuid, Path, description = "Incident id")),
    request_body = UpdateIncidentStatusRequest,
    responses(
        (status = 200, body = crate::api::dtos::IncidentResponse),
        (status = 404, description = "Incident or assignee not found", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "incidents"
)]
pub async fn update_incident_status(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateIncidentStatusRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .incident_service
        .update_status(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
