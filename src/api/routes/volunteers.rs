use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::api::dtos::{
    AssignVolunteerRequest, AvailableVolunteersQuery, RegisterVolunteerRequest,
    UpdateVolunteerRequest, VolunteerQuery,
};
use crate::api::routes::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/volunteers")
            .route("", web::get().to(list_volunteers))
            .route("", web::post().to(register_volunteer))
            .route("/me", web::get().to(my_profile))
            .route("/me", web::patch().to(update_my_profile))
            .route("/available", web::get().to(available_volunteers))
            .route("/stats", web::get().to(volunteer_stats))
            .route("/users/{user_id}", web::get().to(profile_by_user))
            .route("/{id}/assign", web::post().to(assign_volunteer)),
    );
}

#[utoipa::path(
    get,
    path = "/api/v1/volunteers",
    params(VolunteerQuery),
    responses((status = 200, body = [crate::api::dtos::VolunteerResponse])),
    security(("bearer_auth" = [])),
    tag = "volunteers"
)]
pub async fn list_volunteers(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    query: web::Query<VolunteerQuery>,
) -> AppResult<HttpResponse> {
    let result = state.volunteer_service.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/volunteers",
    request_body = RegisterVolunteerRequest,
    responses(
        (status = 201, body = crate::api::dtos::VolunteerResponse),
        (status = 409, description = "Caller is already registered", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "volunteers"
)]
pub async fn register_volunteer(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<RegisterVolunteerRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .volunteer_service
        .register(auth.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/volunteers/me",
    responses(
        (status = 200, body = crate::api::dtos::VolunteerResponse),
        (status = 404, description = "Caller is not registered", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "volunteers"
)]
pub async fn my_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let result = state.volunteer_service.get_by_user(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    patch,
    path = "/api/v1/volunteers/me",
    request_body = UpdateVolunteerRequest,
    responses(
        (status = 200, body = crate::api::dtos::VolunteerResponse),
        (status = 400, description = "Validation failed", body = crate::api::dtos::ErrorResponse),
        (status = 404, description = "Caller is not registered", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "volunteers"
)]
pub async fn update_my_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<UpdateVolunteerRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .volunteer_service
        .update_profile(auth.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/volunteers/available",
    params(AvailableVolunteersQuery),
    responses((status = 200, body = [crate::api::dtos::VolunteerResponse])),
    security(("bearer_auth" = [])),
    tag = "volunteers"
)]
pub async fn available_volunteers(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    query: web::Query<AvailableVolunteersQuery>,
) -> AppResult<HttpResponse> {
    let result = state
        .volunteer_service
        .available_by_skills(query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/volunteers/stats",
    responses((status = 200, body = crate::api::dtos::VolunteerStatsResponse)),
    security(("bearer_auth" = [])),
    tag = "volunteers"
)]
pub async fn volunteer_stats(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let result = state.volunteer_service.stats().await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/volunteers/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, body = crate::api::dtos::VolunteerResponse),
        (status = 404, description = "User is not registered", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "volunteers"
)]
pub async fn profile_by_user(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state
        .volunteer_service
        .get_by_user(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/volunteers/{id}/assign",
    params(("id" = Uuid, Path, description = "Volunteer id")),
    request_body = AssignVolunteerRequest,
    responses(
        (status = 200, body = crate::api::dtos::VolunteerResponse),
        (status = 404, description = "Volunteer or incident not found", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "volunteers"
)]
pub async fn assign_volunteer(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<AssignVolunteerRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .volunteer_service
        .assign(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
