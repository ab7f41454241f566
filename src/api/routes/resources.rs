use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::api::dtos::{
    AvailableResourcesQuery, CreateResourceRequest, ResourceQuery, UpdateResourceStatusRequest,
};
use crate::api::routes::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/resources")
            .route("", web::get().to(list_resources))
            .route("", web::post().to(create_resource))
            .route("/available", web::get().to(available_resources))
            .route("/stats", web::get().to(resource_stats))
            .route("/{id}", web::get().to(get_resource))
            .route("/{id}/status", web::patch().to(update_resource_status)),
    );
}

#[utoipa::path(
    get,
    path = "/api/v1/resources",
    params(ResourceQuery),
    responses((status = 200, body = [crate::api::dtos::ResourceResponse])),
    security(("bearer_auth" = [])),
    tag = "resources"
)]
pub async fn list_resources(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    query: web::Query<ResourceQuery>,
) -> AppResult<HttpResponse> {
    let result = state.resource_service.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/resources",
    request_body = CreateResourceRequest,
    responses(
        (status = 201, body = crate::api::dtos::ResourceResponse),
        (status = 400, description = "Validation failed", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "resources"
)]
pub async fn create_resource(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    payload: web::Json<CreateResourceRequest>,
) -> AppResult<HttpResponse> {
    let result = state.resource_service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/available",
    params(AvailableResourcesQuery),
    responses(
        (status = 200, description = "Available resources of the type, near the point when given", body = [crate::api::dtos::ResourceResponse]),
        (status = 400, description = "Non-positive radius", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "resources"
)]
pub async fn available_resources(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    query: web::Query<AvailableResourcesQuery>,
) -> AppResult<HttpResponse> {
    let result = state
        .resource_service
        .available_by_type(query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/stats",
    responses((status = 200, body = crate::api::dtos::ResourceStatsResponse)),
    security(("bearer_auth" = [])),
    tag = "resources"
)]
pub async fn resource_stats(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let result = state.resource_service.stats().await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/{id}",
    params(("id" = Uuid, Path, description = "Resource id")),
    responses(
        (status = 200, body = crate::api::dtos::ResourceResponse),
        (status = 404, description = "No such resource", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "resources"
)]
pub async fn get_resource(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state.resource_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    patch,
    path = "/api/v1/resources/{id}/status",
    params(("id" = Uuid, Path, description = "Resource id")),
    request_body = UpdateResourceStatusRequest,
    responses(
        (status = 200, body = crate::api::dtos::ResourceResponse),
        (status = 400, description = "Validation failed", body = crate::api::dtos::ErrorResponse),
        (status = 404, description = "No such resource", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "resources"
)]
pub async fn update_resource_status(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateResourceStatusRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .resource_service
        .update_status(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
