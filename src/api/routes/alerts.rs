use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::api::dtos::{AlertQuery, CreateAlertRequest, NearbyAlertsQuery};
use crate::api::routes::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/alerts")
            .route("", web::get().to(list_alerts))
            .route("", web::post().to(create_alert))
            .route("/active", web::get().to(active_alerts))
            .route("/nearby", web::get().to(nearby_alerts))
            .route("/{id}/deactivate", web::post().to(deactivate_alert)),
    );
}

#[utoipa::path(
    get,
    path = "/api/v1/alerts",
    params(AlertQuery),
    responses((status = 200, body = [crate::api::dtos::AlertResponse])),
    security(("bearer_auth" = [])),
    tag = "alerts"
)]
pub async fn list_alerts(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    query: web::Query<AlertQuery>,
) -> AppResult<HttpResponse> {
    let result = state.alert_service.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/alerts",
    request_body = CreateAlertRequest,
    responses(
        (status = 201, description = "Alert stored and notifications fanned out", body = crate::api::dtos::CreateAlertResponse),
        (status = 400, description = "Validation failed", body = crate::api::dtos::ErrorResponse),
        (status = 404, description = "Related incident not found", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "alerts"
)]
pub async fn create_alert(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<CreateAlertRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .alert_service
        .create(auth.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/alerts/active",
    responses((status = 200, description = "Active, unexpired alerts", body = [crate::api::dtos::AlertResponse])),
    security(("bearer_auth" = [])),
    tag = "alerts"
)]
pub async fn active_alerts(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let result = state.alert_service.active().await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/alerts/nearby",
    params(NearbyAlertsQuery),
    responses(
        (status = 200, description = "Active alerts concerning the point", body = [crate::api::dtos::AlertResponse]),
        (status = 400, description = "Non-positive radius", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "alerts"
)]
pub async fn nearby_alerts(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    query: web::Query<NearbyAlertsQuery>,
) -> AppResult<HttpResponse> {
    let result = state.alert_service.by_location(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/alerts/{id}/deactivate",
    params(("id" = Uuid, Path, description = "Alert id")),
    responses(
        (status = 200, body = crate::api::dtos::AlertResponse),
        (status = 404, description = "No such alert", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "alerts"
)]
pub async fn deactivate_alert(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state.alert_service.deactivate(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}
