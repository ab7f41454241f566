use std::sync::Arc;

use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use utoipa::OpenApi;

use crate::api::openapi::ApiDoc;
use crate::application::{
    AlertService, IncidentService, NotificationService, ResourceService, VolunteerService,
};
use crate::error::{AppError, AppResult};

pub mod alerts;
pub mod incidents;
pub mod notifications;
pub mod resources;
pub mod volunteers;

#[derive(Clone)]
pub struct AppState {
    pub incident_service: Arc<IncidentService>,
    pub resource_service: Arc<ResourceService>,
    pub volunteer_service: Arc<VolunteerService>,
    pub alert_service: Arc<AlertService>,
    pub notification_service: Arc<NotificationService>,
    /// `None` in tests that run against in-memory repositories.
    pub db_pool: Option<PgPool>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(incidents::configure)
            .configure(resources::configure)
            .configure(volunteers::configure)
            .configure(alerts::configure)
            .configure(notifications::configure),
    )
    .route("/health", web::get().to(health))
    .route("/ready", web::get().to(ready))
    .route("/api-docs/openapi.json", web::get().to(openapi_json));
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check passed")
    ),
    tag = "health"
)]
pub async fn health() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Readiness check passed"),
        (status = 503, description = "Service not ready"),
    ),
    tag = "health"
)]
pub async fn ready(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let pool = state
        .db_pool
        .as_ref()
        .ok_or_else(|| AppError::database_unavailable("no database pool configured"))?;
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database_unavailable(format!("Service not ready: {e}")))?;
    Ok(HttpResponse::Ok().body("ready"))
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
