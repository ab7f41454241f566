use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::api::dtos::{CreateNotificationRequest, NotificationQuery};
use crate::api::routes::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications")
            .route("", web::get().to(list_notifications))
            .route("", web::post().to(create_notification))
            .route("/unread-count", web::get().to(unread_count))
            .route("/read-all", web::post().to(mark_all_read))
            .route("/{id}/read", web::post().to(mark_read)),
    );
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    params(NotificationQuery),
    responses((status = 200, description = "The caller's notifications, newest first", body = [crate::api::dtos::NotificationResponse])),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn list_notifications(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<NotificationQuery>,
) -> AppResult<HttpResponse> {
    let result = state
        .notification_service
        .list(auth.user_id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, body = crate::api::dtos::NotificationResponse),
        (status = 400, description = "Validation failed", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn create_notification(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    payload: web::Json<CreateNotificationRequest>,
) -> AppResult<HttpResponse> {
    let result = state
        .notification_service
        .create(payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications/unread-count",
    responses((status = 200, body = crate::api::dtos::UnreadCountResponse)),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn unread_count(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let result = state.notification_service.unread_count(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/read-all",
    responses((status = 200, body = crate::api::dtos::MarkAllReadResponse)),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn mark_all_read(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let result = state
        .notification_service
        .mark_all_as_read(auth.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, body = crate::api::dtos::NotificationResponse),
        (status = 403, description = "Belongs to another user", body = crate::api::dtos::ErrorResponse),
        (status = 404, description = "No such notification", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn mark_read(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state
        .notification_service
        .mark_as_read(auth.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
