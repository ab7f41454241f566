use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api::dtos::{
    CreateNotificationRequest, MarkAllReadResponse, NotificationQuery, NotificationResponse,
    UnreadCountResponse,
};
use crate::config::defaults::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::domain::{DomainError, Notification};
use crate::error::AppResult;
use crate::infrastructure::repositories::{NotificationRepository, UserRepository};

#[derive(Clone)]
pub struct NotificationService {
    notification_repo: Arc<dyn NotificationRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl NotificationService {
    pub fn new(
        notification_repo: Arc<dyn NotificationRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            notification_repo,
            user_repo,
        }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        query: NotificationQuery,
    ) -> AppResult<Vec<NotificationResponse>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        let notifications = self
            .notification_repo
            .list_for_user(user_id, query.is_read, limit)
            .await?;
        Ok(notifications.into_iter().map(Into::into).collect())
    }

    pub async fn unread_count(&self, user_id: Uuid) -> AppResult<UnreadCountResponse> {
        let count = self.notification_repo.count_unread(user_id).await?;
        Ok(UnreadCountResponse { count })
    }

    pub async fn mark_as_read(&self, user_id: Uuid, id: Uuid) -> AppResult<NotificationResponse> {
        let notification = self
            .notification_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Notification", id))?;

        if notification.user_id != user_id {
            return Err(DomainError::Forbidden(
                "notification belongs to another user".to_string(),
            )
            .into());
        }

        let updated = self
            .notification_repo
            .mark_as_read(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Notification", id))?;
        Ok(updated.into())
    }

    pub async fn mark_all_as_read(&self, user_id: Uuid) -> AppResult<MarkAllReadResponse> {
        let updated = self.notification_repo.mark_all_as_read(user_id).await?;
        info!(user_id = %user_id, updated, "notifications marked read");
        Ok(MarkAllReadResponse { updated })
    }

    pub async fn create(&self, request: CreateNotificationRequest) -> AppResult<NotificationResponse> {
        request.validate()?;

        if !self.user_repo.exists(request.user_id).await? {
            return Err(DomainError::not_found("User", request.user_id).into());
        }

        let notification = Notification::unread(
            request.user_id,
            request.title,
            request.message,
            request.notification_type,
            request.related_id,
        );
        let created = self.notification_repo.create(&notification).await?;
        Ok(created.into())
    }
}
