use super::traits::NotificationRepository;
use crate::domain::Notification;
use crate::error::AppResult;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, title, message, notification_type, is_read, related_id, created_at";

pub struct NotificationRepositoryImpl {
    pool: PgPool,
}

impl NotificationRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(notification)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        is_read: Option<bool>,
        limit: i64,
    ) -> AppResult<Vec<Notification>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE user_id = "
        ));
        builder.push_bind(user_id);
        if let Some(is_read) = is_read {
            builder.push(" AND is_read = ");
            builder.push_bind(is_read);
        }
        builder.push(" ORDER BY created_at DESC LIMIT ");
        builder.push_bind(limit);

        let notifications = builder
            .build_query_as::<Notification>()
            .fetch_all(&self.pool)
            .await?;
        Ok(notifications)
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn create(&self, notification: &Notification) -> AppResult<Notification> {
        let created = sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (
                id, user_id, title, message, notification_type, is_read, related_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(notification.id)
        .bind(notification.user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.notification_type)
        .bind(notification.is_read)
        .bind(&notification.related_id)
        .bind(notification.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn mark_as_read(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(notification)
    }

    async fn mark_all_as_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND NOT is_read")
                .bind(user_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }
}
