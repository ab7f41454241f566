use super::traits::{AlertFilter, AlertRepository};
use crate::domain::Alert;
use crate::error::AppResult;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const ALERT_COLUMNS: &str = "id, title, message, alert_type, severity, target_latitude, \
    target_longitude, target_radius_km, is_active, expires_at, created_by, related_incident, \
    created_at, updated_at";

pub struct AlertRepositoryImpl {
    pool: PgPool,
}

impl AlertRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertRepository for AlertRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Alert>> {
        let alert = sqlx::query_as::<_, Alert>(&format!(
            "SELECT {ALERT_COLUMNS} FROM alerts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(alert)
    }

    async fn list(&self, filter: AlertFilter) -> AppResult<Vec<Alert>> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {ALERT_COLUMNS} FROM alerts"));

        match filter {
            AlertFilter::All => {}
            AlertFilter::Active(is_active) => {
                builder.push(" WHERE is_active = ");
                builder.push_bind(is_active);
            }
            AlertFilter::Type(alert_type) => {
                builder.push(" WHERE alert_type = ");
                builder.push_bind(alert_type);
            }
        }
        builder.push(" ORDER BY created_at DESC");

        let alerts = builder.build_query_as::<Alert>().fetch_all(&self.pool).await?;
        Ok(alerts)
    }

    async fn create(&self, alert: &Alert) -> AppResult<Alert> {
        let created = sqlx::query_as::<_, Alert>(&format!(
            r#"
            INSERT INTO alerts (
                id, title, message, alert_type, severity, target_latitude, target_longitude,
                target_radius_km, is_active, expires_at, created_by, related_incident,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {ALERT_COLUMNS}
            "#
        ))
        .bind(alert.id)
        .bind(&alert.title)
        .bind(&alert.message)
        .bind(alert.alert_type)
        .bind(alert.severity)
        .bind(alert.target_latitude)
        .bind(alert.target_longitude)
        .bind(alert.target_radius_km)
        .bind(alert.is_active)
        .bind(alert.expires_at)
        .bind(alert.created_by)
        .bind(alert.related_incident)
        .bind(alert.created_at)
        .bind(alert.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<Option<Alert>> {
        let alert = sqlx::query_as::<_, Alert>(&format!(
            "UPDATE alerts SET is_active = FALSE, updated_at = now() WHERE id = $1 \
             RETURNING {ALERT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(alert)
    }
}
