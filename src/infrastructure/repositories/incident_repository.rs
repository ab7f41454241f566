use super::traits::{IncidentFilter, IncidentRepository};
use crate::domain::{Incident, IncidentStatus, IncidentType, Severity};
use crate::error::AppResult;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const INCIDENT_COLUMNS: &str = "id, title, description, incident_type, severity, status, \
    latitude, longitude, address, reported_by, assigned_to, images, tags, \
    contact_phone, contact_email, created_at, updated_at";

pub struct IncidentRepositoryImpl {
    pool: PgPool,
}

impl IncidentRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IncidentRepository for IncidentRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Incident>> {
        let incident = sqlx::query_as::<_, Incident>(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(incident)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Incident>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let incidents = sqlx::query_as::<_, Incident>(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(incidents)
    }

    async fn list(&self, filter: IncidentFilter, limit: i64) -> AppResult<Vec<Incident>> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {INCIDENT_COLUMNS} FROM incidents"));

        match filter {
            IncidentFilter::All => {}
            IncidentFilter::Status(status) => {
                builder.push(" WHERE status = ");
                builder.push_bind(status);
            }
            IncidentFilter::Type(incident_type) => {
                builder.push(" WHERE incident_type = ");
                builder.push_bind(incident_type);
            }
        }

        builder.push(" ORDER BY created_at DESC LIMIT ");
        builder.push_bind(limit);

        let incidents = builder
            .build_query_as::<Incident>()
            .fetch_all(&self.pool)
            .await?;
        Ok(incidents)
    }

    async fn list_all(&self) -> AppResult<Vec<Incident>> {
        let incidents = sqlx::query_as::<_, Incident>(&format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(incidents)
    }

    async fn search(
        &self,
        query: &str,
        incident_type: Option<IncidentType>,
        severity: Option<Severity>,
        limit: i64,
    ) -> AppResult<Vec<Incident>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {INCIDENT_COLUMNS} FROM incidents \
             WHERE to_tsvector('english', description) @@ plainto_tsquery('english', "
        ));
        builder.push_bind(query.to_string());
        builder.push(")");

        if let Some(incident_type) = incident_type {
            builder.push(" AND incident_type = ");
            builder.push_bind(incident_type);
        }
        if let Some(severity) = severity {
            builder.push(" AND severity = ");
            builder.push_bind(severity);
        }

        builder.push(" ORDER BY created_at DESC LIMIT ");
        builder.push_bind(limit);

        let incidents = builder
            .build_query_as::<Incident>()
            .fetch_all(&self.pool)
            .await?;
        Ok(incidents)
    }

    async fn create(&self, incident: &Incident) -> AppResult<Incident> {
        let created = sqlx::query_as::<_, Incident>(&format!(
            r#"
            INSERT INTO incidents (
                id, title, description, incident_type, severity, status,
                latitude, longitude, address, reported_by, assigned_to, images, tags,
                contact_phone, contact_email, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {INCIDENT_COLUMNS}
            "#
        ))
        .bind(incident.id)
        .bind(&incident.title)
        .bind(&incident.description)
        .bind(incident.incident_type)
        .bind(incident.severity)
        .bind(incident.status)
        .bind(incident.location.latitude)
        .bind(incident.location.longitude)
        .bind(&incident.location.address)
        .bind(incident.reported_by)
        .bind(incident.assigned_to)
        .bind(&incident.images)
        .bind(&incident.tags)
        .bind(&incident.contact_phone)
        .bind(&incident.contact_email)
        .bind(incident.created_at)
        .bind(incident.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: IncidentStatus,
        assigned_to: Option<Uuid>,
    ) -> AppResult<Option<Incident>> {
        let updated = sqlx::query_as::<_, Incident>(&format!(
            r#"
            UPDATE incidents
            SET status = $2, assigned_to = $3, updated_at = now()
            WHERE id = $1
            RETURNING {INCIDENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(assigned_to)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }
}
