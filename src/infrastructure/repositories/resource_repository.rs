use super::traits::{ResourceFilter, ResourceRepository};
use crate::domain::{Resource, ResourceStatus, ResourceType};
use crate::error::AppResult;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const RESOURCE_COLUMNS: &str = "id, name, resource_type, quantity, available, \
    latitude, longitude, address, status, assigned_to, contact_person, contact_phone, \
    description, created_at, updated_at";

pub struct ResourceRepositoryImpl {
    pool: PgPool,
}

impl ResourceRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository for ResourceRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        let resource = sqlx::query_as::<_, Resource>(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(resource)
    }

    async fn list(&self, filter: ResourceFilter) -> AppResult<Vec<Resource>> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {RESOURCE_COLUMNS} FROM resources"));

        match filter {
            ResourceFilter::All => {}
            ResourceFilter::Type(resource_type) => {
                builder.push(" WHERE resource_type = ");
                builder.push_bind(resource_type);
            }
            ResourceFilter::Status(status) => {
                builder.push(" WHERE status = ");
                builder.push_bind(status);
            }
        }
        builder.push(" ORDER BY created_at DESC");

        let resources = builder
            .build_query_as::<Resource>()
            .fetch_all(&self.pool)
            .await?;
        Ok(resources)
    }

    async fn list_all(&self) -> AppResult<Vec<Resource>> {
        self.list(ResourceFilter::All).await
    }

    async fn find_available_by_type(&self, resource_type: ResourceType) -> AppResult<Vec<Resource>> {
        let resources = sqlx::query_as::<_, Resource>(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources \
             WHERE resource_type = $1 AND status = $2 ORDER BY created_at DESC"
        ))
        .bind(resource_type)
        .bind(ResourceStatus::Available)
        .fetch_all(&self.pool)
        .await?;
        Ok(resources)
    }

    async fn create(&self, resource: &Resource) -> AppResult<Resource> {
        let created = sqlx::query_as::<_, Resource>(&format!(
            r#"
            INSERT INTO resources (
                id, name, resource_type, quantity, available, latitude, longitude, address,
                status, assigned_to, contact_person, contact_phone, description,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {RESOURCE_COLUMNS}
            "#
        ))
        .bind(resource.id)
        .bind(&resource.name)
        .bind(resource.resource_type)
        .bind(resource.quantity)
        .bind(resource.available)
        .bind(resource.location.latitude)
        .bind(resource.location.longitude)
        .bind(&resource.location.address)
        .bind(resource.status)
        .bind(resource.assigned_to)
        .bind(&resource.contact_person)
        .bind(&resource.contact_phone)
        .bind(&resource.description)
        .bind(resource.created_at)
        .bind(resource.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ResourceStatus,
        assigned_to: Option<Uuid>,
        available: i32,
    ) -> AppResult<Option<Resource>> {
        let updated = sqlx::query_as::<_, Resource>(&format!(
            r#"
            UPDATE resources
            SET status = $2, assigned_to = $3, available = $4, updated_at = now()
            WHERE id = $1
            RETURNING {RESOURCE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(assigned_to)
        .bind(available)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }
}
