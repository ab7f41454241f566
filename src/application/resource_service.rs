use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::mapper::{load_incident_summaries, map_resource};
use crate::api::dtos::{
    AvailableResourcesQuery, CreateResourceRequest, ResourceQuery, ResourceResponse,
    ResourceStatsResponse, UpdateResourceStatusRequest,
};
use crate::domain::stats::tally;
use crate::domain::{retain_within, DomainError, Resource, ResourceStatus, ResourceType};
use crate::error::AppResult;
use crate::infrastructure::repositories::{IncidentRepository, ResourceFilter, ResourceRepository};

#[derive(Clone)]
pub struct ResourceService {
    resource_repo: Arc<dyn ResourceRepository>,
    incident_repo: Arc<dyn IncidentRepository>,
}

impl ResourceService {
    pub fn new(
        resource_repo: Arc<dyn ResourceRepository>,
        incident_repo: Arc<dyn IncidentRepository>,
    ) -> Self {
        Self {
            resource_repo,
            incident_repo,
        }
    }

    pub async fn list(&self, query: ResourceQuery) -> AppResult<Vec<ResourceResponse>> {
        let filter = ResourceFilter::from_query(query.resource_type, query.status);
        let resources = self.resource_repo.list(filter).await?;
        self.to_responses(resources).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<ResourceResponse> {
        let resource = self.find(id).await?;
        let mut responses = self.to_responses(vec![resource]).await?;
        Ok(responses.remove(0))
    }

    pub async fn create(&self, request: CreateResourceRequest) -> AppResult<ResourceResponse> {
        request.validate()?;

        let now = Utc::now();
        let resource = Resource {
            id: Uuid::new_v4(),
            name: request.name,
            resource_type: request.resource_type,
            quantity: request.quantity,
            available: request.quantity,
            location: request.location.into(),
            status: ResourceStatus::Available,
            assigned_to: None,
            contact_person: request.contact_person,
            contact_phone: request.contact_phone,
            description: request.description,
            created_at: now,
            updated_at: now,
        };

        let created = self.resource_repo.create(&resource).await?;
        info!(resource_id = %created.id, resource_type = %created.resource_type, "resource created");
        Ok(map_resource(created, &Default::default()))
    }

    /// Sets the status and replaces the incident assignment. `available` keeps its value
    /// when omitted.
    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateResourceStatusRequest,
    ) -> AppResult<ResourceResponse> {
        request.validate()?;
        let current = self.find(id).await?;

        if let Some(incident_id) = request.assigned_to {
            if self.incident_repo.find_by_id(incident_id).await?.is_none() {
                return Err(DomainError::not_found("Incident", incident_id).into());
            }
        }

        let available = request.available.unwrap_or(current.available);
        let updated = self
            .resource_repo
            .update_status(id, request.status, request.assigned_to, available)
            .await?
            .ok_or_else(|| DomainError::not_found("Resource", id))?;

        info!(
            resource_id = %id,
            status = %updated.status,
            assigned_to = ?updated.assigned_to,
            available = updated.available,
            "resource status updated"
        );

        let mut responses = self.to_responses(vec![updated]).await?;
        Ok(responses.remove(0))
    }

    /// Available resources of one type, narrowed to the requested area when a point is given.
    pub async fn available_by_type(
        &self,
        query: AvailableResourcesQuery,
    ) -> AppResult<Vec<ResourceResponse>> {
        let area = query.location().target_area()?;
        let mut resources = self
            .resource_repo
            .find_available_by_type(query.resource_type)
            .await?;
        if let Some(area) = area {
            resources = retain_within(resources, &area);
        }
        self.to_responses(resources).await
    }

    pub async fn stats(&self) -> AppResult<ResourceStatsResponse> {
        let resources = self.resource_repo.list_all().await?;
        Ok(ResourceStatsResponse {
            total: resources.len() as i64,
            by_status: tally(&ResourceStatus::ALL, resources.iter().map(|r| r.status)),
            by_type: tally(&ResourceType::ALL, resources.iter().map(|r| r.resource_type)),
        })
    }

    async fn find(&self, id: Uuid) -> AppResult<Resource> {
        self.resource_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Resource", id).into())
    }

    async fn to_responses(&self, resources: Vec<Resource>) -> AppResult<Vec<ResourceResponse>> {
        let incident_ids = resources.iter().filter_map(|resource| resource.assigned_to);
        let incidents = load_incident_summaries(self.incident_repo.as_ref(), incident_ids).await?;
        Ok(resources
            .into_iter()
            .map(|resource| map_resource(resource, &incidents))
            .collect())
    }
}
