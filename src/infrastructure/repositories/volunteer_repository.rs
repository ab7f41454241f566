use super::traits::VolunteerRepository;
use crate::domain::{Availability, Volunteer};
use crate::error::AppResult;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const VOLUNTEER_COLUMNS: &str = "id, user_id, skills, availability, latitude, longitude, \
    address, phone, emergency_contact_name, emergency_contact_phone, certifications, \
    assigned_incident, created_at, updated_at";

pub struct VolunteerRepositoryImpl {
    pool: PgPool,
}

impl VolunteerRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VolunteerRepository for VolunteerRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Volunteer>> {
        let volunteer = sqlx::query_as::<_, Volunteer>(&format!(
            "SELECT {VOLUNTEER_COLUMNS} FROM volunteers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(volunteer)
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Volunteer>> {
        let volunteer = sqlx::query_as::<_, Volunteer>(&format!(
            "SELECT {VOLUNTEER_COLUMNS} FROM volunteers WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(volunteer)
    }

    async fn list(&self, availability: Option<Availability>) -> AppResult<Vec<Volunteer>> {
        let volunteers = match availability {
            Some(availability) => {
                sqlx::query_as::<_, Volunteer>(&format!(
                    "SELECT {VOLUNTEER_COLUMNS} FROM volunteers \
                     WHERE availability = $1 ORDER BY created_at DESC"
                ))
                .bind(availability)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Volunteer>(&format!(
                    "SELECT {VOLUNTEER_COLUMNS} FROM volunteers ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(volunteers)
    }

    async fn create(&self, volunteer: &Volunteer) -> AppResult<Volunteer> {
        let created = sqlx::query_as::<_, Volunteer>(&format!(
            r#"
            INSERT INTO volunteers (
                id, user_id, skills, availability, latitude, longitude, address, phone,
                emergency_contact_name, emergency_contact_phone, certifications,
                assigned_incident, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {VOLUNTEER_COLUMNS}
            "#
        ))
        .bind(volunteer.id)
        .bind(volunteer.user_id)
        .bind(&volunteer.skills)
        .bind(volunteer.availability)
        .bind(volunteer.location.latitude)
        .bind(volunteer.location.longitude)
        .bind(&volunteer.location.address)
        .bind(&volunteer.phone)
        .bind(&volunteer.emergency_contact_name)
        .bind(&volunteer.emergency_contact_phone)
        .bind(&volunteer.certifications)
        .bind(volunteer.assigned_incident)
        .bind(volunteer.created_at)
        .bind(volunteer.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, volunteer: &Volunteer) -> AppResult<Volunteer> {
        let updated = sqlx::query_as::<_, Volunteer>(&format!(
            r#"
            UPDATE volunteers
            SET skills = $2, availability = $3, latitude = $4, longitude = $5, address = $6,
                phone = $7, emergency_contact_name = $8, emergency_contact_phone = $9,
                certifications = $10, updated_at = now()
            WHERE id = $1
            RETURNING {VOLUNTEER_COLUMNS}
            "#
        ))
        .bind(volunteer.id)
        .bind(&volunteer.skills)
        .bind(volunteer.availability)
        .bind(volunteer.location.latitude)
        .bind(volunteer.location.longitude)
        .bind(&volunteer.location.address)
        .bind(&volunteer.phone)
        .bind(&volunteer.emergency_contact_name)
        .bind(&volunteer.emergency_contact_phone)
        .bind(&volunteer.certifications)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn assign(&self, id: Uuid, incident_id: Uuid) -> AppResult<Option<Volunteer>> {
        let assigned = sqlx::query_as::<_, Volunteer>(&format!(
            r#"
            UPDATE volunteers
            SET assigned_incident = $2, availability = $3, updated_at = now()
            WHERE id = $1
            RETURNING {VOLUNTEER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(incident_id)
        .bind(Availability::Busy)
        .fetch_optional(&self.pool)
        .await?;
        Ok(assigned)
    }
}
