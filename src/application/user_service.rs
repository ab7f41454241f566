use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::User;
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::UserRepository;
use crate::middleware::auth::UserProvisioningService;
use crate::utils::jwt::Claims;

/// Resolves token subjects to local users, creating the row on first sight.
#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

fn fallback_email(subject: Uuid) -> String {
    format!("{subject}@users.invalid")
}

#[async_trait]
impl UserProvisioningService for UserService {
    async fn provision_user(&self, claims: &Claims) -> AppResult<User> {
        if let Some(user) = self.user_repo.find_by_id(claims.sub).await? {
            debug!(user_id = %user.id, "authenticated existing user");
            return Ok(user);
        }

        let now = Utc::now();
        let candidate = User {
            id: claims.sub,
            email: claims
                .email
                .clone()
                .unwrap_or_else(|| fallback_email(claims.sub)),
            name: claims.name.clone(),
            created_at: now,
            updated_at: now,
        };

        match self.user_repo.create(&candidate).await {
            Ok(user) => {
                info!(user_id = %user.id, "provisioned user from token claims");
                Ok(user)
            }
            // A concurrent request may have inserted the same subject first.
            Err(AppError::Conflict(_)) => self
                .user_repo
                .find_by_id(claims.sub)
                .await?
                .ok_or_else(|| AppError::Conflict("email already registered".to_string())),
            Err(error) => Err(error),
        }
    }
}
