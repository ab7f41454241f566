use std::sync::Arc;

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use async_trait::async_trait;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::domain::User;
use crate::error::{AppError, AppResult};
use crate::utils::jwt::{validate_token, Claims};

/// Maps validated token claims to a local user, creating it when needed.
#[async_trait]
pub trait UserProvisioningService: Send + Sync {
    async fn provision_user(&self, claims: &Claims) -> AppResult<User>;
}

/// Caller identity for handlers that require a bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
        }
    }
}

pub(crate) fn bearer_token(req: &HttpRequest) -> AppResult<&str> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::Unauthorized)?;
    let value = header.to_str().map_err(|_| AppError::Unauthorized)?;
    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::Unauthorized),
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = AppResult<Self>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token = bearer_token(&req)?;

            let auth_config = req.app_data::<web::Data<AuthConfig>>().ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!("missing AuthConfig app data"))
            })?;
            let provisioning_service = req
                .app_data::<web::Data<Arc<dyn UserProvisioningService>>>()
                .ok_or_else(|| {
                    AppError::InternalError(anyhow::anyhow!(
                        "missing UserProvisioningService app data"
                    ))
                })?;

            let claims = validate_token(token, auth_config.get_ref())?;
            let user = provisioning_service.provision_user(&claims).await?;
            Ok(AuthenticatedUser::from(user))
        })
    }
}
