use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Auth configuration is invalid: {0}")]
    Auth(String),

    #[error("Storage configuration is invalid: {0}")]
    Storage(String),

    #[error("Security configuration is invalid: {0}")]
    Security(String),
}

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "crate::config::defaults::default_jwt_kid")]
    pub jwt_kid: String,
    #[serde(default)]
    pub previous_jwt_secrets: Vec<String>,
    #[serde(default)]
    pub previous_jwt_kids: Vec<String>,
    #[serde(default = "crate::config::defaults::default_jwt_expiration_seconds")]
    pub jwt_expiration_seconds: u64,
    pub issuer: String,
    pub audience: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_kid", &self.jwt_kid)
            .field("previous_jwt_secrets", &"[REDACTED]")
            .field("previous_jwt_kids", &self.previous_jwt_kids)
            .field("jwt_expiration_seconds", &self.jwt_expiration_seconds)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt_secret = self.jwt_secret.trim();
        if jwt_secret.is_empty() {
            return Err(ConfigError::Auth(
                "JWT_SECRET must be set via environment variable".to_string(),
            ));
        }

        if jwt_secret == crate::config::defaults::PLACEHOLDER_SECRET {
            return Err(ConfigError::Auth(
                "JWT_SECRET must be set to a secure value, not the default placeholder".to_string(),
            ));
        }

        if self.previous_jwt_secrets.len() != self.previous_jwt_kids.len() {
            return Err(ConfigError::Auth(
                "previous_jwt_secrets and previous_jwt_kids must have the same length".to_string(),
            ));
        }

        Ok(())
    }
}
