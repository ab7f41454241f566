use serde::Deserialize;

use super::ConfigError;

/// Blob store settings: where uploaded images live and how upload URLs are signed.
#[derive(Deserialize, Clone)]
pub struct StorageConfig {
    pub base_url: String,
    pub signing_secret: String,
    #[serde(default = "crate::config::defaults::default_upload_url_ttl_seconds")]
    pub upload_url_ttl_seconds: u64,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("base_url", &self.base_url)
            .field("signing_secret", &"[REDACTED]")
            .field("upload_url_ttl_seconds", &self.upload_url_ttl_seconds)
            .finish()
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Storage("STORAGE_BASE_URL must be set".to_string()));
        }
        if self.signing_secret.trim().is_empty() {
            return Err(ConfigError::Storage(
                "STORAGE_SIGNING_SECRET must be set".to_string(),
            ));
        }
        if self.upload_url_ttl_seconds == 0 {
            return Err(ConfigError::Storage(
                "upload_url_ttl_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
