use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};

/// A short-lived URL the client can upload one file to, plus the id to store afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadTicket {
    pub storage_id: Uuid,
    pub upload_url: String,
    pub expires_at: chrono::DateTime<Utc>,
}

/// Blob store collaborator. File contents never pass through this service.
pub trait BlobStore: Send + Sync {
    fn issue_upload_url(&self) -> AppResult<UploadTicket>;
    fn public_url(&self, storage_id: Uuid) -> String;
}

#[derive(Debug, Serialize, Deserialize)]
struct UploadClaims {
    sub: Uuid,
    exp: usize,
    iat: usize,
    scope: String,
}

/// Issues HS256-signed upload URLs against an object store fronted by a verifying gateway.
pub struct SignedUrlBlobStore {
    base_url: String,
    signing_key: EncodingKey,
    ttl: Duration,
}

impl SignedUrlBlobStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            signing_key: EncodingKey::from_secret(config.signing_secret.as_bytes()),
            ttl: Duration::seconds(config.upload_url_ttl_seconds as i64),
        }
    }
}

impl BlobStore for SignedUrlBlobStore {
    fn issue_upload_url(&self) -> AppResult<UploadTicket> {
        let storage_id = Uuid::new_v4();
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = UploadClaims {
            sub: storage_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
            scope: "upload".to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.signing_key)
            .map_err(|e| AppError::InternalError(e.into()))?;

        Ok(UploadTicket {
            storage_id,
            upload_url: format!("{}/{}?token={}", self.base_url, storage_id, token),
            expires_at,
        })
    }

    fn public_url(&self, storage_id: Uuid) -> String {
        format!("{}/{}", self.base_url, storage_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    fn store() -> SignedUrlBlobStore {
        SignedUrlBlobStore::new(&StorageConfig {
            base_url: "https://blobs.example.com/relief/".to_string(),
            signing_secret: "storage-secret".to_string(),
            upload_url_ttl_seconds: 600,
        })
    }

    #[test]
    fn public_url_joins_base_and_id() {
        let id = Uuid::new_v4();
        assert_eq!(
            store().public_url(id),
            format!("https://blobs.example.com/relief/{id}")
        );
    }

    #[test]
    fn upload_url_carries_a_verifiable_token() {
        let ticket = store().issue_upload_url().unwrap();
        let prefix = format!("https://blobs.example.com/relief/{}?token=", ticket.storage_id);
        assert!(ticket.upload_url.starts_with(&prefix));

        let token = &ticket.upload_url[prefix.len()..];
        let decoded = decode::<UploadClaims>(
            token,
            &DecodingKey::from_secret(b"storage-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .expect("token should verify with the signing secret");
        assert_eq!(decoded.claims.sub, ticket.storage_id);
        assert_eq!(decoded.claims.scope, "upload");
    }

    #[test]
    fn each_ticket_gets_a_fresh_id() {
        let store = store();
        let first = store.issue_upload_url().unwrap();
        let second = store.issue_upload_url().unwrap();
        assert_ne!(first.storage_id, second.storage_id);
    }
}
