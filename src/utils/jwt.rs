use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

/// Access token claims. `email` and `name` feed just-in-time user provisioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
    pub jti: Uuid,
    pub kid: String,
    pub iss: String,
    pub aud: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Claims {
    fn issue(user_id: Uuid, email: Option<&str>, name: Option<&str>, config: &AuthConfig) -> Self {
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::seconds(config.jwt_expiration_seconds as i64);
        Self {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: issued_at.timestamp() as usize,
            jti: Uuid::new_v4(),
            kid: config.jwt_kid.clone(),
            iss: config.issuer.clone(),
            aud: vec![config.audience.clone()],
            email: email.map(str::to_string),
            name: name.map(str::to_string),
        }
    }
}

/// HS256 token signed with the current key id.
pub fn create_access_token(
    user_id: Uuid,
    email: Option<&str>,
    name: Option<&str>,
    config: &AuthConfig,
) -> AppResult<String> {
    let header = Header {
        kid: Some(config.jwt_kid.clone()),
        ..Header::new(Algorithm::HS256)
    };
    let claims = Claims::issue(user_id, email, name, config);
    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());

    encode(&header, &claims, &key).map_err(|e| AppError::InternalError(e.into()))
}

/// Checks signature, expiry, issuer and audience. The header `kid` selects the current secret
/// or one of the rotated-out ones; a missing or unknown `kid` is an invalid token.
pub fn validate_token(token: &str, config: &AuthConfig) -> AppResult<Claims> {
    let kid = decode_header(token)
        .map_err(|_| AppError::InvalidToken)?
        .kid
        .ok_or(AppError::InvalidToken)?;
    let secret = secret_for_kid(config, &kid).ok_or(AppError::InvalidToken)?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)?;
    Ok(data.claims)
}

fn secret_for_kid<'a>(config: &'a AuthConfig, kid: &str) -> Option<&'a str> {
    std::iter::once((&config.jwt_kid, &config.jwt_secret))
        .chain(config.previous_jwt_kids.iter().zip(&config.previous_jwt_secrets))
        .find(|(candidate, _)| candidate.as_str() == kid)
        .map(|(_, secret)| secret.as_str())
}
