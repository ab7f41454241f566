use actix_cors::Cors;

use crate::config::SecurityConfig;

pub fn cors_middleware(config: &SecurityConfig) -> Cors {
    let allowlist = config.cors_allowed_origins.clone();

    Cors::default()
        .allow_any_header()
        .allowed_methods(vec!["GET", "POST", "PATCH", "OPTIONS"])
        .expose_headers(vec!["x-request-id"])
        .max_age(config.cors_max_age_seconds)
        .allowed_origin_fn(move |origin, _| {
            origin
                .to_str()
                .ok()
                .map(|value| is_allowed_origin(&allowlist, value))
                .unwrap_or(false)
        })
}

/// Exact match against the allowlist. `*` admits any origin.
pub fn is_allowed_origin(allowlist: &[String], origin: &str) -> bool {
    allowlist
        .iter()
        .any(|allowed| allowed == "*" || allowed == origin)
}
