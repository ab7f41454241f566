/// Radius applied to location-scoped queries that give a point but no radius.
pub const DEFAULT_QUERY_RADIUS_KM: f64 = 50.0;

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 200;
pub const SEARCH_RESULT_LIMIT: i64 = 20;

pub const PLACEHOLDER_SECRET: &str = "change-me-in-production";

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    8080
}

pub fn default_environment() -> String {
    "development".to_string()
}

pub fn default_db_acquire_timeout_seconds() -> u64 {
    10
}

pub fn default_db_idle_timeout_seconds() -> u64 {
    600
}

pub fn default_db_max_lifetime_seconds() -> u64 {
    1800
}

pub fn default_db_test_before_acquire() -> bool {
    true
}

pub fn default_jwt_kid() -> String {
    "v1".to_string()
}

pub fn default_jwt_expiration_seconds() -> u64 {
    3600
}

pub fn default_upload_url_ttl_seconds() -> u64 {
    900
}

pub fn default_cors_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

pub fn default_cors_max_age_seconds() -> usize {
    3600
}

pub fn default_logging_level() -> String {
    "info".to_string()
}

pub fn default_logging_json_format() -> bool {
    false
}
