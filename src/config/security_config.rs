use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    #[serde(default = "crate::config::defaults::default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default = "crate::config::defaults::default_cors_max_age_seconds")]
    pub cors_max_age_seconds: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: crate::config::defaults::default_cors_allowed_origins(),
            cors_max_age_seconds: crate::config::defaults::default_cors_max_age_seconds(),
        }
    }
}

impl SecurityConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|origin| origin.trim() == "*")
    }
}
