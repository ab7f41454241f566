#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use actix_web::web;
use once_cell::sync::Lazy;
use relief_backend::api::routes::{self, AppState};
use relief_backend::application::{
    AlertService, IncidentService, NotificationService, ResourceService, UserService,
    VolunteerService,
};
use relief_backend::config::AuthConfig;
use relief_backend::infrastructure::db::run_migrations;
use relief_backend::middleware::auth::UserProvisioningService;
use relief_backend::utils::jwt::create_access_token;
use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};
use sqlx::Connection;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

pub mod fixtures;
pub mod mocks;

use mocks::{
    FixedBlobStore, MockAlertRepo, MockIncidentRepo, MockNotificationRepo, MockResourceRepo,
    MockUserRepo, MockVolunteerRepo,
};

static TEST_DB_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub struct TestDb {
    pool: PgPool,
    _db_lock_conn: PgConnection,
    _lock: MutexGuard<'static, ()>,
}

impl TestDb {
    /// Connects to `TEST_DATABASE_URL` (or `DATABASE_URL`), migrates and truncates.
    /// Returns `None` when neither is set so local runs skip; panics in CI.
    pub async fn new() -> Option<Self> {
        dotenvy::dotenv().ok();
        let url = env::var("TEST_DATABASE_URL")
            .ok()
            .or_else(|| env::var("DATABASE_URL").ok());

        let url = match url {
            Some(u) => u,
            None => {
                if env::var("CI").is_ok() {
                    panic!("DATABASE_URL or TEST_DATABASE_URL not set in CI");
                }
                eprintln!("Skipping test: DATABASE_URL or TEST_DATABASE_URL not set");
                return None;
            }
        };

        let lock = Lazy::force(&TEST_DB_MUTEX).lock().await;

        // Serializes reset/migration across test binaries.
        let mut db_lock_conn = PgConnection::connect(&url).await.ok()?;
        sqlx::query("SELECT pg_advisory_lock($1)")
            .bind(4242_i64)
            .execute(&mut db_lock_conn)
            .await
            .ok()?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .ok()?;

        run_migrations(&pool).await.ok()?;
        reset_database(&pool).await.ok()?;

        Some(Self {
            pool,
            _db_lock_conn: db_lock_conn,
            _lock: lock,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

async fn reset_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        TRUNCATE TABLE
            notifications,
            alerts,
            volunteers,
            resources,
            incidents,
            users
        RESTART IDENTITY CASCADE
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-secret".to_string(),
        jwt_kid: "v1".to_string(),
        previous_jwt_secrets: Vec::new(),
        previous_jwt_kids: Vec::new(),
        jwt_expiration_seconds: 900,
        issuer: "relief-backend-test".to_string(),
        audience: "relief-api-test".to_string(),
    }
}

pub fn bearer_for(user_id: Uuid, email: &str) -> String {
    let token = create_access_token(user_id, Some(email), Some("Test User"), &test_auth_config())
        .expect("token");
    format!("Bearer {token}")
}

/// In-memory repositories wired into every service.
#[derive(Default)]
pub struct Harness {
    pub users: Arc<MockUserRepo>,
    pub incidents: Arc<MockIncidentRepo>,
    pub resources: Arc<MockResourceRepo>,
    pub volunteers: Arc<MockVolunteerRepo>,
    pub alerts: Arc<MockAlertRepo>,
    pub notifications: Arc<MockNotificationRepo>,
    pub blob_store: Arc<FixedBlobStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incident_service(&self) -> IncidentService {
        IncidentService::new(
            self.incidents.clone(),
            self.users.clone(),
            self.notifications.clone(),
            self.blob_store.clone(),
        )
    }

    pub fn resource_service(&self) -> ResourceService {
        ResourceService::new(self.resources.clone(), self.incidents.clone())
    }

    pub fn volunteer_service(&self) -> VolunteerService {
        VolunteerService::new(
            self.volunteers.clone(),
            self.users.clone(),
            self.incidents.clone(),
            self.notifications.clone(),
        )
    }

    pub fn alert_service(&self) -> AlertService {
        AlertService::new(
            self.alerts.clone(),
            self.incidents.clone(),
            self.users.clone(),
            self.volunteers.clone(),
            self.notifications.clone(),
        )
    }

    pub fn notification_service(&self) -> NotificationService {
        NotificationService::new(self.notifications.clone(), self.users.clone())
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(self.users.clone())
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            incident_service: Arc::new(self.incident_service()),
            resource_service: Arc::new(self.resource_service()),
            volunteer_service: Arc::new(self.volunteer_service()),
            alert_service: Arc::new(self.alert_service()),
            notification_service: Arc::new(self.notification_service()),
            db_pool: None,
        }
    }

    /// App data plus routes, for `App::new().configure(harness.configure())`.
    pub fn configure(&self) -> impl FnOnce(&mut web::ServiceConfig) {
        let state = self.app_state();
        let provisioning: Arc<dyn UserProvisioningService> = Arc::new(self.user_service());
        move |cfg: &mut web::ServiceConfig| {
            cfg.app_data(web::Data::new(state))
                .app_data(web::Data::new(test_auth_config()))
                .app_data(web::Data::new(provisioning));
            routes::configure(cfg);
        }
    }
}
