use std::sync::Arc;
use std::time::Instant;

use actix_web::dev::Service as _;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use relief_backend::api::routes::{self, AppState};
use relief_backend::application::{
    AlertService, IncidentService, NotificationService, ResourceService, UserService,
    VolunteerService,
};
use relief_backend::config::AppConfig;
use relief_backend::infrastructure::db::{create_pool, run_migrations};
use relief_backend::infrastructure::repositories::{
    AlertRepositoryImpl, IncidentRepositoryImpl, NotificationRepositoryImpl,
    ResourceRepositoryImpl, UserRepositoryImpl, VolunteerRepositoryImpl,
};
use relief_backend::infrastructure::storage::{BlobStore, SignedUrlBlobStore};
use relief_backend::middleware::auth::UserProvisioningService;
use relief_backend::middleware::request_logging::{status_class, RequestContext};
use relief_backend::security::{cors_middleware, security_headers};
use tracing::{info, Instrument};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load application configuration")?;
    config.validate().context("invalid application configuration")?;

    init_tracing(&config.logging.level, config.logging.json_format);

    let pool = create_pool(&config.database)
        .await
        .context("failed to create database pool")?;
    run_migrations(&pool)
        .await
        .context("database migrations failed")?;

    let user_repo = Arc::new(UserRepositoryImpl::new(pool.clone()));
    let incident_repo = Arc::new(IncidentRepositoryImpl::new(pool.clone()));
    let resource_repo = Arc::new(ResourceRepositoryImpl::new(pool.clone()));
    let volunteer_repo = Arc::new(VolunteerRepositoryImpl::new(pool.clone()));
    let alert_repo = Arc::new(AlertRepositoryImpl::new(pool.clone()));
    let notification_repo = Arc::new(NotificationRepositoryImpl::new(pool.clone()));
    let blob_store: Arc<dyn BlobStore> = Arc::new(SignedUrlBlobStore::new(&config.storage));

    let state = AppState {
        incident_service: Arc::new(IncidentService::new(
            incident_repo.clone(),
            user_repo.clone(),
            notification_repo.clone(),
            blob_store,
        )),
        resource_service: Arc::new(ResourceService::new(
            resource_repo,
            incident_repo.clone(),
        )),
        volunteer_service: Arc::new(VolunteerService::new(
            volunteer_repo.clone(),
            user_repo.clone(),
            incident_repo.clone(),
            notification_repo.clone(),
        )),
        alert_service: Arc::new(AlertService::new(
            alert_repo,
            incident_repo,
            user_repo.clone(),
            volunteer_repo,
            notification_repo.clone(),
        )),
        notification_service: Arc::new(NotificationService::new(
            notification_repo,
            user_repo.clone(),
        )),
        db_pool: Some(pool),
    };
    let provisioning: Arc<dyn UserProvisioningService> = Arc::new(UserService::new(user_repo));

    let bind_host = config.host.clone();
    let bind_port = config.port;
    let security_config = config.security.clone();
    let auth_config = config.auth.clone();

    info!(host = %bind_host, port = bind_port, environment = %config.environment, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap_fn(|req, srv| {
                let context = RequestContext::from_request(&req);
                let span = context.span();
                let start = Instant::now();

                let fut = srv.call(req);
                async move {
                    let mut response = fut.await?;
                    let (name, value) = context.response_header();
                    response.headers_mut().insert(name, value);

                    let status = response.status().as_u16();
                    info!(
                        status = status,
                        status_class = status_class(status),
                        latency_ms = start.elapsed().as_millis() as u64,
                        "request completed"
                    );
                    Ok::<_, actix_web::Error>(response)
                }
                .instrument(span)
            })
            .wrap(cors_middleware(&security_config))
            .wrap(security_headers())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(auth_config.clone()))
            .app_data(web::Data::new(provisioning.clone()))
            .configure(routes::configure)
    })
    .bind((bind_host, bind_port))?
    .run()
    .await?;

    Ok(())
}

fn init_tracing(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
