use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use ouv_api::{create_app, middleware::create_cors, AppState};
use ouv_core::{
    AuthService, Clock, ManifestationService, ProfileService, SessionService, SessionServiceConfig,
    SystemClock, VerificationService, VerificationServiceConfig,
};
use ouv_infra::database::{
    DatabasePool, MySqlManifestationRepository, MySqlOtpRepository, MySqlUserRepository,
};
use ouv_infra::email::create_email_service;
use ouv_shared::config::LogFormat;
use ouv_shared::{AppConfig, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting Ouvidoria API server");

    let warnings = config.production_warnings();
    for warning in &warnings {
        tracing::warn!("Configuration: {}", warning);
    }
    if config.environment.is_production() && !warnings.is_empty() {
        anyhow::bail!("refusing to start in production with an unsafe configuration");
    }

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("failed to run database migrations")?;
    }
    tracing::info!("{}", database.stats());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let pool = database.pool().clone();

    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let otp_repository = Arc::new(MySqlOtpRepository::new(pool.clone()));
    let manifestation_repository = Arc::new(MySqlManifestationRepository::new(pool));

    let email_service =
        Arc::new(create_email_service(&config.email).context("failed to configure email delivery")?);

    let verification_service = Arc::new(VerificationService::new(
        email_service,
        otp_repository,
        clock.clone(),
        VerificationServiceConfig::from(&config.otp),
    ));

    match verification_service.purge_expired().await {
        Ok(removed) => tracing::info!(removed, "Expired verification codes purged at startup"),
        Err(e) => tracing::warn!(error = %e, "Failed to purge expired verification codes"),
    }

    let session_service = Arc::new(SessionService::new(
        SessionServiceConfig::from(&config.auth.jwt),
        clock.clone(),
    ));

    let state = web::Data::new(AppState {
        auth_service: Arc::new(AuthService::new(
            user_repository.clone(),
            verification_service,
            session_service.clone(),
            clock.clone(),
        )),
        profile_service: Arc::new(ProfileService::new(user_repository, clock.clone())),
        manifestation_service: Arc::new(ManifestationService::new(manifestation_repository, clock)),
        session_service,
        database: Some(database.clone()),
    });

    let bind_address = config.server.bind_address();
    let server_config = config.server.clone();
    let cors_config = config.cors.clone();

    tracing::info!(address = %bind_address, "Server listening");

    let mut server = HttpServer::new(move || {
        create_app(state.clone(), server_config.max_payload_size)
            .wrap(create_cors(&cors_config))
            .wrap(TracingLogger::default())
    })
    .keep_alive(std::time::Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Install the global subscriber; `RUST_LOG` overrides the configured level
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}
