//! Bazaar API - JSON backend for the shop apps.
//!
//! This binary serves the HTTP API on port 8080.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - Per-aggregate store traits backed by the in-memory store
//! - HMAC-signed bearer tokens for users and admins
//! - Verification emails handed to a task distributor

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use bazaar_api::config::{ApiConfig, BootstrapAdmin};
use bazaar_api::services::auth::{AuthService, Registration};
use bazaar_api::services::{HmacTokenMaker, LoggingTaskDistributor};
use bazaar_api::state::{AppState, Stores};
use bazaar_api::store::{CatalogSeed, MemoryStore};
use bazaar_core::store::AdminStore;
use bazaar_core::{AdminType, Email, StoreError};
use secrecy::ExposeSecret;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry.dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry
                .environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry.sample_rate,
            traces_sample_rate: config.sentry.traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Create the configured super admin unless it already exists.
async fn bootstrap_admin(state: &AppState, admin: &BootstrapAdmin) -> Result<(), String> {
    match state
        .stores()
        .admins
        .get_admin_by_username(admin.username.clone())
        .await
    {
        Ok(_) => return Ok(()),
        Err(StoreError::NotFound) => {}
        Err(e) => return Err(e.to_string()),
    }

    let email = Email::parse(&admin.email).map_err(|e| e.to_string())?;
    let created = AuthService::new(state)
        .register_admin(
            Registration {
                username: admin.username.clone(),
                email,
                telephone: None,
                password: admin.password.expose_secret().to_owned(),
            },
            AdminType::SuperAdmin,
        )
        .await
        .map_err(|e| e.to_string())?;

    tracing::info!(admin_id = %created.id, username = %created.username, "Bootstrap admin created");
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar_api=info,tower_http=debug".into());

    // JSON logs for log shippers, text locally
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json_logs.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json_logs).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let store = Arc::new(MemoryStore::with_catalog(CatalogSeed::demo()));
    tracing::info!("In-memory store initialized with demo catalog");

    let token_maker = HmacTokenMaker::new(config.token_symmetric_key.clone())
        .expect("Failed to create token maker");

    let state = AppState::new(
        config.clone(),
        Stores::shared(store),
        Arc::new(token_maker),
        Arc::new(LoggingTaskDistributor),
    );

    if let Some(admin) = &config.bootstrap_admin {
        bootstrap_admin(&state, admin)
            .await
            .expect("Failed to create bootstrap admin");
    }

    let app = bazaar_api::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
