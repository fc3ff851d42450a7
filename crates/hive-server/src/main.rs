use hive_audit::AuditRecorder;
use hive_core::HiveConfig;
use hive_lifecycle::{AdminService, BotService, HttpNotifier};
use hive_store::MongoStore;
use hive_token::{load_public_key, TokenVerifier};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use hive_server::{routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = HiveConfig::load_from_env()?;

    let public_key = load_public_key(&config.jwt.public_key)?;
    let verifier = Arc::new(TokenVerifier::new(public_key, &config.jwt.issuer));

    let store = Arc::new(MongoStore::connect(&config.mongo.uri, &config.mongo.database).await?);
    tracing::info!(database = %config.mongo.database, "connected to document store");

    let audit = AuditRecorder::new(store.clone());
    let notifier = Arc::new(HttpNotifier::new(config.orchestration.url.clone()));

    let state = AppState {
        verifier,
        admins: AdminService::new(store.clone(), audit.clone()),
        bots: BotService::new(store, audit.clone(), notifier, config.bots.clone()),
        audit,
        environment: config.environment.clone(),
    };

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, environment = %config.environment, "hive-server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to install the shutdown signal handler");
    }
    tracing::info!("shutting down");
}
