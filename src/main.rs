mod config;
mod db;
mod retry;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError, ServiceKind};
use crate::services::bookings::BookingStore;
use crate::services::mentors::{CatalogError, MentorCatalog};
use crate::state::ServiceState;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("mentor catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "startup failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    let state = build_state(&config).await?;

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(service = %config.service, port = config.port, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<ServiceState, StartupError> {
    let pool = match &config.database {
        Some(database) => Some(db::connect(database, config.service).await?),
        None => None,
    };

    let state = match (config.service, pool) {
        (ServiceKind::Users, Some(pool)) => ServiceState::Users(pool),
        (ServiceKind::Messaging, Some(pool)) => ServiceState::Messaging(pool),
        (ServiceKind::CodeReview, Some(pool)) => ServiceState::CodeReview(pool),
        (ServiceKind::Users | ServiceKind::Messaging | ServiceKind::CodeReview, None) => {
            return Err(ConfigError::Missing("DATABASE_URL").into());
        }
        (ServiceKind::Mentors, _) => {
            let catalog = match &config.mentor_catalog_path {
                Some(path) => MentorCatalog::from_json_file(path)?,
                None => MentorCatalog::seeded(),
            };
            if catalog.is_empty() {
                tracing::warn!("mentor catalog is empty");
            }
            tracing::info!(mentors = catalog.len(), "mentor catalog loaded");
            ServiceState::Mentors(Arc::new(catalog))
        }
        (ServiceKind::Bookings, _) => ServiceState::Bookings(BookingStore::new()),
        (ServiceKind::WebRtc, _) => ServiceState::WebRtc,
    };
    Ok(state)
}
