use std::sync::Arc;

use crate::config::Config;
use kingston_core::{
    clients::{ClientService, ClientServiceTrait},
    holdings::{HoldingService, HoldingServiceTrait},
    networth::{NetWorthService, NetWorthServiceTrait},
};
use kingston_storage_sqlite::{
    clients::ClientRepository,
    db::{self, write_actor},
    holdings::HoldingRepository,
    networth::NetWorthRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub client_service: Arc<dyn ClientServiceTrait + Send + Sync>,
    pub holding_service: Arc<dyn HoldingServiceTrait + Send + Sync>,
    pub net_worth_service: Arc<dyn NetWorthServiceTrait + Send + Sync>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("KP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let client_repository = Arc::new(ClientRepository::new(pool.clone(), writer.clone()));
    let holding_repository = Arc::new(HoldingRepository::new(pool.clone(), writer.clone()));
    let snapshot_repository = Arc::new(NetWorthRepository::new(pool.clone(), writer.clone()));

    let client_service = Arc::new(ClientService::new(client_repository.clone()));
    let holding_service = Arc::new(HoldingService::new(
        holding_repository.clone(),
        client_repository.clone(),
    ));
    let net_worth_service = Arc::new(NetWorthService::new(
        client_repository,
        holding_repository,
        snapshot_repository,
    ));

    Ok(Arc::new(AppState {
        client_service,
        holding_service,
        net_worth_service,
        db_path,
    }))
}
