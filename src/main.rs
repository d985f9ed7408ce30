use std::sync::Arc;

use fleet_smart::api;
use fleet_smart::config::{Config, LogFormat};
use fleet_smart::error::AppError;
use fleet_smart::fleet::seed::seed_demo_fleet;
use fleet_smart::render::PageRenderer;
use fleet_smart::state::AppState;
use fleet_smart::store::{MemoryVehicleStore, VehicleStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    init_tracing(&config);

    let store: Option<Arc<dyn VehicleStore>> = if config.fleet_store_enabled {
        let store = MemoryVehicleStore::new();
        if config.seed_demo_fleet {
            seed_demo_fleet(&store)?;
        }
        Some(Arc::new(store))
    } else {
        tracing::warn!("vehicle store disabled, pages will show an empty fleet");
        None
    };

    let renderer = PageRenderer::new(config.render_strategy);
    let shared_state = Arc::new(AppState::new(store, renderer));

    let app = api::rest::router(shared_state);

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(
        http_port = config.http_port,
        render_strategy = %config.render_strategy,
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::new(config.log_level.clone());

    match config.log_format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
