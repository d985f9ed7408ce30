pub mod pages;
pub mod vehicles;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(pages::router())
        .merge(vehicles::router())
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .with_state(state)
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    /// `None` when the vehicle store is not installed or unreachable.
    vehicles: Option<usize>,
    render_strategy: String,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let vehicles = state.store().and_then(|store| store.count()).ok();

    Json(HealthResponse {
        status: "ok",
        vehicles,
        render_strategy: state.renderer.strategy().to_string(),
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
