use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use tracing::info;

use crate::error::AppError;
use crate::fleet::query;
use crate::fleet::stats::{compute_stats, FleetStats};
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleFilter, VehicleUpdate};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/vehicles", post(create_vehicle).get(list_vehicles))
        .route(
            "/api/vehicles/:id",
            get(get_vehicle).patch(update_vehicle).delete(delete_vehicle),
        )
        .route("/api/stats", get(fleet_stats))
}

fn vehicle_not_found(id: u64) -> AppError {
    AppError::NotFound(format!("vehicle {id} not found"))
}

async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewVehicle>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let vehicle = state.store()?.create(payload)?;

    state
        .metrics
        .vehicle_writes_total
        .with_label_values(&["create"])
        .inc();
    info!(vehicle_id = vehicle.id, plate = %vehicle.license_plate, "vehicle created");

    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<VehicleFilter>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = state.store()?.search(&filter)?;
    Ok(Json(vehicles))
}

async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state
        .store()?
        .get(id)?
        .ok_or_else(|| vehicle_not_found(id))?;

    Ok(Json(vehicle))
}

async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(payload): Json<VehicleUpdate>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state
        .store()?
        .update(id, payload)?
        .ok_or_else(|| vehicle_not_found(id))?;

    state
        .metrics
        .vehicle_writes_total
        .with_label_values(&["update"])
        .inc();
    info!(vehicle_id = id, status = %vehicle.status, "vehicle updated");

    Ok(Json(vehicle))
}

async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    if !state.store()?.delete(id)? {
        return Err(vehicle_not_found(id));
    }

    state
        .metrics
        .vehicle_writes_total
        .with_label_values(&["delete"])
        .inc();
    info!(vehicle_id = id, "vehicle deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn fleet_stats(State(state): State<Arc<AppState>>) -> Result<Json<FleetStats>, AppError> {
    let vehicles = query::list_vehicles(&state, &VehicleFilter::default())?;
    Ok(Json(compute_stats(&vehicles)))
}
