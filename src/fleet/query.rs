use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::vehicle::{Vehicle, VehicleFilter};
use crate::state::AppState;

/// Lists vehicles matching `filter`.
///
/// A missing or unreachable store yields an empty fleet instead of an error,
/// so public pages keep rendering in a deployment without the data module.
pub fn list_vehicles(state: &AppState, filter: &VehicleFilter) -> Result<Vec<Vehicle>, AppError> {
    match state.store().and_then(|store| store.search(filter)) {
        Ok(vehicles) => {
            debug!(count = vehicles.len(), "listed vehicles");
            Ok(vehicles)
        }
        Err(AppError::StoreUnavailable(reason)) => {
            warn!(%reason, "vehicle store unavailable, serving empty fleet");
            state.metrics.store_fallbacks_total.inc();
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

pub fn get_vehicle(state: &AppState, id: u64) -> Result<Vehicle, AppError> {
    let not_found = || AppError::NotFound(format!("vehicle {id} not found"));

    match state.store().and_then(|store| store.get(id)) {
        Ok(Some(vehicle)) => Ok(vehicle),
        Ok(None) => Err(not_found()),
        Err(AppError::StoreUnavailable(reason)) => {
            warn!(vehicle_id = id, %reason, "vehicle store unavailable");
            Err(not_found())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::{get_vehicle, list_vehicles};
    use crate::error::AppError;
    use crate::models::vehicle::{NewVehicle, VehicleFilter, VehicleStatus};
    use crate::render::{PageRenderer, RenderStrategy};
    use crate::state::AppState;

    fn renderer() -> PageRenderer {
        PageRenderer::new(RenderStrategy::Inline)
    }

    #[test]
    fn missing_store_degrades_to_empty_list() {
        let state = AppState::without_store(renderer());

        let vehicles = list_vehicles(&state, &VehicleFilter::default()).unwrap();

        assert!(vehicles.is_empty());
        assert_eq!(state.metrics.store_fallbacks_total.get(), 1);
    }

    #[test]
    fn missing_store_makes_vehicle_lookup_not_found() {
        let state = AppState::without_store(renderer());

        assert!(matches!(get_vehicle(&state, 1), Err(AppError::NotFound(_))));
    }

    #[test]
    fn filter_is_forwarded_to_store() {
        let state = AppState::in_memory(renderer());
        let store = state.store().unwrap();
        store
            .create(NewVehicle::new("EV-1", "BMW i3").status(VehicleStatus::Charging))
            .unwrap();
        store.create(NewVehicle::new("EV-2", "BMW i3")).unwrap();

        let charging =
            list_vehicles(&state, &VehicleFilter::status(VehicleStatus::Charging)).unwrap();

        assert_eq!(charging.len(), 1);
        assert_eq!(charging[0].license_plate, "EV-1");
        assert!(matches!(get_vehicle(&state, 9999), Err(AppError::NotFound(_))));
    }
}
