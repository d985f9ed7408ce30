use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;

use crate::error::AppError;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleFilter, VehicleUpdate};
use crate::store::VehicleStore;

/// In-process vehicle store. Ids start at 1 and are never reused.
pub struct MemoryVehicleStore {
    vehicles: DashMap<u64, Vehicle>,
    next_id: AtomicU64,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self {
            vehicles: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryVehicleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleStore for MemoryVehicleStore {
    fn create(&self, new: NewVehicle) -> Result<Vehicle, AppError> {
        // validate before taking an id so rejected input leaves no gap
        let mut vehicle = new.into_vehicle(0, Utc::now())?;
        vehicle.id = self.next_id.fetch_add(1, Ordering::Relaxed);

        self.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    fn get(&self, id: u64) -> Result<Option<Vehicle>, AppError> {
        Ok(self.vehicles.get(&id).map(|entry| entry.value().clone()))
    }

    fn search(&self, filter: &VehicleFilter) -> Result<Vec<Vehicle>, AppError> {
        let mut vehicles: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        vehicles.sort_by_key(|vehicle| vehicle.id);
        Ok(vehicles)
    }

    fn update(&self, id: u64, changes: VehicleUpdate) -> Result<Option<Vehicle>, AppError> {
        let Some(mut vehicle) = self.vehicles.get_mut(&id) else {
            return Ok(None);
        };

        changes.apply(&mut vehicle, Utc::now())?;
        Ok(Some(vehicle.clone()))
    }

    fn delete(&self, id: u64) -> Result<bool, AppError> {
        Ok(self.vehicles.remove(&id).is_some())
    }

    fn count(&self) -> Result<usize, AppError> {
        Ok(self.vehicles.len())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryVehicleStore;
    use crate::models::vehicle::{NewVehicle, VehicleFilter, VehicleStatus, VehicleUpdate};
    use crate::store::VehicleStore;

    fn store_with(plates: &[&str]) -> MemoryVehicleStore {
        let store = MemoryVehicleStore::new();
        for plate in plates {
            store.create(NewVehicle::new(*plate, "Nissan Leaf")).unwrap();
        }
        store
    }

    #[test]
    fn empty_store_searches_to_empty_list() {
        let store = MemoryVehicleStore::new();

        assert!(store.search(&VehicleFilter::default()).unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn search_returns_insertion_order() {
        let store = store_with(&["EV-003", "EV-001", "EV-002"]);

        let plates: Vec<String> = store
            .search(&VehicleFilter::default())
            .unwrap()
            .into_iter()
            .map(|vehicle| vehicle.license_plate)
            .collect();

        assert_eq!(plates, ["EV-003", "EV-001", "EV-002"]);
    }

    #[test]
    fn rejected_create_does_not_consume_an_id() {
        let store = MemoryVehicleStore::new();

        assert!(store.create(NewVehicle::new("", "BMW i3")).is_err());
        let vehicle = store.create(NewVehicle::new("EV-1", "BMW i3")).unwrap();

        assert_eq!(vehicle.id, 1);
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let store = store_with(&["EV-001"]);

        let missing = store.update(99, VehicleUpdate::default()).unwrap();
        assert!(missing.is_none());
        assert!(!store.delete(99).unwrap());

        let updated = store
            .update(
                1,
                VehicleUpdate {
                    status: Some(VehicleStatus::Charging),
                    ..VehicleUpdate::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, VehicleStatus::Charging);
        assert!(updated.updated_at >= updated.created_at);

        assert!(store.delete(1).unwrap());
        assert!(store.get(1).unwrap().is_none());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = store_with(&["EV-001", "EV-002"]);

        store.delete(2).unwrap();
        let vehicle = store.create(NewVehicle::new("EV-003", "BMW i3")).unwrap();

        assert_eq!(vehicle.id, 3);
    }
}
