use tracing::info;

use crate::error::AppError;
use crate::models::vehicle::{NewVehicle, VehicleStatus};
use crate::store::VehicleStore;

pub fn demo_fleet() -> Vec<NewVehicle> {
    vec![
        NewVehicle::new("EV-001", "Tesla Model 3")
            .driver("John Doe")
            .location("Downtown Office")
            .battery_level(85.0)
            .status(VehicleStatus::Available),
        NewVehicle::new("EV-002", "Nissan Leaf")
            .driver("Jane Smith")
            .location("Warehouse")
            .battery_level(92.0)
            .status(VehicleStatus::InUse),
        NewVehicle::new("EV-003", "BMW i3")
            .driver("Mike Johnson")
            .location("Charging Station A")
            .battery_level(45.0)
            .status(VehicleStatus::Charging),
        NewVehicle::new("EV-004", "Tesla Model Y")
            .location("Service Center")
            .battery_level(23.0)
            .status(VehicleStatus::Maintenance),
        NewVehicle::new("EV-005", "Hyundai Kona Electric")
            .driver("Sarah Wilson")
            .location("Client Site B")
            .battery_level(67.0)
            .status(VehicleStatus::InUse),
        NewVehicle::new("EV-006", "Volkswagen ID.4")
            .location("Main Depot")
            .battery_level(89.0)
            .status(VehicleStatus::Available),
    ]
}

/// Loads the demo fleet into an empty store. Returns how many were created.
pub fn seed_demo_fleet(store: &dyn VehicleStore) -> Result<usize, AppError> {
    if store.count()? > 0 {
        info!("vehicle store already populated, skipping demo fleet");
        return Ok(0);
    }

    let mut created = 0;
    for vehicle in demo_fleet() {
        store.create(vehicle)?;
        created += 1;
    }

    info!(vehicles = created, "demo fleet loaded");
    Ok(created)
}
