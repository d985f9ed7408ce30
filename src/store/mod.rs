//! Storage for vehicle records.
//!
//! Page handlers only see the [`VehicleStore`] trait. A deployment without
//! the data module simply has no store, see [`crate::state::AppState`].

pub mod memory;

use crate::error::AppError;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleFilter, VehicleUpdate};

pub use memory::MemoryVehicleStore;

pub trait VehicleStore: Send + Sync {
    /// Validates `new`, assigns the next id and stores the record.
    fn create(&self, new: NewVehicle) -> Result<Vehicle, AppError>;

    fn get(&self, id: u64) -> Result<Option<Vehicle>, AppError>;

    /// Matching vehicles ordered by id, which is insertion order.
    fn search(&self, filter: &VehicleFilter) -> Result<Vec<Vehicle>, AppError>;

    /// Returns `Ok(None)` when `id` does not exist.
    fn update(&self, id: u64, changes: VehicleUpdate) -> Result<Option<Vehicle>, AppError>;

    /// Returns whether a record was removed.
    fn delete(&self, id: u64) -> Result<bool, AppError>;

    fn count(&self) -> Result<usize, AppError>;
}
