use std::sync::Arc;

use crate::error::AppError;
use crate::observability::metrics::Metrics;
use crate::render::PageRenderer;
use crate::store::{MemoryVehicleStore, VehicleStore};

pub struct AppState {
    /// `None` when the website is deployed without the vehicle data module.
    pub vehicles: Option<Arc<dyn VehicleStore>>,
    pub renderer: PageRenderer,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(vehicles: Option<Arc<dyn VehicleStore>>, renderer: PageRenderer) -> Self {
        Self {
            vehicles,
            renderer,
            metrics: Metrics::new(),
        }
    }

    pub fn in_memory(renderer: PageRenderer) -> Self {
        Self::new(Some(Arc::new(MemoryVehicleStore::new())), renderer)
    }

    pub fn without_store(renderer: PageRenderer) -> Self {
        Self::new(None, renderer)
    }

    pub fn store(&self) -> Result<&dyn VehicleStore, AppError> {
        self.vehicles
            .as_deref()
            .ok_or_else(|| AppError::StoreUnavailable("vehicle module is not installed".to_string()))
    }
}
