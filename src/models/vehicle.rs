use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_BATTERY_LEVEL: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Available,
    InUse,
    Charging,
    Maintenance,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 4] = [
        VehicleStatus::Available,
        VehicleStatus::InUse,
        VehicleStatus::Charging,
        VehicleStatus::Maintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::InUse => "in_use",
            VehicleStatus::Charging => "charging",
            VehicleStatus::Maintenance => "maintenance",
        }
    }

    /// Human readable label, e.g. `In Use`.
    pub fn label(self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::InUse => "In Use",
            VehicleStatus::Charging => "Charging",
            VehicleStatus::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        VehicleStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == raw.trim())
            .ok_or_else(|| format!("unknown vehicle status `{raw}`"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: u64,
    pub license_plate: String,
    pub model: String,
    pub driver: Option<String>,
    pub battery_level: f64,
    pub location: Option<String>,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVehicle {
    pub license_plate: String,
    pub model: String,
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default)]
    pub battery_level: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<VehicleStatus>,
}

impl NewVehicle {
    pub fn new(license_plate: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            license_plate: license_plate.into(),
            model: model.into(),
            driver: None,
            battery_level: None,
            location: None,
            status: None,
        }
    }

    pub fn driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    pub fn battery_level(mut self, level: f64) -> Self {
        self.battery_level = Some(level);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn status(mut self, status: VehicleStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Validates the input and builds the stored record with defaults applied.
    pub fn into_vehicle(self, id: u64, now: DateTime<Utc>) -> Result<Vehicle, AppError> {
        let license_plate = required_text("license_plate", self.license_plate)?;
        let model = required_text("model", self.model)?;
        let battery_level = normalize_battery(self.battery_level.unwrap_or(DEFAULT_BATTERY_LEVEL))?;

        Ok(Vehicle {
            id,
            license_plate,
            model,
            driver: optional_text(self.driver),
            battery_level,
            location: optional_text(self.location),
            status: self.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update. An empty `driver` or `location` clears the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleUpdate {
    pub license_plate: Option<String>,
    pub model: Option<String>,
    pub driver: Option<String>,
    pub battery_level: Option<f64>,
    pub location: Option<String>,
    pub status: Option<VehicleStatus>,
}

impl VehicleUpdate {
    /// Applies the changes to `vehicle`. Nothing is written if validation fails.
    pub fn apply(self, vehicle: &mut Vehicle, now: DateTime<Utc>) -> Result<(), AppError> {
        let license_plate = self
            .license_plate
            .map(|plate| required_text("license_plate", plate))
            .transpose()?;
        let model = self
            .model
            .map(|model| required_text("model", model))
            .transpose()?;
        let battery_level = self.battery_level.map(normalize_battery).transpose()?;

        if let Some(plate) = license_plate {
            vehicle.license_plate = plate;
        }
        if let Some(model) = model {
            vehicle.model = model;
        }
        if let Some(driver) = self.driver {
            vehicle.driver = optional_text(Some(driver));
        }
        if let Some(level) = battery_level {
            vehicle.battery_level = level;
        }
        if let Some(location) = self.location {
            vehicle.location = optional_text(Some(location));
        }
        if let Some(status) = self.status {
            vehicle.status = status;
        }
        vehicle.updated_at = now;

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilter {
    pub status: Option<VehicleStatus>,
    /// Case-insensitive match against plate, model and driver.
    pub q: Option<String>,
}

impl VehicleFilter {
    pub fn status(status: VehicleStatus) -> Self {
        Self {
            status: Some(status),
            q: None,
        }
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if let Some(status) = self.status {
            if vehicle.status != status {
                return false;
            }
        }

        match self.q.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                [
                    Some(vehicle.license_plate.as_str()),
                    Some(vehicle.model.as_str()),
                    vehicle.driver.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }
}

fn required_text(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn normalize_battery(level: f64) -> Result<f64, AppError> {
    if !level.is_finite() {
        return Err(AppError::BadRequest(
            "battery_level must be a finite number".to_string(),
        ));
    }
    Ok(level.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{NewVehicle, VehicleFilter, VehicleStatus, VehicleUpdate};
    use crate::error::AppError;

    #[test]
    fn new_vehicle_gets_defaults() {
        let vehicle = NewVehicle::new("EV-100", "Nissan Leaf")
            .into_vehicle(7, Utc::now())
            .unwrap();

        assert_eq!(vehicle.id, 7);
        assert_eq!(vehicle.battery_level, 100.0);
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert!(vehicle.driver.is_none());
        assert!(vehicle.location.is_none());
    }

    #[test]
    fn blank_plate_or_model_is_rejected() {
        let no_plate = NewVehicle::new("  ", "BMW i3").into_vehicle(1, Utc::now());
        let no_model = NewVehicle::new("EV-1", "").into_vehicle(1, Utc::now());

        assert!(matches!(no_plate, Err(AppError::BadRequest(_))));
        assert!(matches!(no_model, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn battery_is_clamped_and_nan_rejected() {
        let high = NewVehicle::new("EV-1", "Kona")
            .battery_level(140.0)
            .into_vehicle(1, Utc::now())
            .unwrap();
        let low = NewVehicle::new("EV-2", "Kona")
            .battery_level(-3.0)
            .into_vehicle(2, Utc::now())
            .unwrap();
        let nan = NewVehicle::new("EV-3", "Kona")
            .battery_level(f64::NAN)
            .into_vehicle(3, Utc::now());

        assert_eq!(high.battery_level, 100.0);
        assert_eq!(low.battery_level, 0.0);
        assert!(matches!(nan, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn update_allows_any_status_transition_and_clears_driver() {
        let mut vehicle = NewVehicle::new("EV-1", "Model 3")
            .driver("John Doe")
            .status(VehicleStatus::Maintenance)
            .into_vehicle(1, Utc::now())
            .unwrap();

        VehicleUpdate {
            driver: Some(String::new()),
            status: Some(VehicleStatus::InUse),
            ..VehicleUpdate::default()
        }
        .apply(&mut vehicle, Utc::now())
        .unwrap();

        assert_eq!(vehicle.status, VehicleStatus::InUse);
        assert!(vehicle.driver.is_none());
    }

    #[test]
    fn failed_update_leaves_vehicle_untouched() {
        let mut vehicle = NewVehicle::new("EV-1", "Model 3")
            .into_vehicle(1, Utc::now())
            .unwrap();
        let before = vehicle.clone();

        let result = VehicleUpdate {
            model: Some("Model Y".to_string()),
            license_plate: Some(" ".to_string()),
            ..VehicleUpdate::default()
        }
        .apply(&mut vehicle, Utc::now());

        assert!(result.is_err());
        assert_eq!(vehicle, before);
    }

    #[test]
    fn filter_matches_status_and_text() {
        let vehicle = NewVehicle::new("EV-003", "BMW i3")
            .driver("Mike Johnson")
            .status(VehicleStatus::Charging)
            .into_vehicle(3, Utc::now())
            .unwrap();

        assert!(VehicleFilter::default().matches(&vehicle));
        assert!(VehicleFilter::status(VehicleStatus::Charging).matches(&vehicle));
        assert!(!VehicleFilter::status(VehicleStatus::Available).matches(&vehicle));

        let by_driver = VehicleFilter {
            status: None,
            q: Some("mike".to_string()),
        };
        let by_other = VehicleFilter {
            status: None,
            q: Some("tesla".to_string()),
        };
        assert!(by_driver.matches(&vehicle));
        assert!(!by_other.matches(&vehicle));
    }

    #[test]
    fn status_parses_and_labels() {
        assert_eq!("in_use".parse::<VehicleStatus>(), Ok(VehicleStatus::InUse));
        assert!("parked".parse::<VehicleStatus>().is_err());
        assert_eq!(VehicleStatus::InUse.label(), "In Use");
        assert_eq!(VehicleStatus::Maintenance.to_string(), "maintenance");
    }
}
