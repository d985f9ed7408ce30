use serde::Serialize;

use crate::models::vehicle::{Vehicle, VehicleStatus};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FleetStats {
    pub total: usize,
    pub available_count: usize,
    /// Mean battery level rounded to one decimal, `0.0` for an empty fleet.
    pub avg_battery: f64,
}

pub fn compute_stats(vehicles: &[Vehicle]) -> FleetStats {
    let total = vehicles.len();
    let available_count = vehicles
        .iter()
        .filter(|vehicle| vehicle.status == VehicleStatus::Available)
        .count();

    let avg_battery = if total == 0 {
        0.0
    } else {
        let sum: f64 = vehicles.iter().map(|vehicle| vehicle.battery_level).sum();
        round_one_decimal(sum / total as f64)
    };

    FleetStats {
        total,
        available_count,
        avg_battery,
    }
}

/// Rounds like `{:.1}` does (half to even on the exact value), so the
/// average matches the per-vehicle percentages printed on the pages.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Color tier of a battery bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryBand {
    /// above 50
    Green,
    /// above 20, up to 50
    Amber,
    /// 20 and below
    Red,
}

impl BatteryBand {
    pub fn from_level(level: f64) -> Self {
        if level > 50.0 {
            BatteryBand::Green
        } else if level > 20.0 {
            BatteryBand::Amber
        } else {
            BatteryBand::Red
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            BatteryBand::Green => "#27ae60",
            BatteryBand::Amber => "#f39c12",
            BatteryBand::Red => "#e74c3c",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            BatteryBand::Green => "bg-success",
            BatteryBand::Amber => "bg-warning",
            BatteryBand::Red => "bg-danger",
        }
    }
}
