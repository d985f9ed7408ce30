pub mod html;
pub mod inline;
pub mod template;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AppError;
use crate::fleet::stats::FleetStats;
use crate::models::vehicle::Vehicle;

pub use template::TemplateRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    Template,
    Inline,
}

impl FromStr for RenderStrategy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(RenderStrategy::Template),
            "inline" => Ok(RenderStrategy::Inline),
            other => Err(format!("expected `template` or `inline`, got `{other}`")),
        }
    }
}

impl fmt::Display for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStrategy::Template => f.write_str("template"),
            RenderStrategy::Inline => f.write_str("inline"),
        }
    }
}

/// Values bound into the home and fleet templates.
#[derive(Debug, Serialize)]
pub struct FleetContext<'a> {
    pub vehicles: &'a [Vehicle],
    pub total: usize,
    pub available_count: usize,
    pub avg_battery: f64,
}

impl<'a> FleetContext<'a> {
    pub fn new(vehicles: &'a [Vehicle], stats: &FleetStats) -> Self {
        Self {
            vehicles,
            total: stats.total,
            available_count: stats.available_count,
            avg_battery: stats.avg_battery,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleContext<'a> {
    pub vehicle: &'a Vehicle,
}

/// Turns fleet data into HTML documents.
pub enum PageRenderer {
    Template(TemplateRegistry),
    Inline,
}

impl PageRenderer {
    pub fn new(strategy: RenderStrategy) -> Self {
        match strategy {
            RenderStrategy::Template => PageRenderer::Template(TemplateRegistry::with_defaults()),
            RenderStrategy::Inline => PageRenderer::Inline,
        }
    }

    pub fn strategy(&self) -> RenderStrategy {
        match self {
            PageRenderer::Template(_) => RenderStrategy::Template,
            PageRenderer::Inline => RenderStrategy::Inline,
        }
    }

    pub fn home(&self, vehicles: &[Vehicle], stats: &FleetStats) -> Result<String, AppError> {
        match self {
            PageRenderer::Template(registry) => {
                registry.render(template::HOMEPAGE, &FleetContext::new(vehicles, stats))
            }
            PageRenderer::Inline => Ok(inline::home(vehicles, stats)),
        }
    }

    pub fn fleet(&self, vehicles: &[Vehicle], stats: &FleetStats) -> Result<String, AppError> {
        match self {
            PageRenderer::Template(registry) => {
                registry.render(template::FLEET_OVERVIEW, &FleetContext::new(vehicles, stats))
            }
            PageRenderer::Inline => Ok(inline::fleet(vehicles, stats)),
        }
    }

    pub fn vehicle(&self, vehicle: &Vehicle) -> Result<String, AppError> {
        match self {
            PageRenderer::Template(registry) => {
                registry.render(template::VEHICLE_DETAIL, &VehicleContext { vehicle })
            }
            PageRenderer::Inline => Ok(inline::vehicle(vehicle)),
        }
    }

    pub fn about(&self) -> Result<String, AppError> {
        match self {
            PageRenderer::Template(registry) => registry.render(template::ABOUT_PAGE, &()),
            PageRenderer::Inline => Ok(inline::about()),
        }
    }

    pub fn contact(&self) -> Result<String, AppError> {
        match self {
            PageRenderer::Template(registry) => registry.render(template::CONTACT_PAGE, &()),
            PageRenderer::Inline => Ok(inline::contact()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{PageRenderer, RenderStrategy};
    use crate::fleet::stats::compute_stats;
    use crate::models::vehicle::{NewVehicle, Vehicle, VehicleStatus};

    fn fleet() -> Vec<Vehicle> {
        vec![
            NewVehicle::new("EV-001", "Tesla Model 3")
                .battery_level(80.0)
                .into_vehicle(1, Utc::now())
                .unwrap(),
            NewVehicle::new("EV-002", "Nissan Leaf")
                .battery_level(20.0)
                .status(VehicleStatus::InUse)
                .into_vehicle(2, Utc::now())
                .unwrap(),
        ]
    }

    #[test]
    fn strategies_report_identical_stats() {
        let vehicles = fleet();
        let stats = compute_stats(&vehicles);

        for strategy in [RenderStrategy::Template, RenderStrategy::Inline] {
            let renderer = PageRenderer::new(strategy);
            assert_eq!(renderer.strategy(), strategy);

            for page in [
                renderer.home(&vehicles, &stats).unwrap(),
                renderer.fleet(&vehicles, &stats).unwrap(),
            ] {
                assert!(page.contains(r#"id="total-vehicles">2<"#), "{strategy}");
                assert!(page.contains(r#"id="available-vehicles">1<"#), "{strategy}");
                assert!(page.contains(r#"id="avg-battery">50.0%<"#), "{strategy}");
                assert!(page.contains("EV-002"), "{strategy}");
            }
        }
    }

    #[test]
    fn static_pages_render_for_both_strategies() {
        for strategy in [RenderStrategy::Template, RenderStrategy::Inline] {
            let renderer = PageRenderer::new(strategy);

            assert!(renderer.about().unwrap().contains("About Fleet Smart"));
            assert!(renderer.contact().unwrap().contains("Contact Us"));
        }
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("Template".parse::<RenderStrategy>(), Ok(RenderStrategy::Template));
        assert_eq!(" inline ".parse::<RenderStrategy>(), Ok(RenderStrategy::Inline));
        assert!("qweb".parse::<RenderStrategy>().is_err());
    }
}
