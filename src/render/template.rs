//! Named page templates rendered from a serialized context.
//!
//! Handlers bind their data into a serde-serializable context; the registry
//! looks the template up by name and hands it the context as JSON. Templates
//! only read from the context, so any serializable value can be bound.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::fleet::stats::BatteryBand;
use crate::models::vehicle::VehicleStatus;
use crate::render::html::{
    bar_width, copyright, escape, nav_links, percent, SITE_NAME, TAGLINE, UNASSIGNED_DRIVER,
    UNKNOWN_LOCATION,
};

pub const HOMEPAGE: &str = "fleet_smart.homepage";
pub const FLEET_OVERVIEW: &str = "fleet_smart.fleet_overview";
pub const VEHICLE_DETAIL: &str = "fleet_smart.vehicle_detail";
pub const ABOUT_PAGE: &str = "fleet_smart.about_page";
pub const CONTACT_PAGE: &str = "fleet_smart.contact_page";

pub type TemplateFn = Box<dyn Fn(&Value) -> String + Send + Sync>;

pub struct TemplateRegistry {
    templates: HashMap<String, TemplateFn>,
}

impl TemplateRegistry {
    /// A registry without any templates.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// The registry with the five website pages.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(HOMEPAGE, homepage);
        registry.register(FLEET_OVERVIEW, fleet_overview);
        registry.register(VEHICLE_DETAIL, vehicle_detail);
        registry.register(ABOUT_PAGE, |_| about_page());
        registry.register(CONTACT_PAGE, |_| contact_page());
        registry
    }

    /// Registers `template` under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, template: F)
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.templates.insert(name.into(), Box::new(template));
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.templates.remove(name).is_some()
    }

    pub fn render<C: Serialize>(&self, name: &str, context: &C) -> Result<String, AppError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| AppError::NotFound(format!("template {name} not found")))?;

        let context = serde_json::to_value(context).map_err(|err| {
            AppError::Internal(format!("failed to serialize context for {name}: {err}"))
        })?;

        Ok(template(&context))
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn text<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

fn number(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn count(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn status_of(vehicle: &Value) -> VehicleStatus {
    text(vehicle, "status")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

fn badge_class(status: VehicleStatus) -> &'static str {
    match status {
        VehicleStatus::Available => "bg-success",
        VehicleStatus::InUse => "bg-warning",
        VehicleStatus::Charging => "bg-info",
        VehicleStatus::Maintenance => "bg-secondary",
    }
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | {SITE_NAME}</title>
    <link rel="stylesheet" href="/css/fleet.css">
</head>
<body>
    <header class="navbar">
        <a class="brand" href="/">{SITE_NAME}</a>
        <nav>{nav}</nav>
    </header>
    <main class="container">
{content}
    </main>
    <footer class="footer">
        <div>
            <h5>{SITE_NAME}</h5>
            <p>{TAGLINE}</p>
        </div>
        <div>
            <h6>Quick Links</h6>
            <nav>{nav}</nav>
        </div>
        <p class="small">{copyright}</p>
    </footer>
</body>
</html>
"#,
        title = escape(title),
        nav = nav_links("nav-link"),
        copyright = copyright(),
    )
}

fn stat_cards(context: &Value) -> String {
    format!(
        r#"<section class="stats">
            <div class="stat-card"><span class="stat-value" id="total-vehicles">{total}</span><span class="stat-label">Total Vehicles</span></div>
            <div class="stat-card"><span class="stat-value" id="available-vehicles">{available}</span><span class="stat-label">Available</span></div>
            <div class="stat-card"><span class="stat-value" id="avg-battery">{avg}</span><span class="stat-label">Avg Battery</span></div>
        </section>"#,
        total = count(context, "total"),
        available = count(context, "available_count"),
        avg = percent(number(context, "avg_battery")),
    )
}

fn vehicle_grid(vehicles: &[Value]) -> String {
    if vehicles.is_empty() {
        return r#"<p class="text-muted">No vehicles found in the fleet.</p>"#.to_string();
    }

    let cards: String = vehicles
        .iter()
        .map(|vehicle| {
            let status = status_of(vehicle);
            let battery = number(vehicle, "battery_level");
            format!(
                r#"
            <div class="vehicle-card">
                <div class="vehicle-card-header">
                    <h5><a href="/vehicle/{id}">{plate}</a></h5>
                    <span class="badge {badge}">{label}</span>
                </div>
                <p class="vehicle-model">{model}</p>
                <p class="vehicle-driver">{driver}</p>
                <p class="vehicle-location">{location}</p>
                <div class="battery-section">
                    <span>Battery Level</span> <span>{level}</span>
                    <div class="progress">
                        <div class="progress-bar {band}" style="width: {width}%"></div>
                    </div>
                </div>
            </div>"#,
                id = count(vehicle, "id"),
                plate = escape(text(vehicle, "license_plate").unwrap_or_default()),
                badge = badge_class(status),
                label = status.label(),
                model = escape(text(vehicle, "model").unwrap_or_default()),
                driver = escape(text(vehicle, "driver").unwrap_or(UNASSIGNED_DRIVER)),
                location = escape(text(vehicle, "location").unwrap_or(UNKNOWN_LOCATION)),
                level = percent(battery),
                band = BatteryBand::from_level(battery).css_class(),
                width = bar_width(battery),
            )
        })
        .collect();

    format!(r#"<section class="vehicle-grid">{cards}</section>"#)
}

fn homepage(context: &Value) -> String {
    let content = format!(
        r#"        <section class="hero">
            <h1>{SITE_NAME}</h1>
            <p class="lead">{TAGLINE}</p>
            <a class="btn" href="/fleet">View the fleet</a>
        </section>
        {stats}
        <h2>Our Fleet</h2>
        {grid}"#,
        stats = stat_cards(context),
        grid = vehicle_grid(items(context, "vehicles")),
    );
    layout("Home", &content)
}

fn fleet_overview(context: &Value) -> String {
    let content = format!(
        r#"        <h1>Fleet Overview</h1>
        {stats}
        {grid}"#,
        stats = stat_cards(context),
        grid = vehicle_grid(items(context, "vehicles")),
    );
    layout("Fleet", &content)
}

fn vehicle_detail(context: &Value) -> String {
    let empty = Value::Null;
    let vehicle = context.get("vehicle").unwrap_or(&empty);
    let status = status_of(vehicle);
    let battery = number(vehicle, "battery_level");
    let plate = text(vehicle, "license_plate").unwrap_or_default();

    let content = format!(
        r#"        <h1>{plate}</h1>
        <table class="vehicle-detail">
            <tr><th>Model</th><td>{model}</td></tr>
            <tr><th>Driver</th><td>{driver}</td></tr>
            <tr><th>Location</th><td>{location}</td></tr>
            <tr><th>Status</th><td><span class="badge {badge}">{label}</span></td></tr>
            <tr><th>Battery</th><td>{level}
                <div class="progress"><div class="progress-bar {band}" style="width: {width}%"></div></div>
            </td></tr>
        </table>
        <a href="/fleet">&larr; Back to fleet</a>"#,
        plate = escape(plate),
        model = escape(text(vehicle, "model").unwrap_or_default()),
        driver = escape(text(vehicle, "driver").unwrap_or(UNASSIGNED_DRIVER)),
        location = escape(text(vehicle, "location").unwrap_or(UNKNOWN_LOCATION)),
        badge = badge_class(status),
        label = status.label(),
        level = percent(battery),
        band = BatteryBand::from_level(battery).css_class(),
        width = bar_width(battery),
    );
    layout(plate, &content)
}

fn about_page() -> String {
    let content = format!(
        r#"        <h1>About {SITE_NAME}</h1>
        <p class="lead">{TAGLINE}</p>
        <p>{SITE_NAME} keeps electric fleets moving. Operators see every vehicle's
        battery level, location and status at a glance, so charging and
        maintenance can be planned before a vehicle runs low.</p>
        <div class="feature-card">Live battery monitoring for every vehicle</div>
        <div class="feature-card">Driver and location tracking</div>
        <div class="feature-card">Charging and maintenance status overview</div>"#
    );
    layout("About", &content)
}

fn contact_page() -> String {
    let content = r#"        <h1>Contact Us</h1>
        <p class="lead">Questions about our fleet platform? Get in touch.</p>
        <address>
            <p><strong>Email:</strong> info@fleetsmart.example</p>
            <p><strong>Phone:</strong> +1 (555) 010-2025</p>
            <p><strong>Office:</strong> 1 Charging Way, Downtown</p>
        </address>"#;
    layout("Contact", content)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{TemplateRegistry, HOMEPAGE, VEHICLE_DETAIL};
    use crate::error::AppError;

    #[test]
    fn unknown_template_is_not_found() {
        let registry = TemplateRegistry::with_defaults();

        let result = registry.render("fleet_smart.missing", &json!({}));

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn custom_template_receives_context() {
        let mut registry = TemplateRegistry::empty();
        registry.register("greeting", |ctx| {
            format!("hello {}", ctx["name"].as_str().unwrap_or("nobody"))
        });

        let page = registry.render("greeting", &json!({ "name": "fleet" })).unwrap();

        assert_eq!(page, "hello fleet");
    }

    #[test]
    fn homepage_binds_stats_and_bands() {
        let registry = TemplateRegistry::with_defaults();
        let context = json!({
            "vehicles": [
                { "id": 1, "license_plate": "EV-1", "model": "BMW i3", "driver": null,
                  "battery_level": 80.0, "location": null, "status": "available" },
                { "id": 2, "license_plate": "EV-2", "model": "BMW i3", "driver": "Jane",
                  "battery_level": 20.0, "location": "Depot", "status": "in_use" }
            ],
            "total": 2,
            "available_count": 1,
            "avg_battery": 50.0
        });

        let page = registry.render(HOMEPAGE, &context).unwrap();

        assert!(page.contains(r#"id="total-vehicles">2<"#));
        assert!(page.contains(r#"id="available-vehicles">1<"#));
        assert!(page.contains(r#"id="avg-battery">50.0%<"#));
        assert!(page.contains(r#"progress-bar bg-success" style="width: 80%""#));
        assert!(page.contains(r#"progress-bar bg-danger" style="width: 20%""#));
        assert!(page.contains(r#"<span class="badge bg-warning">In Use</span>"#));
    }

    #[test]
    fn detail_shows_placeholders_for_missing_fields() {
        let registry = TemplateRegistry::with_defaults();
        let context = json!({
            "vehicle": { "id": 4, "license_plate": "EV-004", "model": "Tesla Model Y",
                         "battery_level": 23.0, "status": "maintenance" }
        });

        let page = registry.render(VEHICLE_DETAIL, &context).unwrap();

        assert!(page.contains("EV-004"));
        assert!(page.contains("Unassigned"));
        assert!(page.contains("Unknown"));
        assert!(page.contains("bg-warning"));
    }
}
