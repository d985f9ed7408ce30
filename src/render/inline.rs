//! Self-contained pages built with `format!`, styles inlined.

use crate::fleet::stats::{BatteryBand, FleetStats};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::render::html::{
    bar_width, copyright, escape, nav_links, percent, SITE_NAME, TAGLINE, UNASSIGNED_DRIVER,
    UNKNOWN_LOCATION,
};

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 0; padding: 20px; background: #f5f5f5; }
        .container { max-width: 1200px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; }
        .nav { text-align: right; margin-bottom: 20px; }
        .nav-link { margin-left: 15px; color: #2c3e50; text-decoration: none; }
        .header { text-align: center; margin-bottom: 40px; }
        .header h1 { color: #2c3e50; font-size: 3em; margin: 0; }
        .header p { color: #7f8c8d; font-size: 1.2em; }
        .stats { display: flex; justify-content: space-around; margin: 40px 0; }
        .stat { text-align: center; padding: 20px; background: #3498db; color: white; border-radius: 10px; }
        .vehicles { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; }
        .vehicle { background: white; border: 1px solid #ddd; border-radius: 10px; padding: 20px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }
        .vehicle a { color: #2c3e50; }
        .battery { background: #ecf0f1; border-radius: 10px; height: 20px; margin: 10px 0; }
        .battery-fill { height: 100%; border-radius: 10px; }
        .status { padding: 2px 8px; border-radius: 6px; color: white; }
        .available { background: #27ae60; }
        .in_use { background: #f39c12; }
        .charging { background: #3498db; }
        .maintenance { background: #e74c3c; }
        .empty { color: #7f8c8d; text-align: center; }
        .footer { text-align: center; margin-top: 40px; color: #7f8c8d; }
"#;

pub fn home(vehicles: &[Vehicle], stats: &FleetStats) -> String {
    let body = format!(
        r#"<div class="header">
            <h1>{SITE_NAME}</h1>
            <p>{TAGLINE}</p>
        </div>
        {stats}
        <h2>Our Fleet</h2>
        {cards}"#,
        stats = stats_tiles(stats),
        cards = vehicle_cards(vehicles),
    );
    document(&format!("{SITE_NAME} - EV Management"), &body)
}

pub fn fleet(vehicles: &[Vehicle], stats: &FleetStats) -> String {
    let body = format!(
        r#"<div class="header">
            <h1>Fleet Overview</h1>
            <p>Every vehicle in the {SITE_NAME} fleet</p>
        </div>
        {stats}
        {cards}"#,
        stats = stats_tiles(stats),
        cards = vehicle_cards(vehicles),
    );
    document(&format!("Fleet - {SITE_NAME}"), &body)
}

pub fn vehicle(vehicle: &Vehicle) -> String {
    let body = format!(
        r#"<div class="header">
            <h1>{plate}</h1>
            <p>{model}</p>
        </div>
        <div class="vehicles">
            {card}
        </div>
        <p><a href="/fleet">&larr; Back to fleet</a></p>"#,
        plate = escape(&vehicle.license_plate),
        model = escape(&vehicle.model),
        card = vehicle_card(vehicle),
    );
    document(
        &format!("{} - {SITE_NAME}", escape(&vehicle.license_plate)),
        &body,
    )
}

pub fn about() -> String {
    let body = format!(
        r#"<div class="header">
            <h1>About {SITE_NAME}</h1>
            <p>{TAGLINE}</p>
        </div>
        <p>{SITE_NAME} keeps electric fleets moving. Operators see every vehicle's
        battery level, location and status at a glance, so charging and
        maintenance can be planned before a vehicle runs low.</p>
        <ul>
            <li>Live battery monitoring for every vehicle</li>
            <li>Driver and location tracking</li>
            <li>Charging and maintenance status overview</li>
        </ul>"#
    );
    document(&format!("About - {SITE_NAME}"), &body)
}

pub fn contact() -> String {
    let body = format!(
        r#"<div class="header">
            <h1>Contact Us</h1>
            <p>Questions about {SITE_NAME}? Get in touch.</p>
        </div>
        <p><strong>Email:</strong> info@fleetsmart.example</p>
        <p><strong>Phone:</strong> +1 (555) 010-2025</p>
        <p><strong>Office:</strong> 1 Charging Way, Downtown</p>"#
    );
    document(&format!("Contact - {SITE_NAME}"), &body)
}

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <div class="nav">{nav}</div>
        {body}
        <div class="footer">
            <p>Powered by {SITE_NAME} EV Management System</p>
            <p>{copyright}</p>
        </div>
    </div>
</body>
</html>
"#,
        nav = nav_links("nav-link"),
        copyright = copyright(),
    )
}

fn stats_tiles(stats: &FleetStats) -> String {
    format!(
        r#"<div class="stats">
            <div class="stat">
                <h2 id="total-vehicles">{total}</h2>
                <p>Total Vehicles</p>
            </div>
            <div class="stat">
                <h2 id="available-vehicles">{available}</h2>
                <p>Available</p>
            </div>
            <div class="stat">
                <h2 id="avg-battery">{avg}</h2>
                <p>Avg Battery</p>
            </div>
        </div>"#,
        total = stats.total,
        available = stats.available_count,
        avg = percent(stats.avg_battery),
    )
}

fn vehicle_cards(vehicles: &[Vehicle]) -> String {
    if vehicles.is_empty() {
        return r#"<p class="empty">No vehicles found in the fleet.</p>"#.to_string();
    }

    let cards: String = vehicles.iter().map(vehicle_card).collect();
    format!(r#"<div class="vehicles">{cards}</div>"#)
}

fn vehicle_card(vehicle: &Vehicle) -> String {
    format!(
        r#"
            <div class="vehicle">
                <h3><a href="/vehicle/{id}">{plate} - {model}</a></h3>
                <p><strong>Driver:</strong> {driver}</p>
                <p><strong>Location:</strong> {location}</p>
                <p><strong>Status:</strong> {status}</p>
                <div class="battery">
                    <div class="battery-fill" style="width: {width}%; background: {color};"></div>
                </div>
                <p><strong>Battery:</strong> {battery}</p>
            </div>"#,
        id = vehicle.id,
        plate = escape(&vehicle.license_plate),
        model = escape(&vehicle.model),
        driver = escape(vehicle.driver.as_deref().unwrap_or(UNASSIGNED_DRIVER)),
        location = escape(vehicle.location.as_deref().unwrap_or(UNKNOWN_LOCATION)),
        status = status_badge(vehicle.status),
        width = bar_width(vehicle.battery_level),
        color = BatteryBand::from_level(vehicle.battery_level).color(),
        battery = percent(vehicle.battery_level),
    )
}

fn status_badge(status: VehicleStatus) -> String {
    format!(
        r#"<span class="status {class}">{label}</span>"#,
        class = status.as_str(),
        label = status.label(),
    )
}
