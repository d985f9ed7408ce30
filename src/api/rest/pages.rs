use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::{debug, error, warn};

use crate::error::AppError;
use crate::fleet::query::{get_vehicle, list_vehicles};
use crate::fleet::stats::compute_stats;
use crate::models::vehicle::{VehicleFilter, VehicleStatus};
use crate::render::html::{error_page, not_found_page};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/fleet", get(fleet))
        .route("/vehicle/:id", get(vehicle_detail))
        .route("/about", get(about))
        .route("/contact", get(contact))
}

/// Page failures are answered with HTML, not the JSON body of [`AppError`].
#[derive(Debug)]
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        match self.0 {
            AppError::NotFound(msg) => (status, Html(not_found_page(&msg))).into_response(),
            other => {
                error!(error = %other, "page failed");
                (status, Html(error_page())).into_response()
            }
        }
    }
}

fn render_page<F>(state: &AppState, page: &'static str, build: F) -> Result<Html<String>, PageError>
where
    F: FnOnce(&AppState) -> Result<String, AppError>,
{
    state.metrics.page_views_total.with_label_values(&[page]).inc();
    let timer = state
        .metrics
        .page_render_seconds
        .with_label_values(&[page])
        .start_timer();

    let result = build(state);
    timer.observe_duration();

    match result {
        Ok(body) => Ok(Html(body)),
        Err(err) => {
            warn!(page, error = %err, "page not rendered");
            Err(err.into())
        }
    }
}

async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    render_page(&state, "home", |state| {
        let vehicles = list_vehicles(state, &VehicleFilter::default())?;
        let stats = compute_stats(&vehicles);
        state.renderer.home(&vehicles, &stats)
    })
}

/// Builds the fleet filter from raw query parameters. An unknown status is
/// ignored so the page still lists the whole fleet.
fn fleet_filter(params: &HashMap<String, String>) -> VehicleFilter {
    let status = params
        .get("status")
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| match raw.parse::<VehicleStatus>() {
            Ok(status) => Some(status),
            Err(err) => {
                debug!(error = %err, "ignoring fleet status filter");
                None
            }
        });

    VehicleFilter {
        status,
        q: params.get("q").cloned(),
    }
}

async fn fleet(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, PageError> {
    let filter = fleet_filter(&params);

    render_page(&state, "fleet", |state| {
        let vehicles = list_vehicles(state, &filter)?;
        let stats = compute_stats(&vehicles);
        state.renderer.fleet(&vehicles, &stats)
    })
}

async fn vehicle_detail(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, PageError> {
    render_page(&state, "vehicle", |state| {
        // a non-numeric id cannot name a vehicle
        let id = raw_id
            .parse::<u64>()
            .map_err(|_| AppError::NotFound(format!("vehicle {raw_id} not found")))?;
        let vehicle = get_vehicle(state, id)?;
        state.renderer.vehicle(&vehicle)
    })
}

async fn about(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    render_page(&state, "about", |state| state.renderer.about())
}

async fn contact(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    render_page(&state, "contact", |state| state.renderer.contact())
}
