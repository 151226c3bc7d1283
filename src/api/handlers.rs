//! API route handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::analytics::{MeterLevel, Severity};
use crate::clock::now_ms;
use crate::contacts::{contacts_for_place, contacts_for_state, Authority, STATES};
use crate::location::display_name_or_fallback;
use crate::query;
use crate::refresh::{refresh_map, Dashboard};
use crate::types::{
    FilterCriteria, HealthImpact, NewReading, NoiseAnalysis, NoisePrediction, TimeRange,
    UserLocation,
};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(dashboard: Arc<Dashboard>) -> Self {
        Self { dashboard }
    }
}

/// `lat` and `lon` must come together.
fn center_from(lat: Option<f64>, lon: Option<f64>) -> Result<Option<UserLocation>, Response> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some(UserLocation::new(lat, lon, 0.0))),
        (None, None) => Ok(None),
        _ => Err(ApiErrorResponse::bad_request(
            "lat and lon must be given together",
        )),
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub last_local_update: Option<i64>,
    pub last_nearby_update: Option<i64>,
}

/// GET /api/health
pub async fn get_health(State(state): State<AppState>) -> Response {
    let snap = state.dashboard.snapshot_handle();
    let snap = snap.read().await;
    ApiResponse::ok(HealthResponse {
        status: "ok",
        last_local_update: snap.last_local_update,
        last_nearby_update: snap.last_nearby_update,
    })
}

// ============================================================================
// Readings
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ReadingsQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_km: Option<f64>,
    pub min_db: Option<f64>,
    pub max_db: Option<f64>,
    pub time_range: Option<TimeRange>,
    pub region: Option<String>,
}

/// GET /api/readings
pub async fn get_readings(
    State(state): State<AppState>,
    Query(params): Query<ReadingsQuery>,
) -> Response {
    let center = match center_from(params.lat, params.lon) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let defaults = &state.dashboard.context().config.query;
    let mut criteria = FilterCriteria::decibel_range(
        params.min_db.unwrap_or(defaults.min_decibel),
        params.max_db.unwrap_or(defaults.max_decibel),
    );
    criteria.time_range = params.time_range.unwrap_or_default();
    criteria.region = params.region;
    if let Some(c) = center {
        criteria = criteria.around(c, params.radius_km);
    }

    let readings = {
        let mut generator = state.dashboard.context().generator.lock().await;
        query::get_readings(&criteria, &mut *generator, now_ms())
    };
    ApiResponse::ok(readings)
}

/// POST /api/readings
pub async fn submit_reading(
    State(state): State<AppState>,
    Json(reading): Json<NewReading>,
) -> Response {
    let reading = {
        let mut generator = state.dashboard.context().generator.lock().await;
        query::submit_reading(reading, generator.rng_mut())
    };
    tracing::info!(id = %reading.id, decibel = reading.decibel, "Reading submitted");
    ApiResponse::created(reading)
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct CenterQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// GET /api/hotspots
///
/// With `lat`/`lon` the map is rebuilt around that point; otherwise the
/// last refreshed hotspots are returned.
pub async fn get_hotspots(
    State(state): State<AppState>,
    Query(params): Query<CenterQuery>,
) -> Response {
    match center_from(params.lat, params.lon) {
        Ok(Some(center)) => {
            let hotspots = refresh_map(state.dashboard.context(), Some(center), now_ms()).await;
            ApiResponse::ok(hotspots)
        }
        Ok(None) => {
            let snap = state.dashboard.snapshot_handle();
            let hotspots = snap.read().await.hotspots.clone();
            ApiResponse::ok(hotspots)
        }
        Err(resp) => resp,
    }
}

/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Response {
    ApiResponse::ok(state.dashboard.snapshot().await)
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub analysis: NoiseAnalysis,
    pub health: HealthImpact,
    pub prediction: NoisePrediction,
}

/// GET /api/analytics
pub async fn get_analytics(State(state): State<AppState>) -> Response {
    let snap = state.dashboard.snapshot().await;
    match (snap.analysis, snap.health, snap.prediction) {
        (Some(analysis), Some(health), Some(prediction)) => ApiResponse::ok(AnalyticsResponse {
            analysis,
            health,
            prediction,
        }),
        _ => ApiErrorResponse::service_unavailable("No local data yet, waiting for first refresh"),
    }
}

// ============================================================================
// Contacts
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ContactsQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactsResponse {
    pub state: &'static str,
    pub contacts: Vec<Authority>,
}

/// GET /api/contacts
///
/// `?state=` picks a state directly; `?lat&lon` resolves one by reverse
/// geocoding; with neither, the dashboard's current region is used.
pub async fn get_contacts(
    State(state): State<AppState>,
    Query(params): Query<ContactsQuery>,
) -> Response {
    if let Some(wanted) = params.state {
        return match STATES.iter().find(|(name, _)| name.eq_ignore_ascii_case(&wanted)) {
            Some(&(name, _)) => ApiResponse::ok(ContactsResponse {
                state: name,
                contacts: contacts_for_state(name),
            }),
            None => ApiErrorResponse::not_found(format!("No contacts for state '{wanted}'")),
        };
    }

    let place = match center_from(params.lat, params.lon) {
        Ok(Some(c)) => {
            display_name_or_fallback(
                state.dashboard.context().geocoder.as_ref(),
                c.latitude,
                c.longitude,
            )
            .await
        }
        Ok(None) => state
            .dashboard
            .snapshot()
            .await
            .location_name
            .unwrap_or_default(),
        Err(resp) => return resp,
    };

    let (state_name, contacts) = contacts_for_place(&place);
    ApiResponse::ok(ContactsResponse {
        state: state_name,
        contacts,
    })
}

// ============================================================================
// Severity
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityResponse {
    pub decibel: f64,
    pub severity: Severity,
    pub color: &'static str,
    pub meter_level: &'static str,
}

/// GET /api/severity/:decibel
pub async fn get_severity(Path(raw): Path<String>) -> Response {
    let decibel = match raw.parse::<f64>() {
        Ok(d) if d.is_finite() => d,
        _ => return ApiErrorResponse::bad_request(format!("'{raw}' is not a decibel value")),
    };
    let severity = Severity::from_decibel(decibel);
    ApiResponse::ok(SeverityResponse {
        decibel,
        severity,
        color: severity.color(),
        meter_level: MeterLevel::from_decibel(decibel).label(),
    })
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::config::NoiseConfig;
    use crate::location::{FixedLocation, OfflineGeocoder};
    use crate::refresh::RefreshContext;

    let mut config = NoiseConfig::default();
    config.generator.seed = Some(99);
    let ctx = RefreshContext::new(
        config,
        Arc::new(FixedLocation(UserLocation::new(12.9, 80.1, 20.0))),
        Arc::new(OfflineGeocoder),
    );
    AppState::new(Arc::new(Dashboard::new(ctx)))
}
