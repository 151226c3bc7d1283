//! API route definitions
//!
//! - /health             - liveness and last refresh times
//! - /readings           - query (GET) and submit (POST) readings
//! - /hotspots           - clustered map hotspots
//! - /dashboard          - full dashboard snapshot
//! - /analytics          - pattern, health impact and prediction
//! - /contacts           - complaint authorities for a place or state
//! - /severity/:decibel  - severity tier and meter label for a level

use axum::routing::get;
use axum::Router;

use super::handlers::{self, AppState};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route(
            "/readings",
            get(handlers::get_readings).post(handlers::submit_reading),
        )
        .route("/hotspots", get(handlers::get_hotspots))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/analytics", get(handlers::get_analytics))
        .route("/contacts", get(handlers::get_contacts))
        .route("/severity/:decibel", get(handlers::get_severity))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(api_routes(test_state()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_readings_default_is_cities() {
        let (status, body) = get_json(api_routes(test_state()), "/readings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(144));
    }

    #[tokio::test]
    async fn test_readings_with_center_and_radius() {
        let (status, body) = get_json(
            api_routes(test_state()),
            "/readings?lat=12.9&lon=80.1&radius_km=5&min_db=0&max_db=150",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(48));
    }

    #[tokio::test]
    async fn test_readings_impossible_range_is_empty() {
        let (status, body) =
            get_json(api_routes(test_state()), "/readings?min_db=200&max_db=210").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_readings_half_center_is_rejected() {
        let (status, body) = get_json(api_routes(test_state()), "/readings?lat=12.9").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_submit_reading() {
        let payload = serde_json::json!({
            "latitude": 12.9,
            "longitude": 80.1,
            "decibel": 64.0,
            "timestamp": 1_704_110_400_000_i64,
            "deviceType": "mobile"
        });
        let response = api_routes(test_state())
            .oneshot(
                Request::post("/readings")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["id"].as_str().map(str::len), Some(9));
        assert_eq!(body["data"]["decibel"], 64.0);
    }

    #[tokio::test]
    async fn test_analytics_unavailable_before_refresh() {
        let (status, _) = get_json(api_routes(test_state()), "/analytics").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_dashboard_after_refresh() {
        let state = test_state();
        state.dashboard.run_local_cycle(crate::clock::now_ms()).await;

        let (status, body) = get_json(api_routes(state.clone()), "/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["localReadings"].as_array().map(Vec::len), Some(48));

        let (status, body) = get_json(api_routes(state.clone()), "/analytics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["prediction"]["hourly"].as_array().map(Vec::len), Some(24));

        let (status, body) = get_json(api_routes(state), "/hotspots").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["data"].as_array().is_some_and(Vec::is_empty));
    }

    #[tokio::test]
    async fn test_contacts_by_state() {
        let (status, body) =
            get_json(api_routes(test_state()), "/contacts?state=Karnataka").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["state"], "Karnataka");
        assert_eq!(body["data"]["contacts"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_contacts_unknown_state() {
        let (status, _) = get_json(api_routes(test_state()), "/contacts?state=Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_contacts_by_coordinates_defaults_offline() {
        let (status, body) =
            get_json(api_routes(test_state()), "/contacts?lat=12.9&lon=80.1").await;
        assert_eq!(status, StatusCode::OK);
        // geocoding is offline in tests, so the place is unknown
        assert_eq!(body["data"]["state"], "Delhi");
        assert_eq!(body["data"]["contacts"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_severity() {
        let (status, body) = get_json(api_routes(test_state()), "/severity/101").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["severity"], "dangerous");
        assert_eq!(body["data"]["color"], "#7f1d1d");
        assert_eq!(body["data"]["meterLevel"], "Extremely Loud");
    }

    #[tokio::test]
    async fn test_severity_rejects_non_number() {
        let response = api_routes(test_state())
            .oneshot(Request::builder().uri("/severity/loud").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
