//! Reverse geocoding.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// Name used whenever a coordinate cannot be resolved.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Reverse geocoding errors
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Geocoder returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("Geocoder response has no display name")]
    MissingDisplayName,
    #[error("Reverse geocoding is disabled")]
    Disabled,
}

/// Resolves a coordinate into a human-readable place name.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn location_name(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// OpenStreetMap Nominatim `/reverse` client.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: reqwest::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    /// Build a client for `endpoint` (base URL, without `/reverse`).
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn reverse_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/reverse?format=json&lat={latitude}&lon={longitude}&zoom=18&addressdetails=1",
            self.endpoint
        )
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn location_name(&self, latitude: f64, longitude: f64) -> Result<String, GeocodeError> {
        let resp = self.http.get(self.reverse_url(latitude, longitude)).send().await?;

        if !resp.status().is_success() {
            return Err(GeocodeError::Status(resp.status()));
        }

        let body: ReverseResponse = resp.json().await?;
        body.display_name
            .filter(|name| !name.is_empty())
            .ok_or(GeocodeError::MissingDisplayName)
    }
}

/// Geocoder used when lookups are switched off in config.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGeocoder;

#[async_trait]
impl ReverseGeocoder for OfflineGeocoder {
    async fn location_name(&self, _latitude: f64, _longitude: f64) -> Result<String, GeocodeError> {
        Err(GeocodeError::Disabled)
    }
}

/// Resolve a name, substituting [`UNKNOWN_LOCATION`] on any failure.
pub async fn display_name_or_fallback(
    geocoder: &dyn ReverseGeocoder,
    latitude: f64,
    longitude: f64,
) -> String {
    match geocoder.location_name(latitude, longitude).await {
        Ok(name) => name,
        Err(GeocodeError::Disabled) => UNKNOWN_LOCATION.to_string(),
        Err(e) => {
            tracing::warn!(latitude, longitude, error = %e, "Reverse geocoding failed");
            UNKNOWN_LOCATION.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{Json, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(endpoint: &str) -> NominatimGeocoder {
        NominatimGeocoder::new(endpoint, "noise-atlas-test", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_reverse_url() {
        let geocoder = client("https://nominatim.openstreetmap.org/");
        assert_eq!(
            geocoder.reverse_url(12.9, 80.1),
            "https://nominatim.openstreetmap.org/reverse\
             ?format=json&lat=12.9&lon=80.1&zoom=18&addressdetails=1"
        );
    }

    #[tokio::test]
    async fn test_reads_display_name() {
        let router = Router::new().route(
            "/reverse",
            get(|| async {
                Json(serde_json::json!({
                    "display_name": "Tambaram, Chengalpattu, Tamil Nadu, 600045, India"
                }))
            }),
        );
        let geocoder = client(&serve(router).await);
        let name = geocoder.location_name(12.92, 80.12).await.unwrap();
        assert_eq!(name, "Tambaram, Chengalpattu, Tamil Nadu, 600045, India");
    }

    #[tokio::test]
    async fn test_missing_display_name_falls_back() {
        let router = Router::new().route("/reverse", get(|| async { Json(serde_json::json!({})) }));
        let geocoder = client(&serve(router).await);
        assert!(matches!(
            geocoder.location_name(0.0, 0.0).await,
            Err(GeocodeError::MissingDisplayName)
        ));
        assert_eq!(display_name_or_fallback(&geocoder, 0.0, 0.0).await, UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn test_error_status_falls_back() {
        let router = Router::new().route(
            "/reverse",
            get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
        let geocoder = client(&serve(router).await);
        assert_eq!(display_name_or_fallback(&geocoder, 1.0, 2.0).await, UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn test_offline_geocoder() {
        assert_eq!(display_name_or_fallback(&OfflineGeocoder, 1.0, 2.0).await, UNKNOWN_LOCATION);
    }
}
