//! Geolocation providers.

use std::time::Duration;

use async_trait::async_trait;

use crate::types::UserLocation;

/// Geolocation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not available: {0}")]
    Unavailable(String),
    #[error("Geolocation provider '{provider}' timed out after {after:?}")]
    Timeout {
        provider: &'static str,
        after: Duration,
    },
}

/// Source of the user's current position.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<UserLocation, LocationError>;

    /// Provider name for logs and timeout errors
    fn provider_name(&self) -> &'static str;
}

/// Always reports the same position (configured fallback or test fixture).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub UserLocation);

#[async_trait]
impl GeolocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<UserLocation, LocationError> {
        Ok(self.0)
    }

    fn provider_name(&self) -> &'static str {
        "fixed"
    }
}

/// A provider that never yields a position.
#[derive(Debug, Clone, Default)]
pub struct Unavailable {
    pub reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl GeolocationProvider for Unavailable {
    async fn current_location(&self) -> Result<UserLocation, LocationError> {
        Err(LocationError::Unavailable(self.reason.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "unavailable"
    }
}

/// Ask `provider` for a position, giving up after `timeout`.
pub async fn locate_with_timeout(
    provider: &dyn GeolocationProvider,
    timeout: Duration,
) -> Result<UserLocation, LocationError> {
    match tokio::time::timeout(timeout, provider.current_location()).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout {
            provider: provider.provider_name(),
            after: timeout,
        }),
    }
}
