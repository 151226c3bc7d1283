//! Dashboard refresh layer
//!
//! Turns the pure engines into the live dashboard view:
//! - local cycle: locate, query the local radius, run analytics, rebuild
//!   the map hotspots
//! - nearby cycle: query the wider radius, at most every nearby interval
//!
//! Results land in an `Arc<RwLock<DashboardSnapshot>>`. Every write is a
//! complete result for its section; a failed cycle keeps the stale data.

mod scheduler;

pub use scheduler::{run_periodic, RefreshKind};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::analytics::{analyze_pattern, health_impact, predict_next_day, ReadingStats};
use crate::config::NoiseConfig;
use crate::contacts::resolve_state;
use crate::hotspots::build_hotspots;
use crate::location::{
    display_name_or_fallback, locate_with_timeout, GeolocationProvider, LocationError,
    ReverseGeocoder,
};
use crate::query::get_readings;
use crate::synthetic::ReadingGenerator;
use crate::types::{
    FilterCriteria, HealthImpact, Hotspot, NoiseAnalysis, NoisePrediction, Reading, UserLocation,
};

// ============================================================================
// Snapshot
// ============================================================================

/// Everything the dashboard shows, as of the last successful cycles.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub location: Option<UserLocation>,
    pub location_name: Option<String>,
    /// State used for the complaint directory
    pub region: Option<String>,
    pub local_readings: Vec<Reading>,
    pub nearby_readings: Vec<Reading>,
    pub hotspots: Vec<Hotspot>,
    pub stats: ReadingStats,
    pub analysis: Option<NoiseAnalysis>,
    pub health: Option<HealthImpact>,
    pub prediction: Option<NoisePrediction>,
    pub last_local_update: Option<i64>,
    pub last_nearby_update: Option<i64>,
    pub next_nearby_update: Option<i64>,
}

/// Scheduling state threaded through the cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshState {
    pub last_nearby_update: Option<i64>,
    pub nearby_interval_ms: i64,
}

impl RefreshState {
    pub fn new(nearby_interval_ms: i64) -> Self {
        Self {
            last_nearby_update: None,
            nearby_interval_ms,
        }
    }

    /// True before the first nearby refresh and once the interval has elapsed.
    pub fn nearby_due(&self, now: i64) -> bool {
        self.last_nearby_update
            .map_or(true, |last| now.saturating_sub(last) >= self.nearby_interval_ms)
    }

    pub fn next_nearby_update(&self) -> Option<i64> {
        self.last_nearby_update
            .map(|last| last.saturating_add(self.nearby_interval_ms))
    }
}

// ============================================================================
// Context and single-shot refreshes
// ============================================================================

/// Collaborators and tunables shared by every refresh.
pub struct RefreshContext {
    pub config: NoiseConfig,
    pub geolocation: Arc<dyn GeolocationProvider>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub generator: Mutex<ReadingGenerator>,
}

impl RefreshContext {
    pub fn new(
        config: NoiseConfig,
        geolocation: Arc<dyn GeolocationProvider>,
        geocoder: Arc<dyn ReverseGeocoder>,
    ) -> Self {
        let generator = ReadingGenerator::new(config.generator.utc_offset(), config.generator.seed);
        Self {
            config,
            geolocation,
            geocoder,
            generator: Mutex::new(generator),
        }
    }

    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::decibel_range(self.config.query.min_decibel, self.config.query.max_decibel)
    }

    /// Readings within `radius_km` of `center`.
    pub async fn readings_around(
        &self,
        center: UserLocation,
        radius_km: f64,
        now: i64,
    ) -> Vec<Reading> {
        let criteria = self.criteria().around(center, Some(radius_km));
        let mut generator = self.generator.lock().await;
        get_readings(&criteria, &mut *generator, now)
    }

    /// Major-city readings only.
    pub async fn city_readings(&self, now: i64) -> Vec<Reading> {
        let mut generator = self.generator.lock().await;
        get_readings(&self.criteria(), &mut *generator, now)
    }
}

/// Output of one local cycle.
#[derive(Debug, Clone)]
pub struct LocalRefresh {
    pub location: UserLocation,
    pub location_name: String,
    pub region: &'static str,
    pub readings: Vec<Reading>,
    pub stats: ReadingStats,
    pub analysis: NoiseAnalysis,
    pub health: HealthImpact,
    pub prediction: NoisePrediction,
    pub hotspots: Vec<Hotspot>,
}

/// Locate the user and recompute the local view.
///
/// Only a geolocation failure is an error; a failed place-name lookup
/// degrades to "Unknown Location".
pub async fn refresh_local(ctx: &RefreshContext, now: i64) -> Result<LocalRefresh, LocationError> {
    let location =
        locate_with_timeout(ctx.geolocation.as_ref(), ctx.config.refresh.geolocation_timeout())
            .await?;

    let location_name =
        display_name_or_fallback(ctx.geocoder.as_ref(), location.latitude, location.longitude)
            .await;

    let readings = ctx
        .readings_around(location, ctx.config.query.local_radius_km, now)
        .await;

    let offset = ctx.config.generator.utc_offset();
    let stats = ReadingStats::from_readings(&readings);
    let analysis = analyze_pattern(&readings, now, offset);
    let health = health_impact(&readings, now);
    let prediction = {
        let mut generator = ctx.generator.lock().await;
        predict_next_day(&readings, offset, generator.rng_mut(), now)
    };

    let hotspots = refresh_map(ctx, Some(location), now).await;

    Ok(LocalRefresh {
        region: resolve_state(&location_name),
        location,
        location_name,
        readings,
        stats,
        analysis,
        health,
        prediction,
        hotspots,
    })
}

/// Readings within the nearby radius of `center`.
pub async fn refresh_nearby(ctx: &RefreshContext, center: UserLocation, now: i64) -> Vec<Reading> {
    ctx.readings_around(center, ctx.config.query.nearby_radius_km, now)
        .await
}

/// Map hotspots: every city reading plus the local-radius readings.
///
/// The two sets come from separate generations, so a city inside the
/// local radius appears twice under the same ids; clustering keeps the
/// first occurrence.
pub async fn refresh_map(
    ctx: &RefreshContext,
    center: Option<UserLocation>,
    now: i64,
) -> Vec<Hotspot> {
    let mut readings = ctx.city_readings(now).await;
    if let Some(c) = center {
        readings.extend(
            ctx.readings_around(c, ctx.config.query.local_radius_km, now)
                .await,
        );
    }
    build_hotspots(&readings)
}

// ============================================================================
// Dashboard
// ============================================================================

/// What happened to a requested cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed,
    /// Another run of the same cycle was still in progress
    Skipped,
    /// A collaborator failed; the previous data was kept
    Failed,
}

/// Clears a busy flag when dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the shared snapshot and runs refresh cycles against it.
pub struct Dashboard {
    ctx: RefreshContext,
    snapshot: Arc<RwLock<DashboardSnapshot>>,
    state: Mutex<RefreshState>,
    local_busy: AtomicBool,
    nearby_busy: AtomicBool,
}

impl Dashboard {
    pub fn new(ctx: RefreshContext) -> Self {
        let nearby_ms = i64::try_from(ctx.config.refresh.nearby_interval().as_millis())
            .unwrap_or(i64::MAX);
        Self {
            ctx,
            snapshot: Arc::new(RwLock::new(DashboardSnapshot::default())),
            state: Mutex::new(RefreshState::new(nearby_ms)),
            local_busy: AtomicBool::new(false),
            nearby_busy: AtomicBool::new(false),
        }
    }

    pub fn context(&self) -> &RefreshContext {
        &self.ctx
    }

    pub fn snapshot_handle(&self) -> Arc<RwLock<DashboardSnapshot>> {
        Arc::clone(&self.snapshot)
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn refresh_state(&self) -> RefreshState {
        *self.state.lock().await
    }

    /// Local cycle; also runs the nearby cycle when it is due.
    pub async fn run_local_cycle(&self, now: i64) -> CycleOutcome {
        let Some(_busy) = BusyGuard::acquire(&self.local_busy) else {
            debug!("Local refresh still running, skipping");
            return CycleOutcome::Skipped;
        };

        let update = match refresh_local(&self.ctx, now).await {
            Ok(update) => update,
            Err(e) => {
                warn!(
                    provider = self.ctx.geolocation.provider_name(),
                    error = %e,
                    "Local refresh failed, keeping previous data"
                );
                return CycleOutcome::Failed;
            }
        };

        let location = update.location;
        {
            let mut snap = self.snapshot.write().await;
            snap.location = Some(update.location);
            snap.location_name = Some(update.location_name);
            snap.region = Some(update.region.to_string());
            snap.local_readings = update.readings;
            snap.stats = update.stats;
            snap.analysis = Some(update.analysis);
            snap.health = Some(update.health);
            snap.prediction = Some(update.prediction);
            snap.hotspots = update.hotspots;
            snap.last_local_update = Some(now);

            info!(
                readings = snap.local_readings.len(),
                hotspots = snap.hotspots.len(),
                average_db = snap.stats.average,
                "Local refresh complete"
            );
        }

        if self.state.lock().await.nearby_due(now) {
            self.nearby_at(location, now).await;
        }

        CycleOutcome::Completed
    }

    /// Nearby cycle around the last known location (locating first if
    /// there is none yet). Skipped when not yet due.
    pub async fn run_nearby_cycle(&self, now: i64) -> CycleOutcome {
        if !self.state.lock().await.nearby_due(now) {
            debug!("Nearby refresh not due yet");
            return CycleOutcome::Skipped;
        }

        let known = self.snapshot.read().await.location;
        let location = match known {
            Some(l) => l,
            None => match locate_with_timeout(
                self.ctx.geolocation.as_ref(),
                self.ctx.config.refresh.geolocation_timeout(),
            )
            .await
            {
                Ok(l) => l,
                Err(e) => {
                    warn!(
                        provider = self.ctx.geolocation.provider_name(),
                        error = %e,
                        "Nearby refresh failed, keeping previous data"
                    );
                    return CycleOutcome::Failed;
                }
            },
        };

        self.nearby_at(location, now).await
    }

    async fn nearby_at(&self, location: UserLocation, now: i64) -> CycleOutcome {
        let Some(_busy) = BusyGuard::acquire(&self.nearby_busy) else {
            debug!("Nearby refresh still running, skipping");
            return CycleOutcome::Skipped;
        };

        let readings = refresh_nearby(&self.ctx, location, now).await;

        let next = {
            let mut state = self.state.lock().await;
            state.last_nearby_update = Some(now);
            state.next_nearby_update()
        };

        let mut snap = self.snapshot.write().await;
        snap.nearby_readings = readings;
        snap.last_nearby_update = Some(now);
        snap.next_nearby_update = next;
        info!(readings = snap.nearby_readings.len(), "Nearby refresh complete");

        CycleOutcome::Completed
    }
}
