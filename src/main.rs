//! Noise Atlas - noise-pollution mapping service
//!
//! # Usage
//!
//! ```bash
//! # Serve the dashboard API with periodic refresh
//! noise-atlas serve
//!
//! # One-shot queries, printed as JSON
//! noise-atlas readings --lat 12.9 --lon 80.1 --radius-km 5
//! noise-atlas hotspots --lat 12.9 --lon 80.1
//! noise-atlas analyze --lat 28.61 --lon 77.21
//! noise-atlas contacts --place "Andheri, Mumbai, Maharashtra, India"
//! ```
//!
//! # Environment Variables
//!
//! - `NOISE_ATLAS_CONFIG`: path to a TOML config file
//! - `NOISE_ATLAS_ADDR`: HTTP bind address override
//! - `RUST_LOG`: logging level (default: info)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use noise_atlas::analytics::{analyze_pattern, health_impact, predict_next_day, ReadingStats};
use noise_atlas::api::{create_app, AppState};
use noise_atlas::clock::now_ms;
use noise_atlas::config::NoiseConfig;
use noise_atlas::contacts::{contacts_for_place, contacts_for_state};
use noise_atlas::location::{FixedLocation, NominatimGeocoder, OfflineGeocoder, ReverseGeocoder};
use noise_atlas::refresh::{run_periodic, Dashboard, RefreshContext, RefreshKind};
use noise_atlas::types::{FilterCriteria, UserLocation};
use noise_atlas::{build_hotspots, get_readings, ReadingGenerator};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "noise-atlas")]
#[command(about = "Noise pollution mapping: synthetic readings, hotspots and exposure analytics")]
#[command(version)]
struct CliArgs {
    /// Config file (overrides NOISE_ATLAS_CONFIG and ./noise_atlas.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Random seed for reproducible readings
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API with periodic dashboard refresh (default)
    Serve {
        /// Override the server address (default: "0.0.0.0:8080")
        #[arg(short, long, env = "NOISE_ATLAS_ADDR")]
        addr: Option<String>,
    },

    /// Print readings matching a filter
    Readings {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Only with --lat/--lon
        #[arg(long)]
        radius_km: Option<f64>,
        #[arg(long)]
        min_db: Option<f64>,
        #[arg(long)]
        max_db: Option<f64>,
    },

    /// Print map hotspots (all cities, plus the local radius when a center is given)
    Hotspots {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Print pattern, health impact and prediction for the local radius
    Analyze {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Print complaint contacts for a place name or a state
    Contacts {
        /// Reverse-geocoded display name, e.g. "Tambaram, Tamil Nadu, India"
        #[arg(long, conflicts_with = "state")]
        place: Option<String>,
        #[arg(long)]
        state: Option<String>,
    },

    /// Validate and print the effective configuration as TOML
    Config,
}

// ============================================================================
// Serve
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskName {
    HttpServer,
    LocalRefresh,
    NearbyRefresh,
}

impl std::fmt::Display for TaskName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskName::HttpServer => write!(f, "HttpServer"),
            TaskName::LocalRefresh => write!(f, "LocalRefresh"),
            TaskName::NearbyRefresh => write!(f, "NearbyRefresh"),
        }
    }
}

fn build_geocoder(config: &NoiseConfig) -> Arc<dyn ReverseGeocoder> {
    let g = &config.geocoding;
    if !g.enabled {
        info!("Reverse geocoding disabled");
        return Arc::new(OfflineGeocoder);
    }
    match NominatimGeocoder::new(&g.endpoint, &g.user_agent, g.timeout()) {
        Ok(geocoder) => {
            info!(endpoint = %g.endpoint, "Reverse geocoding via Nominatim");
            Arc::new(geocoder)
        }
        Err(e) => {
            warn!(error = %e, "Failed to build geocoding client, place names disabled");
            Arc::new(OfflineGeocoder)
        }
    }
}

fn spawn_refresh_task(
    task_set: &mut JoinSet<Result<TaskName>>,
    dashboard: &Arc<Dashboard>,
    kind: RefreshKind,
    name: TaskName,
    cancel_token: CancellationToken,
) {
    let dashboard = Arc::clone(dashboard);
    let period = match kind {
        RefreshKind::Local => dashboard.context().config.refresh.local_interval(),
        RefreshKind::Nearby => dashboard.context().config.refresh.nearby_interval(),
    };
    task_set.spawn(async move {
        run_periodic(dashboard, kind, period, cancel_token).await;
        Ok(name)
    });
}

fn spawn_http_server(
    task_set: &mut JoinSet<Result<TaskName>>,
    listener: tokio::net::TcpListener,
    app: axum::Router,
    cancel_token: CancellationToken,
) {
    task_set.spawn(async move {
        info!("[HttpServer] Task starting");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                cancel_token.cancelled().await;
                info!("[HttpServer] Received shutdown signal");
            })
            .await
            .context("HTTP server error")?;

        info!("[HttpServer] Graceful shutdown complete");
        Ok(TaskName::HttpServer)
    });
}

/// Monitor tasks; cancel everything when one fails.
async fn run_supervisor(
    task_set: &mut JoinSet<Result<TaskName>>,
    cancel_token: CancellationToken,
) -> Result<()> {
    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                info!("Supervisor: shutdown signal received");
                break;
            }
            result = task_set.join_next() => {
                match result {
                    Some(Ok(Ok(task))) => info!("Supervisor: task {} completed", task),
                    Some(Ok(Err(e))) => {
                        error!("Supervisor: task failed: {:#}", e);
                        cancel_token.cancel();
                        return Err(e);
                    }
                    Some(Err(e)) => {
                        error!("Supervisor: task panicked: {}", e);
                        cancel_token.cancel();
                        return Err(anyhow::anyhow!("Task panicked: {}", e));
                    }
                    None => break,
                }
            }
        }
    }

    // let the remaining tasks observe cancellation and finish
    while let Some(result) = task_set.join_next().await {
        if let Ok(Ok(task)) = result {
            info!("Task {} stopped", task);
        }
    }
    Ok(())
}

async fn serve(config: NoiseConfig, addr: String) -> Result<()> {
    let fallback = config.location.user_location();
    info!(
        latitude = fallback.latitude,
        longitude = fallback.longitude,
        "Using configured location"
    );

    let ctx = RefreshContext::new(
        config.clone(),
        Arc::new(FixedLocation(fallback)),
        build_geocoder(&config),
    );
    let dashboard = Arc::new(Dashboard::new(ctx));
    let app = create_app(AppState::new(Arc::clone(&dashboard)));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Noise Atlas API listening on http://{}/api", addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let mut task_set = JoinSet::new();
    spawn_http_server(&mut task_set, listener, app, cancel_token.clone());
    spawn_refresh_task(
        &mut task_set,
        &dashboard,
        RefreshKind::Local,
        TaskName::LocalRefresh,
        cancel_token.clone(),
    );
    spawn_refresh_task(
        &mut task_set,
        &dashboard,
        RefreshKind::Nearby,
        TaskName::NearbyRefresh,
        cancel_token.clone(),
    );

    run_supervisor(&mut task_set, cancel_token).await
}

// ============================================================================
// One-shot commands
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOutput {
    location: UserLocation,
    stats: ReadingStats,
    analysis: noise_atlas::NoiseAnalysis,
    health: noise_atlas::HealthImpact,
    prediction: noise_atlas::NoisePrediction,
}

fn load_config(args: &CliArgs) -> Result<NoiseConfig> {
    let mut config = match &args.config {
        Some(path) => NoiseConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => NoiseConfig::load(),
    };
    if args.seed.is_some() {
        config.generator.seed = args.seed;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    let offset = config.generator.utc_offset();
    let q = &config.query;
    let now = now_ms();

    match args.command.unwrap_or(Command::Serve { addr: None }) {
        Command::Serve { addr } => {
            // env fallback also applies when no subcommand was given
            let addr = addr
                .or_else(|| std::env::var("NOISE_ATLAS_ADDR").ok())
                .unwrap_or_else(|| config.server.addr.clone());
            serve(config, addr).await
        }

        Command::Readings { lat, lon, radius_km, min_db, max_db } => {
            let mut criteria = FilterCriteria::decibel_range(
                min_db.unwrap_or(q.min_decibel),
                max_db.unwrap_or(q.max_decibel),
            );
            if let (Some(lat), Some(lon)) = (lat, lon) {
                criteria = criteria.around(UserLocation::new(lat, lon, 0.0), radius_km);
            }
            let mut generator = ReadingGenerator::new(offset, config.generator.seed);
            print_json(&get_readings(&criteria, &mut generator, now))
        }

        Command::Hotspots { lat, lon } => {
            let mut generator = ReadingGenerator::new(offset, config.generator.seed);
            let base = FilterCriteria::decibel_range(q.min_decibel, q.max_decibel);
            let mut readings = get_readings(&base, &mut generator, now);
            if let (Some(lat), Some(lon)) = (lat, lon) {
                let local = base.around(UserLocation::new(lat, lon, 0.0), Some(q.local_radius_km));
                readings.extend(get_readings(&local, &mut generator, now));
            }
            print_json(&build_hotspots(&readings))
        }

        Command::Analyze { lat, lon } => {
            let location = UserLocation::new(lat, lon, 0.0);
            let mut generator = ReadingGenerator::new(offset, config.generator.seed);
            let criteria = FilterCriteria::decibel_range(q.min_decibel, q.max_decibel)
                .around(location, Some(q.local_radius_km));
            let readings = get_readings(&criteria, &mut generator, now);
            if readings.is_empty() {
                warn!("No readings within {} km of ({}, {})", q.local_radius_km, lat, lon);
            }
            print_json(&AnalyzeOutput {
                location,
                stats: ReadingStats::from_readings(&readings),
                analysis: analyze_pattern(&readings, now, offset),
                health: health_impact(&readings, now),
                prediction: predict_next_day(&readings, offset, generator.rng_mut(), now),
            })
        }

        Command::Contacts { place, state } => {
            let (state, contacts) = match (place, state) {
                (_, Some(state)) => {
                    let contacts = contacts_for_state(&state);
                    (state, contacts)
                }
                (Some(place), None) => {
                    let (state, contacts) = contacts_for_place(&place);
                    (state.to_string(), contacts)
                }
                (None, None) => {
                    let (state, contacts) = contacts_for_place("");
                    (state.to_string(), contacts)
                }
            };
            print_json(&serde_json::json!({ "state": state, "contacts": contacts }))
        }

        Command::Config => {
            config.validate()?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
