//! Simulated noise meter
//!
//! Samples the simulated microphone once per second, prints the live level
//! and, when the session ends, the reading that would be submitted.
//!
//! # Usage
//! ```bash
//! noise-meter --seconds 30 --lat 12.9 --lon 80.1
//! noise-meter --seconds 10 --seed 7 --speed 0 --quiet
//! ```

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use noise_atlas::analytics::Severity;
use noise_atlas::clock::now_ms;
use noise_atlas::meter::{RecordingSession, SimulatedMicrophone, SAMPLE_INTERVAL_MS};
use noise_atlas::query::submit_reading;
use noise_atlas::types::UserLocation;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "noise-meter")]
#[command(about = "Record a simulated noise-meter session and print the resulting reading")]
#[command(version)]
struct Args {
    /// Recording length in seconds
    #[arg(
        short,
        long,
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(1..=3600)
    )]
    seconds: u32,

    /// Latitude attached to the submitted reading
    #[arg(long, default_value = "28.6139", allow_negative_numbers = true)]
    lat: f64,

    /// Longitude attached to the submitted reading
    #[arg(long, default_value = "77.2090", allow_negative_numbers = true)]
    lon: f64,

    /// Time compression factor (1 = real-time, 0 = no delay)
    #[arg(long, default_value = "1")]
    speed: u32,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Only print the final reading
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut mic = SimulatedMicrophone::new(args.seed);
    let mut session = RecordingSession::new();

    let delay = match args.speed {
        0 => None,
        s => Some(Duration::from_millis(SAMPLE_INTERVAL_MS.unsigned_abs() / u64::from(s))),
    };

    info!(seconds = args.seconds, seed = ?args.seed, "Recording started");
    let start = now_ms();

    for i in 0..i64::from(args.seconds) {
        let t = start + i * SAMPLE_INTERVAL_MS;
        let db = mic.sample(t);
        session.push(db, t);

        if !args.quiet {
            let severity = Severity::from_decibel(db);
            eprintln!(
                "[{:>4}s] {:>5.0} dB  {:<14} {}",
                session.elapsed_secs(),
                db,
                session.current_level().map_or("", |l| l.label()),
                severity,
            );
        }

        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
    }

    info!(
        samples = session.len(),
        max_db = ?session.max(),
        average_db = ?session.average(),
        "Recording finished"
    );

    let location = UserLocation::new(args.lat, args.lon, 0.0);
    let end = start + i64::from(args.seconds) * SAMPLE_INTERVAL_MS;
    match session.into_new_reading(location, end) {
        Some(new_reading) => {
            let mut rng = match args.seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let reading = submit_reading(new_reading, &mut rng);
            println!("{}", serde_json::to_string_pretty(&reading)?);
        }
        None => info!("No samples recorded"),
    }

    Ok(())
}
