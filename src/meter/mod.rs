//! Simulated noise meter
//!
//! Stands in for a microphone: a 60 dB base with uniform noise and a slow
//! sinusoidal drift. A [`RecordingSession`] accumulates samples and turns
//! them into a submittable reading.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::analytics::MeterLevel;
use crate::types::{NewReading, UserLocation, DEVICE_MOBILE};

/// Sampling period of the meter (milliseconds).
pub const SAMPLE_INTERVAL_MS: i64 = 1_000;

const BASE_LEVEL_DB: f64 = 60.0;
const NOISE_SPREAD_DB: f64 = 10.0;
const DRIFT_AMPLITUDE_DB: f64 = 5.0;

/// Fake microphone producing one level per call.
#[derive(Debug, Clone)]
pub struct SimulatedMicrophone<R = StdRng> {
    rng: R,
    noise: Uniform<f64>,
}

impl SimulatedMicrophone<StdRng> {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng)
    }
}

impl<R: Rng> SimulatedMicrophone<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            noise: Uniform::new(-NOISE_SPREAD_DB, NOISE_SPREAD_DB),
        }
    }

    /// Rounded level at wall-clock time `t_ms`.
    pub fn sample(&mut self, t_ms: i64) -> f64 {
        let drift = (t_ms as f64 / 1000.0).sin() * DRIFT_AMPLITUDE_DB;
        (BASE_LEVEL_DB + self.noise.sample(&mut self.rng) + drift).round()
    }
}

/// One recording run of the meter.
#[derive(Debug, Clone, Default)]
pub struct RecordingSession {
    samples: Vec<f64>,
    started_at: Option<i64>,
    last_at: Option<i64>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, decibel: f64, at_ms: i64) {
        self.started_at.get_or_insert(at_ms);
        self.last_at = Some(at_ms);
        self.samples.push(decibel);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn current(&self) -> Option<f64> {
        self.samples.last().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::max)
    }

    /// Rounded mean of all samples.
    pub fn average(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().sum();
        Some((sum / self.samples.len() as f64).round())
    }

    pub fn current_level(&self) -> Option<MeterLevel> {
        self.current().map(MeterLevel::from_decibel)
    }

    pub fn elapsed_secs(&self) -> i64 {
        match (self.started_at, self.last_at) {
            (Some(start), Some(last)) => (last - start) / 1000,
            _ => 0,
        }
    }

    /// Reading for submission: the session average at `location`.
    ///
    /// `None` when nothing was recorded.
    pub fn into_new_reading(self, location: UserLocation, now: i64) -> Option<NewReading> {
        let decibel = self.average()?;
        Some(NewReading {
            latitude: location.latitude,
            longitude: location.longitude,
            decibel,
            timestamp: now,
            device_type: DEVICE_MOBILE.to_string(),
            user_id: None,
            city_name: None,
        })
    }
}
