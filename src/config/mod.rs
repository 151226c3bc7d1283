//! Noise Atlas Configuration
//!
//! Tunables for the generator, query radii, refresh cadence, location
//! fallback, reverse geocoding and the HTTP server, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `NOISE_ATLAS_CONFIG` environment variable (path to TOML file)
//! 2. `noise_atlas.toml` in the current working directory
//! 3. Built-in defaults (`config::defaults`)
//!
//! The loaded [`NoiseConfig`] is passed by value to whatever needs it.

pub mod defaults;
mod noise_config;
pub mod validation;

pub use noise_config::*;
