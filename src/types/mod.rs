//! Shared data structures for noise mapping
//!
//! This module defines the value types that flow through the engine:
//! - Readings: point-in-time decibel samples (synthetic or submitted)
//! - Hotspots: spatial aggregates produced by the clustering pass
//! - Locations: user position and fixed geographic points
//! - Filters: query criteria for the reading engine
//! - Analysis: pattern, health-impact and prediction outputs

mod reading;
mod location;
mod filter;
mod analysis;

pub use reading::*;
pub use location::*;
pub use filter::*;
pub use analysis::*;
