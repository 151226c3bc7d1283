//! Location collaborators
//!
//! Two async seams the refresh layer depends on:
//! - [`GeolocationProvider`]: where is the user right now
//! - [`ReverseGeocoder`]: what is this coordinate called
//!
//! Both fail softly. Callers log the error and keep whatever they had.

mod geocoding;
mod geolocation;

pub use geocoding::{
    display_name_or_fallback, GeocodeError, NominatimGeocoder, OfflineGeocoder, ReverseGeocoder,
    UNKNOWN_LOCATION,
};
pub use geolocation::{
    locate_with_timeout, FixedLocation, GeolocationProvider, LocationError, Unavailable,
};
