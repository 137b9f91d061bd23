//! Core library for the weather lookup & favorites app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The location-input parser (coordinates vs free-form address)
//! - Clients for the geocoding and weather-forecast upstreams
//! - CRUD persistence for saved locations
//!
//! It is used by `weather-api` and `weather-cli`, but can also be reused by
//! other binaries or services.

pub mod config;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod location;
pub mod model;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use forecast::WeatherClient;
pub use geocode::GeocodeClient;
pub use location::{Geocoder, parse_coords, resolve_location};
pub use model::{
    CurrentWeather, ForecastDay, LocationPatch, NewLocation, SavedLocation, describe_weathercode,
};
pub use store::LocationStore;

use std::time::Duration;

/// Fixed timeout for every outbound HTTP call; a slower upstream is treated
/// as a connectivity failure. No retry, no backoff.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the process-wide pooled HTTP client shared by both upstream
/// clients. Constructed once and injected, never held as global state.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))
}
