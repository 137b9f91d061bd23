use log::debug;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::location::Geocoder;

/// Public Nominatim instance. Tests point the client at a mock server.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

const SERVICE: &str = "geocoding service";

/// Client for the geocoding upstream (Nominatim-compatible).
///
/// Holds a borrowed-in `reqwest::Client` so the process-wide pooled client
/// (with its fixed timeout) is shared across collaborators.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: Client,
    base: Url,
    user_agent: String,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    // Nominatim serializes coordinates as strings.
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

impl GeocodeClient {
    /// Build a client. The upstream's usage policy requires an identifying
    /// contact in the User-Agent, so an empty contact is a configuration
    /// error surfaced here, before any request is made.
    pub fn new(http: Client, base: &str, contact: &str) -> Result<Self> {
        if contact.trim().is_empty() {
            return Err(Error::Config(
                "geocoder contact email is not configured".to_string(),
            ));
        }

        let base: Url = base
            .parse()
            .map_err(|e| Error::Config(format!("invalid geocoder base URL '{base}': {e}")))?;

        Ok(Self {
            http,
            base,
            user_agent: format!("weather-app/1.0 ({contact})"),
        })
    }

    /// Forward lookup: free-form address to `(lat, lon)`.
    pub async fn forward(&self, address: &str) -> Result<(f64, f64)> {
        let url = self
            .base
            .join("/search")
            .map_err(|e| Error::Config(format!("error joining geocoder URL: {e}")))?;

        debug!("geocoding address {address:?}");

        let res = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| Error::connectivity(SERVICE, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| Error::connectivity(SERVICE, e))?;

        if !status.is_success() {
            return Err(Error::connectivity(SERVICE, format!("status {status}")));
        }

        let hits: Vec<SearchHit> =
            serde_json::from_str(&body).map_err(|e| Error::malformed(SERVICE, e))?;

        let Some(hit) = hits.first() else {
            return Err(Error::InvalidInput(format!(
                "no location found for '{address}'"
            )));
        };

        let lat: f64 = hit
            .lat
            .parse()
            .map_err(|_| Error::malformed(SERVICE, format!("non-numeric latitude '{}'", hit.lat)))?;
        let lon: f64 = hit
            .lon
            .parse()
            .map_err(|_| Error::malformed(SERVICE, format!("non-numeric longitude '{}'", hit.lon)))?;

        Ok((lat, lon))
    }

    /// Reverse lookup: coordinates to a display name.
    ///
    /// Best effort. Every failure mode (network, status, malformed JSON,
    /// missing field) falls back to a formatted coordinate string; the
    /// caller never sees an error from this path.
    pub async fn reverse(&self, lat: f64, lon: f64) -> String {
        let fallback = format!("{lat:.4}, {lon:.4}");

        let Ok(url) = self.base.join("/reverse") else {
            return fallback;
        };

        let res = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await;

        let res = match res {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                debug!("reverse geocode returned status {}", r.status());
                return fallback;
            }
            Err(e) => {
                debug!("reverse geocode request failed: {e}");
                return fallback;
            }
        };

        match res.json::<ReverseResponse>().await {
            Ok(ReverseResponse { display_name: Some(name) }) => name,
            Ok(_) => fallback,
            Err(e) => {
                debug!("reverse geocode parse error: {e}");
                fallback
            }
        }
    }
}

#[async_trait::async_trait]
impl Geocoder for GeocodeClient {
    async fn geocode(&self, address: &str) -> Result<(f64, f64)> {
        self.forward(address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_contact_is_a_config_error() {
        let err = GeocodeClient::new(Client::new(), DEFAULT_BASE_URL, "  ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn contact_lands_in_the_user_agent() {
        let client =
            GeocodeClient::new(Client::new(), DEFAULT_BASE_URL, "ops@example.com").unwrap();
        assert_eq!(client.user_agent, "weather-app/1.0 (ops@example.com)");
    }
}
