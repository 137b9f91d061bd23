use log::debug;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{CurrentWeather, ForecastDay};

/// Public Open-Meteo endpoint. Tests point the client at a mock server.
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

const FORECAST_PATH: &str = "/v1/forecast";
const SERVICE: &str = "weather service";
const FORECAST_DAYS: u8 = 5;

/// Client for the weather-forecast upstream (Open-Meteo-compatible).
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base: Url,
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct DailyPayload {
    daily: Option<DailyBlock>,
}

/// The upstream returns the daily forecast as four parallel arrays.
#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weathercode: Vec<i32>,
}

impl WeatherClient {
    pub fn new(http: Client, base: &str) -> Result<Self> {
        let base: Url = base
            .parse()
            .map_err(|e| Error::Config(format!("invalid weather base URL '{base}': {e}")))?;

        Ok(Self { http, base })
    }

    /// Fetch current conditions for a coordinate pair, with the upstream
    /// auto-detecting the location's timezone. The current-conditions
    /// object is returned unmodified.
    pub async fn fetch_current(&self, lat: f64, lon: f64) -> Result<CurrentWeather> {
        debug!("fetching current weather for {lat}, {lon}");

        let body = self
            .request(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current_weather", "true".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .await?;

        let parsed: CurrentPayload =
            serde_json::from_str(&body).map_err(|e| Error::malformed(SERVICE, e))?;

        parsed
            .current_weather
            .ok_or_else(|| Error::malformed(SERVICE, "response is missing 'current_weather'"))
    }

    /// Fetch the 5-day daily forecast for a coordinate pair.
    ///
    /// The four parallel arrays are zipped positionally, preserving the
    /// upstream (chronological) order.
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastDay>> {
        debug!("fetching {FORECAST_DAYS}-day forecast for {lat}, {lon}");

        let body = self
            .request(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,weathercode".to_string(),
                ),
                ("timezone", "auto".to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
            ])
            .await?;

        let parsed: DailyPayload =
            serde_json::from_str(&body).map_err(|e| Error::malformed(SERVICE, e))?;

        let daily = parsed
            .daily
            .ok_or_else(|| Error::malformed(SERVICE, "response is missing 'daily'"))?;

        let len = daily.time.len();
        if daily.temperature_2m_max.len() != len
            || daily.temperature_2m_min.len() != len
            || daily.weathercode.len() != len
        {
            return Err(Error::malformed(
                SERVICE,
                "forecast arrays are of unequal length",
            ));
        }

        let forecast = daily
            .time
            .into_iter()
            .zip(daily.temperature_2m_max)
            .zip(daily.temperature_2m_min)
            .zip(daily.weathercode)
            .map(|(((date, temp_max), temp_min), weathercode)| ForecastDay {
                date,
                temp_max,
                temp_min,
                weathercode,
            })
            .collect();

        Ok(forecast)
    }

    async fn request(&self, params: &[(&str, String)]) -> Result<String> {
        let url = self
            .base
            .join(FORECAST_PATH)
            .map_err(|e| Error::Config(format!("error joining weather URL: {e}")))?;

        let res = self
            .http
            .get(url)
            .query(params)
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

        Ok(body)
    }
}
