use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current conditions as reported by the forecast upstream, passed through
/// unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: i32,
    #[serde(default)]
    pub is_day: Option<u8>,
    /// Local observation time, ISO 8601, in the location's own timezone.
    pub time: String,
}

/// One day of the 5-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub temp_max: f64,
    pub temp_min: f64,
    pub weathercode: i32,
}

/// A persisted favorite location.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavedLocation {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a favorite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Partial update: only supplied fields are overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Rejects (never clamps) coordinates outside [-90,90] x [-180,180].
pub fn validate_coords(lat: f64, lon: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(Error::InvalidInput(format!(
            "coordinates out of range: {lat}, {lon}"
        )));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("name must not be empty".to_string()));
    }
    Ok(())
}

impl NewLocation {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_coords(self.latitude, self.longitude)
    }
}

impl LocationPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        // Either coordinate may change alone; check each against the range
        // it can violate on its own.
        if let Some(lat) = self.latitude {
            validate_coords(lat, 0.0)?;
        }
        if let Some(lon) = self.longitude {
            validate_coords(0.0, lon)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.latitude.is_none() && self.longitude.is_none()
    }
}

/// Human-readable label for a WMO weather interpretation code.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn describe_weathercode(code: i32) -> &'static str {
    match code {
        0 => "Clear",
        1 | 2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 80 => "Rain",
        65 | 81 | 82 => "Heavy rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 | 77 | 85 | 86 => "Snow",
        95 | 96 | 99 => "Thunderstorm",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_in_range_accepted() {
        assert!(validate_coords(32.7767, -96.7970).is_ok());
        assert!(validate_coords(-90.0, 180.0).is_ok());
    }

    #[test]
    fn coords_out_of_range_rejected() {
        assert!(validate_coords(90.1, 0.0).is_err());
        assert!(validate_coords(0.0, -180.5).is_err());
    }

    #[test]
    fn empty_name_rejected() {
        let loc = NewLocation {
            name: "   ".to_string(),
            latitude: 0.0,
            longitude: 0.0,
        };
        assert!(loc.validate().is_err());
    }

    #[test]
    fn patch_validates_each_supplied_field() {
        let patch = LocationPatch { latitude: Some(91.0), ..Default::default() };
        assert!(patch.validate().is_err());

        let patch = LocationPatch { longitude: Some(-179.0), ..Default::default() };
        assert!(patch.validate().is_ok());

        assert!(LocationPatch::default().is_empty());
    }

    #[test]
    fn weathercode_labels() {
        assert_eq!(describe_weathercode(0), "Clear");
        assert_eq!(describe_weathercode(63), "Rain");
        assert_eq!(describe_weathercode(95), "Thunderstorm");
        assert_eq!(describe_weathercode(1234), "Unknown");
    }
}
