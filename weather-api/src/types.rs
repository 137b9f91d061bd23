use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use weather_core::{CurrentWeather, ForecastDay};

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct LocQuery {
    /// Location as `"lat,lon"` or a free-form address for geocoding.
    pub loc: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CurrentResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub current: CurrentWeather,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// HTTP-shaped failure: status code plus a `detail` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, detail: detail.into() }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: "Location not found".to_string(),
        }
    }
}

/// Translate the core taxonomy onto status codes: invalid input is the
/// client's fault (400), upstream trouble is a gateway failure (502),
/// everything else is on us (500).
impl From<weather_core::Error> for ApiError {
    fn from(err: weather_core::Error) -> Self {
        use weather_core::Error;

        let status = match &err {
            Error::InvalidInput(_) => {
                warn!("invalid input: {err}");
                StatusCode::BAD_REQUEST
            }
            Error::Connectivity { .. } | Error::MalformedResponse { .. } => {
                error!("upstream failure: {err}");
                StatusCode::BAD_GATEWAY
            }
            Error::Config(_) => {
                error!("configuration error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Database(_) => {
                error!("database failure: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self { status, detail: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}
