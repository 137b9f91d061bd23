use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use log::debug;
use weather_core::{LocationPatch, NewLocation, SavedLocation, resolve_location};

use crate::state::AppState;
use crate::types::*;

const DEFAULT_PAGE_LIMIT: i64 = 100;
const MAX_PAGE_LIMIT: i64 = 1000;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Weather service is running. Try /weather?loc=... or /forecast?loc=...",
    })
}

pub async fn current_weather(
    State(state): State<AppState>,
    Query(q): Query<LocQuery>,
) -> Result<Json<CurrentResponse>> {
    debug!("request for current weather at loc={}", q.loc);
    let (latitude, longitude) = resolve(&state, &q.loc).await?;

    let current = state.weather.fetch_current(latitude, longitude).await?;

    Ok(Json(CurrentResponse { latitude, longitude, current }))
}

pub async fn forecast(
    State(state): State<AppState>,
    Query(q): Query<LocQuery>,
) -> Result<Json<ForecastResponse>> {
    debug!("request for 5-day forecast at loc={}", q.loc);
    let (latitude, longitude) = resolve(&state, &q.loc).await?;

    let forecast = state.weather.fetch_forecast(latitude, longitude).await?;

    Ok(Json(ForecastResponse { latitude, longitude, forecast }))
}

pub async fn create_location(
    State(state): State<AppState>,
    Json(new): Json<NewLocation>,
) -> Result<(StatusCode, Json<SavedLocation>)> {
    new.validate()?;

    let created = state.store.create(&new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_locations(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<SavedLocation>>> {
    let skip = page.skip.unwrap_or(0);
    let limit = page.limit.unwrap_or(DEFAULT_PAGE_LIMIT);

    if skip < 0 {
        return Err(ApiError::bad_request("skip must be >= 0"));
    }
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ApiError::bad_request(format!(
            "limit must be between 1 and {MAX_PAGE_LIMIT}"
        )));
    }

    let rows = state.store.list(skip, limit).await?;
    Ok(Json(rows))
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SavedLocation>> {
    match state.store.get(id).await? {
        Some(row) => Ok(Json(row)),
        None => Err(ApiError::not_found()),
    }
}

pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<LocationPatch>,
) -> Result<Json<SavedLocation>> {
    patch.validate()?;

    match state.store.update(id, &patch).await? {
        Some(row) => Ok(Json(row)),
        None => Err(ApiError::not_found()),
    }
}

pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SavedLocation>> {
    match state.store.delete(id).await? {
        Some(row) => Ok(Json(row)),
        None => Err(ApiError::not_found()),
    }
}

/// Classify `loc` as coordinates or an address, delegating to the geocoder
/// for the latter.
async fn resolve(state: &AppState, loc: &str) -> Result<(f64, f64)> {
    if loc.trim().is_empty() {
        return Err(ApiError::bad_request("loc must not be empty"));
    }

    Ok(resolve_location(loc, &state.geocoder).await?)
}
