use weather_core::{GeocodeClient, LocationStore, WeatherClient};

/// Shared per-process state: the connection pool and the two upstream
/// clients, all cheaply cloneable per request.
#[derive(Clone)]
pub struct AppState {
    pub store: LocationStore,
    pub geocoder: GeocodeClient,
    pub weather: WeatherClient,
}

impl AppState {
    pub fn new(store: LocationStore, geocoder: GeocodeClient, weather: WeatherClient) -> Self {
        Self { store, geocoder, weather }
    }
}
