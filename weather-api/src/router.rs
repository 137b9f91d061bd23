use axum::Router;
use axum::routing::get;

use crate::endpoints;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(endpoints::health))
        .route("/weather", get(endpoints::current_weather))
        .route("/forecast", get(endpoints::forecast))
        .route(
            "/locations/",
            get(endpoints::list_locations).post(endpoints::create_location),
        )
        .route(
            "/locations/:id",
            get(endpoints::get_location)
                .put(endpoints::update_location)
                .delete(endpoints::delete_location),
        )
        .with_state(state)
}
