use weather_api::router::router;
use weather_api::state::AppState;
use weather_core::{Config, GeocodeClient, LocationStore, WeatherClient, forecast, geocode};

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        log::error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;

    let contact = config.resolved_contact()?;
    let database_url = config.resolved_database_url();
    let listen_port = config.resolved_listen_port()?;

    let store = LocationStore::connect(&database_url).await?;
    log::info!("Connected to locations database ({database_url})");

    let http = weather_core::http_client()?;
    let geocoder = GeocodeClient::new(http.clone(), geocode::DEFAULT_BASE_URL, &contact)?;
    let weather = WeatherClient::new(http, forecast::DEFAULT_BASE_URL)?;

    let state = AppState::new(store, geocoder, weather);

    let listen_addr = format!("0.0.0.0:{listen_port}");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    log::info!("Listening on {listen_addr}");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
