use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use weather_core::{
    Config, GeocodeClient, LocationPatch, LocationStore, NewLocation, SavedLocation,
    WeatherClient, describe_weathercode, forecast, geocode, resolve_location,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup & favorites")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the geocoder contact email and database location.
    Configure,

    /// Show weather for a location: "lat,lon" or a free-form address.
    Show {
        /// Location, e.g. "32.7767,-96.7970" or "Dallas, TX".
        location: String,

        /// Show the 5-day forecast instead of current conditions.
        #[arg(long)]
        forecast: bool,
    },

    /// Manage saved favorite locations.
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// Save a location under a friendly name.
    Add {
        /// Location, e.g. "32.7767,-96.7970" or "Dallas, TX".
        location: String,

        /// Friendly name; defaults to the reverse-geocoded place name.
        #[arg(long)]
        name: Option<String>,
    },

    /// List saved locations.
    List,

    /// Edit a saved location; prompts for fields left unspecified.
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        /// New location, "lat,lon" or an address.
        #[arg(long)]
        location: Option<String>,
    },

    /// Delete a saved location.
    Remove { id: i64 },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { location, forecast } => show(&config, &location, forecast).await,
            Command::Favorites(cmd) => favorites(&config, cmd).await,
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let contact = inquire::Text::new("Geocoder contact email:")
        .with_help_message("Sent in the User-Agent header, as the geocoding service requires")
        .with_initial_value(config.contact.as_deref().unwrap_or(""))
        .prompt()?;

    let database_url = inquire::Text::new("Database URL:")
        .with_initial_value(
            config
                .database_url
                .as_deref()
                .unwrap_or("sqlite://weather.db?mode=rwc"),
        )
        .prompt()?;

    config.contact = (!contact.trim().is_empty()).then_some(contact);
    config.database_url = Some(database_url);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_clients(config: &Config) -> anyhow::Result<(GeocodeClient, WeatherClient)> {
    let http = weather_core::http_client()?;
    let geocoder = GeocodeClient::new(
        http.clone(),
        geocode::DEFAULT_BASE_URL,
        &config.resolved_contact()?,
    )?;
    let weather = WeatherClient::new(http, forecast::DEFAULT_BASE_URL)?;
    Ok((geocoder, weather))
}

async fn open_store(config: &Config) -> anyhow::Result<LocationStore> {
    let url = config.resolved_database_url();
    LocationStore::connect(&url)
        .await
        .with_context(|| format!("failed to open locations database ({url})"))
}

async fn show(config: &Config, location: &str, want_forecast: bool) -> anyhow::Result<()> {
    let (geocoder, weather) = build_clients(config)?;

    let (lat, lon) = resolve_location(location, &geocoder).await?;
    let place = geocoder.reverse(lat, lon).await;

    if want_forecast {
        println!("5-day forecast for {place}:");
        for day in weather.fetch_forecast(lat, lon).await? {
            // Dates arrive as ISO strings; show the weekday when they parse.
            let label = match day.date.parse::<chrono::NaiveDate>() {
                Ok(date) => format!("{} {}", date.format("%a"), day.date),
                Err(_) => day.date.clone(),
            };
            println!(
                "  {label}: high {:.1}°C | low {:.1}°C | {}",
                day.temp_max,
                day.temp_min,
                describe_weathercode(day.weathercode),
            );
        }
    } else {
        let current = weather.fetch_current(lat, lon).await?;
        println!("Current weather for {place}:");
        println!("  {}, {:.1}°C", describe_weathercode(current.weathercode), current.temperature);
        println!(
            "  Wind {:.1} km/h from {:.0}°",
            current.windspeed, current.winddirection
        );
        println!("  Observed at {}", current.time);
    }

    Ok(())
}

async fn favorites(config: &Config, cmd: FavoritesCommand) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    match cmd {
        FavoritesCommand::Add { location, name } => {
            let (geocoder, _) = build_clients(config)?;
            let (lat, lon) = resolve_location(&location, &geocoder).await?;

            let name = match name {
                Some(name) => name,
                None => geocoder.reverse(lat, lon).await,
            };

            let created = store
                .create(&NewLocation { name, latitude: lat, longitude: lon })
                .await?;
            println!("Saved #{}: {}", created.id, created.name);
        }

        FavoritesCommand::List => {
            let favorites = store.list(0, 100).await?;
            if favorites.is_empty() {
                println!("No saved locations yet. Try `weather favorites add <location>`.");
            }
            for fav in favorites {
                print_favorite(&fav);
            }
        }

        FavoritesCommand::Edit { id, name, location } => {
            let Some(existing) = store.get(id).await? else {
                bail!("no saved location with id {id}");
            };

            // Flags win; otherwise prompt with the stored values prefilled.
            let (name, location) = if name.is_none() && location.is_none() {
                let name = inquire::Text::new("Name:")
                    .with_initial_value(&existing.name)
                    .prompt()?;
                let coords = format!("{:.4},{:.4}", existing.latitude, existing.longitude);
                let location = inquire::Text::new("Location (lat,lon or address):")
                    .with_initial_value(&coords)
                    .prompt()?;
                (Some(name), Some(location))
            } else {
                (name, location)
            };

            let (latitude, longitude) = match location {
                Some(loc) => {
                    let (geocoder, _) = build_clients(config)?;
                    let (lat, lon) = resolve_location(&loc, &geocoder).await?;
                    (Some(lat), Some(lon))
                }
                None => (None, None),
            };

            let patch = LocationPatch { name, latitude, longitude };
            let updated = store
                .update(id, &patch)
                .await?
                .with_context(|| format!("no saved location with id {id}"))?;

            println!("Updated:");
            print_favorite(&updated);
        }

        FavoritesCommand::Remove { id } => match store.delete(id).await? {
            Some(deleted) => println!("Deleted #{}: {}", deleted.id, deleted.name),
            None => bail!("no saved location with id {id}"),
        },
    }

    Ok(())
}

fn print_favorite(fav: &SavedLocation) {
    println!(
        "  #{} {} ({:.4}, {:.4})",
        fav.id, fav.name, fav.latitude, fav.longitude
    );
}
