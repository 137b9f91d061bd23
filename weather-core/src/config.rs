use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::Error;

/// Environment variable overriding the geocoder contact email.
pub const GEOCODER_CONTACT_VAR: &str = "GEOCODER_EMAIL";

/// Environment variable overriding the database URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable overriding the HTTP listen port.
pub const LISTEN_PORT_VAR: &str = "LISTEN_PORT";

const DEFAULT_DATABASE_URL: &str = "sqlite://weather.db?mode=rwc";
const DEFAULT_LISTEN_PORT: u16 = 8000;

/// Top-level configuration stored on disk.
///
/// Environment variables take precedence over the file, so a deployment can
/// run without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Contact email sent to the geocoding service in the User-Agent
    /// header, as its usage policy requires.
    pub contact: Option<String>,

    /// Database URL for the saved-locations table.
    pub database_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-app", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Geocoder contact email: environment first, then the config file.
    /// A missing value is a configuration error, surfaced immediately.
    pub fn resolved_contact(&self) -> crate::error::Result<String> {
        if let Ok(email) = std::env::var(GEOCODER_CONTACT_VAR)
            && !email.trim().is_empty()
        {
            return Ok(email);
        }

        match &self.contact {
            Some(email) if !email.trim().is_empty() => Ok(email.clone()),
            _ => Err(Error::Config(format!(
                "Missing geocoder contact email. Set {GEOCODER_CONTACT_VAR} or run `weather configure`."
            ))),
        }
    }

    /// Database URL: environment, then the config file, then the bundled
    /// SQLite default next to the working directory.
    pub fn resolved_database_url(&self) -> String {
        if let Ok(url) = std::env::var(DATABASE_URL_VAR)
            && !url.trim().is_empty()
        {
            return url;
        }

        self.database_url
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }

    /// HTTP listen port for the service binary.
    pub fn resolved_listen_port(&self) -> Result<u16> {
        match std::env::var(LISTEN_PORT_VAR) {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow!("{LISTEN_PORT_VAR} is not a valid port: {raw}")),
            Err(_) => Ok(DEFAULT_LISTEN_PORT),
        }
    }
}
