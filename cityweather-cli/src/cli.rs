use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use cityweather_core::{Config, LocationQuery, WeatherLookupClient, known_city_names};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for European cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// List the available cities.
    List,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Lisbon", or a "City,Country" pair.
        city: String,

        /// Country code to disambiguate the city, e.g. "PT".
        #[arg(long)]
        country: Option<String>,
    },

    /// Remember the current location so it is listed after the built-in cities.
    Locate {
        /// Location as "City,Country", e.g. "Porto,Portugal".
        location: String,
    },

    /// Print the config file path.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::List => {
                let cfg = Config::load()?;
                for city in city_list(cfg.last_location.as_deref()) {
                    println!("{city}");
                }
            }
            Command::Show { city, country } => {
                let cfg = Config::load()?;
                let mut query = LocationQuery::new(city);
                if let Some(country) = country {
                    query = query.with_country(country);
                }
                show(&cfg, &query).await?;
            }
            Command::Locate { location } => {
                let location = location.trim();
                if location.is_empty() {
                    bail!("Location must not be empty");
                }

                let mut cfg = Config::load()?;
                cfg.set_last_location(location.to_string());
                cfg.save()?;
                println!("Current location set to {location}");
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    cfg.set_api_key(api_key.to_string());
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(cfg: &Config, query: &LocationQuery) -> anyhow::Result<()> {
    let api_key = cfg.api_key()?;
    let client = WeatherLookupClient::new().with_endpoint(cfg.endpoint());

    eprintln!("Loading weather for {}...", query.name);

    match client.lookup(query, &api_key).await {
        Ok(snapshot) => {
            print!("{}", render::detail(&snapshot));
            Ok(())
        }
        Err(err) => {
            tracing::debug!(kind = err.kind(), error = %err, "lookup failed");
            bail!("Couldn't load weather information.")
        }
    }
}

/// Built-in cities followed by the remembered location, if any.
fn city_list(last_location: Option<&str>) -> Vec<String> {
    known_city_names()
        .map(str::to_string)
        .chain(last_location.map(str::to_string))
        .collect()
}
