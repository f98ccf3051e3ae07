use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, ConfiguredLocation, Coordinates, WeatherProvider, WeatherSession, provider_from_config,
};
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Current weather and a 5-day forecast")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional home location.
    Configure,

    /// Show current weather and the forecast strip.
    ///
    /// Without a city, coordinates are taken from --lat/--lon or the configured home location.
    Show {
        /// City name to search for.
        #[arg(conflicts_with_all = ["lat", "lon"])]
        city: Option<String>,

        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Print the view state as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, lat, lon, json } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;

                let explicit = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon));
                show(provider, city, explicit.or(config.home()), json).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }
    config.set_api_key(api_key);

    let wants_home = Confirm::new("Set a home location to use when no city is given?")
        .with_default(config.home().is_some())
        .prompt()?;

    let home = if wants_home {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a number, e.g. 52.52")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a number, e.g. 13.41")
            .prompt()?;
        let home = Coordinates::new(latitude, longitude);
        home.validate()?;
        Some(home)
    } else {
        None
    };
    config.set_home(home);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show<P: WeatherProvider>(
    provider: P,
    city: Option<String>,
    coords: Option<Coordinates>,
    json: bool,
) -> anyhow::Result<()> {
    let session = WeatherSession::new(provider);
    let indicator = (!json).then(|| spawn_loading_indicator(&session));

    match city {
        Some(city) => session.search(&city).await,
        None => session.locate_and_load(&ConfiguredLocation::new(coords)).await,
    }

    let state = session.snapshot();
    drop(session);
    if let Some(indicator) = indicator {
        // Ends once the session's state sender is dropped.
        let _ = indicator.await;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render::render(&state));
    }

    if state.has_data() {
        Ok(())
    } else {
        Err(anyhow!(state.error().unwrap_or("No weather data available").to_string()))
    }
}

fn spawn_loading_indicator<P: WeatherProvider>(session: &WeatherSession<P>) -> JoinHandle<()> {
    let mut updates = session.subscribe();

    tokio::spawn(async move {
        let mut shown = false;
        while updates.changed().await.is_ok() {
            let loading = updates.borrow_and_update().is_loading();
            if loading && !shown {
                eprint!("{}", render::LOADING_LINE);
                shown = true;
            } else if !loading && shown {
                eprint!("\r{}\r", " ".repeat(render::LOADING_LINE.len()));
                shown = false;
            }
        }
        debug!("Loading indicator stopped");
    })
}
