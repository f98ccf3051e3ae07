//! Core library for the `forecast` weather viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and its response schema
//! - The current-conditions mapper and the daily forecast aggregator
//! - View state and the session that orchestrates queries
//!
//! It is used by `forecast-cli`, but can also back other front ends.

pub mod aggregate;
pub mod config;
pub mod current;
pub mod error;
pub mod geolocation;
pub mod icon;
pub mod model;
pub mod openweather;
pub mod provider;
pub mod session;
pub mod state;

pub use aggregate::daily_summaries;
pub use config::Config;
pub use current::map_current;
pub use error::WeatherError;
pub use geolocation::{ConfiguredLocation, Geolocator};
pub use icon::WeatherIcon;
pub use model::{Coordinates, CurrentWeather, DailySummary, ForecastSample, Query};
pub use openweather::OpenWeatherProvider;
pub use provider::{WeatherProvider, provider_from_config};
pub use session::WeatherSession;
pub use state::ViewState;
