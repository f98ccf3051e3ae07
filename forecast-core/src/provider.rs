use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;

use crate::{
    Config, WeatherError,
    model::Query,
    openweather::{CurrentObservation, ForecastPayload, OpenWeatherProvider},
};

/// The weather data source the session talks to.
///
/// Implementations perform exactly one request per call and return validated
/// payloads; they never retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &Query) -> Result<CurrentObservation, WeatherError>;

    /// 5-day/3-hour forecast samples.
    async fn forecast(&self, query: &Query) -> Result<ForecastPayload, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key().ok_or(WeatherError::MissingApiKey)?;

    let provider = OpenWeatherProvider::with_settings(
        api_key,
        config.base_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;

    Ok(provider)
}
