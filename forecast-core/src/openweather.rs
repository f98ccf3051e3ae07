//! OpenWeatherMap client and response schema.
//!
//! Raw payloads are deserialized into private wire structs and then checked
//! into [`CurrentObservation`] / [`ForecastPayload`]. Anything that does not
//! fit becomes [`WeatherError::MalformedResponse`], so the mapper and the
//! aggregator only ever see well-formed data.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::WeatherError,
    model::{ForecastSample, Query},
    provider::WeatherProvider,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// A validated current-conditions observation.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentObservation {
    pub location_name: String,
    pub temperature: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub icon_code: String,
}

/// A validated 5-day/3-hour forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPayload {
    pub location_name: Option<String>,
    /// Offset of the location from UTC; UTC when the provider omits it.
    pub utc_offset: FixedOffset,
    pub samples: Vec<ForecastSample>,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self, WeatherError> {
        Self::with_settings(api_key, DEFAULT_BASE_URL.to_string(), Duration::from_secs(30))
    }

    pub fn with_settings(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    fn query_params(&self, query: &Query) -> Vec<(&'static str, String)> {
        let mut params = match query {
            Query::Coordinates(coords) => vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
            Query::City(name) => vec![("q", name.clone())],
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));
        params
    }

    #[instrument(skip(self))]
    async fn fetch(&self, endpoint: &'static str, query: &Query) -> Result<String, WeatherError> {
        match query {
            Query::Coordinates(coords) => coords.validate()?,
            Query::City(name) if name.is_empty() => return Err(WeatherError::CityNotFound),
            Query::City(_) => {}
        }

        let url = format!("{}/{endpoint}", self.base_url);
        debug!(url = %url, "Requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::Request(e.to_string()))?;

        if status == StatusCode::NOT_FOUND && matches!(query, Query::City(_)) {
            return Err(WeatherError::CityNotFound);
        }
        if !status.is_success() {
            return Err(WeatherError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &Query) -> Result<CurrentObservation, WeatherError> {
        let body = self.fetch("weather", query).await?;
        parse_current(&body)
    }

    async fn forecast(&self, query: &Query) -> Result<ForecastPayload, WeatherError> {
        let body = self.fetch("forecast", query).await?;
        parse_forecast(&body)
    }
}

pub fn parse_current(body: &str) -> Result<CurrentObservation, WeatherError> {
    let raw: OwCurrentResponse = serde_json::from_str(body).map_err(WeatherError::malformed)?;
    raw.try_into()
}

pub fn parse_forecast(body: &str) -> Result<ForecastPayload, WeatherError> {
    let raw: OwForecastResponse = serde_json::from_str(body).map_err(WeatherError::malformed)?;
    raw.try_into()
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    city: Option<OwCity>,
    list: Vec<OwForecastEntry>,
}

fn first_icon(weather: Vec<OwWeather>, what: &str) -> Result<String, WeatherError> {
    weather
        .into_iter()
        .next()
        .map(|w| w.icon)
        .ok_or_else(|| WeatherError::malformed(format!("{what} has an empty `weather` array")))
}

impl TryFrom<OwCurrentResponse> for CurrentObservation {
    type Error = WeatherError;

    fn try_from(raw: OwCurrentResponse) -> Result<Self, Self::Error> {
        let humidity = raw
            .main
            .humidity
            .ok_or_else(|| WeatherError::malformed("current observation is missing `main.humidity`"))?;

        Ok(CurrentObservation {
            location_name: raw.name,
            temperature: raw.main.temp,
            humidity,
            wind_speed: raw.wind.speed,
            icon_code: first_icon(raw.weather, "current observation")?,
        })
    }
}

impl TryFrom<OwForecastResponse> for ForecastPayload {
    type Error = WeatherError;

    fn try_from(raw: OwForecastResponse) -> Result<Self, Self::Error> {
        let (location_name, timezone) =
            raw.city.map(|c| (c.name, c.timezone)).unwrap_or_default();

        let utc_offset = match timezone {
            Some(secs) => FixedOffset::east_opt(secs).ok_or_else(|| {
                WeatherError::malformed(format!("`city.timezone` offset {secs} is out of range"))
            })?,
            None => Utc.fix(),
        };

        let samples = raw
            .list
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                if DateTime::<Utc>::from_timestamp(entry.dt, 0).is_none() {
                    return Err(WeatherError::malformed(format!(
                        "forecast entry {i} has an out-of-range timestamp {}",
                        entry.dt
                    )));
                }
                Ok(ForecastSample {
                    timestamp: entry.dt,
                    temperature: entry.main.temp,
                    condition_code: first_icon(entry.weather, &format!("forecast entry {i}"))?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ForecastPayload { location_name, utc_offset, samples })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
