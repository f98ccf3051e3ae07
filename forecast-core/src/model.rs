use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{error::WeatherError, icon::WeatherIcon};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn validate(&self) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.latitude, self.longitude)
    }
}

/// What to ask the provider about: a position or a free-text city name.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Coordinates(Coordinates),
    City(String),
}

impl Query {
    pub fn city(name: &str) -> Self {
        Query::City(name.trim().to_owned())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Coordinates(coords) => fmt::Display::fmt(coords, f),
            Query::City(name) => f.write_str(name),
        }
    }
}

/// One 3-hour forecast observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    /// Unix timestamp, seconds.
    pub timestamp: i64,
    /// Degrees Celsius.
    pub temperature: f64,
    pub condition_code: String,
}

/// One row of the forecast strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Calendar date in the location's time zone.
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon".
    pub day_label: String,
    pub min_temp: f64,
    pub max_temp: f64,
    /// Condition code of the last sample seen for this date.
    pub icon_code: String,
}

impl DailySummary {
    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_code(&self.icon_code)
    }
}

/// Current conditions shaped for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    /// Floored degrees Celsius.
    pub temperature: i32,
    pub humidity_percent: u8,
    pub wind_speed_kmh: f64,
    pub location_name: String,
    pub icon_code: String,
    pub icon: WeatherIcon,
}
