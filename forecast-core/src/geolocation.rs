use std::fmt::Debug;

use async_trait::async_trait;

use crate::{WeatherError, model::Coordinates};

/// One-shot position lookup performed at startup.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, WeatherError>;
}

/// Position taken from explicit coordinates or the configured home location.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    home: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(home: Option<Coordinates>) -> Self {
        Self { home }
    }
}

#[async_trait]
impl Geolocator for ConfiguredLocation {
    async fn locate(&self) -> Result<Coordinates, WeatherError> {
        let coords = self.home.ok_or(WeatherError::GeolocationUnsupported)?;
        coords.validate().map_err(|e| WeatherError::GeolocationFailed(e.to_string()))?;
        Ok(coords)
    }
}
