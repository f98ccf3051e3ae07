use crate::{icon::WeatherIcon, model::CurrentWeather, openweather::CurrentObservation};

/// Shape a provider observation for display.
///
/// Humidity and wind speed are passed through as the provider reports them.
pub fn map_current(obs: &CurrentObservation) -> CurrentWeather {
    CurrentWeather {
        temperature: obs.temperature.floor() as i32,
        humidity_percent: obs.humidity,
        wind_speed_kmh: obs.wind_speed,
        location_name: obs.location_name.clone(),
        icon_code: obs.icon_code.clone(),
        icon: WeatherIcon::from_code(&obs.icon_code),
    }
}
