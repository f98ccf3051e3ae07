use thiserror::Error;

/// Everything a weather query can fail with.
///
/// Every variant is recoverable: the session stores the rendered message in
/// the view state's error slot and keeps previously displayed data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    /// No location source is available at all.
    #[error("Geolocation is not supported on this system.")]
    GeolocationUnsupported,

    /// A location source exists but could not produce a position.
    #[error("Geolocation failed: {0}")]
    GeolocationFailed(String),

    /// Connection, TLS, timeout or body read failure.
    #[error("Request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A city query matched nothing on the provider side.
    #[error("City not found. Please try another city.")]
    CityNotFound,

    /// The provider answered, but the payload did not match the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    #[error(
        "No OpenWeather API key configured.\n\
         Hint: run `forecast configure` or set OPENWEATHER_API_KEY."
    )]
    MissingApiKey,
}

impl WeatherError {
    pub(crate) fn malformed(err: impl std::fmt::Display) -> Self {
        WeatherError::MalformedResponse(err.to_string())
    }
}
