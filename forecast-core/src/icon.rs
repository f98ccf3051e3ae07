use serde::Serialize;

/// Display categories for provider condition codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherIcon {
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

impl WeatherIcon {
    /// Look up an OpenWeather icon code such as `"10d"`.
    ///
    /// Unknown codes (thunderstorm, mist and anything new) fall back to [`WeatherIcon::Clear`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "01d" | "01n" => WeatherIcon::Clear,
            "02d" | "02n" | "03d" | "03n" => WeatherIcon::Cloud,
            "04d" | "04n" => WeatherIcon::Drizzle,
            "09d" | "09n" | "10d" | "10n" => WeatherIcon::Rain,
            "13d" | "13n" => WeatherIcon::Snow,
            _ => WeatherIcon::Clear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::Clear => "clear",
            WeatherIcon::Cloud => "cloud",
            WeatherIcon::Drizzle => "drizzle",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Snow => "snow",
        }
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_categories() {
        assert_eq!(WeatherIcon::from_code("01n"), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::from_code("03d"), WeatherIcon::Cloud);
        assert_eq!(WeatherIcon::from_code("04n"), WeatherIcon::Drizzle);
        assert_eq!(WeatherIcon::from_code("09d"), WeatherIcon::Rain);
        assert_eq!(WeatherIcon::from_code("10n"), WeatherIcon::Rain);
        assert_eq!(WeatherIcon::from_code("13d"), WeatherIcon::Snow);
    }

    #[test]
    fn unknown_codes_default_to_clear() {
        assert_eq!(WeatherIcon::from_code("11d"), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::from_code("50n"), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::from_code("99x"), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::from_code(""), WeatherIcon::Clear);
    }
}
