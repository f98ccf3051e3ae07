//! Text rendering of the view state.

use std::fmt::Write;

use forecast_core::{CurrentWeather, DailySummary, ViewState, WeatherIcon};

pub const LOADING_LINE: &str = "Loading weather...";

fn glyph(icon: WeatherIcon) -> &'static str {
    match icon {
        WeatherIcon::Clear => "☀",
        WeatherIcon::Cloud => "☁",
        WeatherIcon::Drizzle => "🌦",
        WeatherIcon::Rain => "🌧",
        WeatherIcon::Snow => "❄",
    }
}

pub fn render(state: &ViewState) -> String {
    let mut out = String::new();

    if state.is_loading() {
        let _ = writeln!(out, "{LOADING_LINE}");
    }

    if let Some(error) = state.error() {
        let _ = writeln!(out, "Error: {error}");
        out.push('\n');
    }

    if let Some(current) = state.current().data() {
        render_current(&mut out, current);
    }

    if let Some(days) = state.forecast().data() {
        render_forecast(&mut out, days);
    }

    out
}

fn render_current(out: &mut String, current: &CurrentWeather) {
    let _ = writeln!(out, "{}  {}°c", glyph(current.icon), current.temperature);
    let _ = writeln!(out, "{}", current.location_name);
    let _ = writeln!(out, "Humidity    {} %", current.humidity_percent);
    let _ = writeln!(out, "Wind Speed  {} km/h", current.wind_speed_kmh);
    out.push('\n');
}

fn render_forecast(out: &mut String, days: &[DailySummary]) {
    if days.is_empty() {
        let _ = writeln!(out, "No forecast data.");
        return;
    }

    let _ = writeln!(out, "5 days Weather forecast");
    for day in days {
        let _ = writeln!(
            out,
            "{:<4}{}  High: {:.1} °C  Low: {:.1} °C",
            day.day_label,
            glyph(day.icon()),
            day.max_temp,
            day.min_temp
        );
    }
}
