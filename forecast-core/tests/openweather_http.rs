//! OpenWeather client behaviour against a mock HTTP server.

use std::time::Duration;

use forecast_core::{
    Coordinates, OpenWeatherProvider, Query, WeatherError, WeatherIcon, WeatherProvider,
    WeatherSession,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 13.41, "lat": 52.52 },
        "weather": [{ "id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04d" }],
        "main": { "temp": 7.4, "feels_like": 4.9, "humidity": 81, "pressure": 1012 },
        "wind": { "speed": 4.1, "deg": 240 },
        "dt": 1704103200,
        "name": "Berlin",
        "cod": 200
    })
}

fn forecast_body() -> serde_json::Value {
    // 2024-01-01 03:00 UTC onward, every 3 hours for 6 days.
    let list: Vec<_> = (0..48i64)
        .map(|i| {
            let dt = 1_704_078_000 + i * 3 * 3600;
            let temp = (i % 8) as f64;
            let icon = if i % 8 == 7 { "10n" } else { "01d" };
            serde_json::json!({
                "dt": dt,
                "main": { "temp": temp, "humidity": 70 },
                "weather": [{ "icon": icon }]
            })
        })
        .collect();

    serde_json::json!({
        "cod": "200",
        "cnt": 48,
        "list": list,
        "city": { "name": "Berlin", "country": "DE", "timezone": 0 }
    })
}

async fn provider_for(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_settings("TEST_KEY".into(), server.uri(), Duration::from_secs(5))
        .expect("client builds")
}

#[tokio::test]
async fn current_by_coordinates_sends_metric_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "52.52"))
        .and(query_param("lon", "13.41"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let obs = provider
        .current(&Query::Coordinates(Coordinates::new(52.52, 13.41)))
        .await
        .expect("current conditions");

    assert_eq!(obs.location_name, "Berlin");
    assert_eq!(obs.humidity, 81);
    assert_eq!(obs.icon_code, "04d");
}

#[tokio::test]
async fn forecast_by_city_sends_q_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let payload = provider.forecast(&Query::city("Berlin")).await.expect("forecast");

    assert_eq!(payload.samples.len(), 48);
    assert_eq!(payload.location_name.as_deref(), Some("Berlin"));
}

#[tokio::test]
async fn unknown_city_maps_to_city_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.forecast(&Query::city("Atlantis")).await.unwrap_err();

    assert_eq!(err, WeatherError::CityNotFound);
}

#[tokio::test]
async fn unauthorized_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.current(&Query::city("Berlin")).await.unwrap_err();

    assert_eq!(err, WeatherError::Status { status: 401, body: "Invalid API key".into() });
}

#[tokio::test]
async fn unexpected_shape_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "X" })))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.current(&Query::city("X")).await.unwrap_err();

    assert!(matches!(err, WeatherError::MalformedResponse(_)));
}

#[tokio::test]
async fn invalid_coordinates_never_hit_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let provider = provider_for(&server).await;
    let err = provider
        .current(&Query::Coordinates(Coordinates::new(100.0, 0.0)))
        .await
        .unwrap_err();

    assert_eq!(err, WeatherError::InvalidCoordinates);
}

#[tokio::test]
async fn session_search_renders_five_days_from_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let session = WeatherSession::new(provider_for(&server).await);
    session.search("Berlin").await;

    let state = session.snapshot();
    let current = state.current().data().expect("current conditions");
    assert_eq!(current.temperature, 7);
    assert_eq!(current.icon, WeatherIcon::Drizzle);

    let days = state.forecast().data().expect("forecast");
    assert_eq!(days.len(), 5);
    let labels: Vec<_> = days.iter().map(|d| d.day_label.as_str()).collect();
    assert_eq!(labels, ["Mon", "Tue", "Wed", "Thu", "Fri"]);
    // Jan 1 starts at 03:00, so it only sees temps 0..=6.
    assert_eq!((days[0].min_temp, days[0].max_temp), (0.0, 6.0));
    assert_eq!(days[1].icon_code, "01d");
    assert_eq!(state.error(), None);
}
