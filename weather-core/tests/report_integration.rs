//! End-to-end tests: mocked OpenWeather + ipinfo, through to the composed report.

use weather_core::{
    Config, IpLocator, ReportStyle, WeatherError, provider_from_config, weather_report,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn london_json() -> serde_json::Value {
    serde_json::json!({
        "name": "London",
        "main": {"temp": 293.15},
        "weather": [{"main": "Clear", "description": "clear sky"}],
        "coord": {"lat": 51.5, "lon": -0.12},
        "timezone": 0
    })
}

fn config_for(server: &MockServer) -> Config {
    let mut cfg = Config::default();
    cfg.weather.base_url = format!("{}/data/2.5/weather", server.uri());
    cfg.locale.geo_url = format!("{}/json", server.uri());
    cfg.set_api_key("test_key".into());
    cfg
}

#[tokio::test]
async fn test_london_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_json()))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = config_for(&server);
    let provider = provider_from_config(&cfg.weather).unwrap();

    let (_, narrative) =
        weather_report(provider.as_ref(), "London", ReportStyle::Report, None).await.unwrap();
    let text = narrative.to_string();

    assert!(text.contains("London"));
    assert!(text.contains("20°"));
    assert!(text.contains("sunny"));
    assert!(text.contains("GMT +0"));
}

#[tokio::test]
async fn test_error_statuses_stop_the_report() {
    for status in [404u16, 500] {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let cfg = config_for(&server);
        let provider = provider_from_config(&cfg.weather).unwrap();

        let err = weather_report(provider.as_ref(), "Nowhere", ReportStyle::Report, None)
            .await
            .unwrap_err();
        assert!(
            matches!(err, WeatherError::Status { status: s, .. } if s.as_u16() == status),
            "status {status}"
        );
    }
}

#[tokio::test]
async fn test_speech_report_with_same_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_json()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ip": "203.0.113.9", "city": "London"})),
        )
        .mount(&server)
        .await;

    let cfg = config_for(&server);
    let provider = provider_from_config(&cfg.weather).unwrap();
    let locator = IpLocator::new(&cfg.locale).unwrap();

    let (_, narrative) =
        weather_report(provider.as_ref(), "London", ReportStyle::Speech, Some(&locator))
            .await
            .unwrap();

    assert!(narrative.locale[0].contains("while here in London it is"));
    assert!(narrative.locale.iter().any(|l| l.contains("that is where you are")));
    assert!(narrative.timezone.ends_with("GMT 0."));
    assert!(narrative.speech_text().contains("20 degrees Celsius"));
}

#[tokio::test]
async fn test_speech_report_survives_geolocation_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_json()))
        .mount(&server)
        .await;

    let mut cfg = config_for(&server);
    cfg.locale.geo_url = "http://127.0.0.1:1/json".into();
    cfg.locale.timeout_secs = 2;

    let provider = provider_from_config(&cfg.weather).unwrap();
    let locator = IpLocator::new(&cfg.locale).unwrap();

    let (_, narrative) =
        weather_report(provider.as_ref(), "London", ReportStyle::Speech, Some(&locator))
            .await
            .unwrap();

    assert!(narrative.locale[0].contains("while where you are it is"));
}
