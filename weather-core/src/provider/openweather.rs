use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    WeatherConfig,
    error::WeatherError,
    model::{Condition, Coordinates, Temperatures, WeatherCondition, WeatherReport},
    provider::truncate_body,
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.base_url.clone(),
            http,
        })
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        tracing::debug!(city, url = %self.base_url, "Requesting current weather");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("appid", self.api_key.as_str()), ("q", city)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status { status, body: truncate_body(&body) });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        parsed.into_report()
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
    feels_like: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    timezone: i32,
    #[serde(default)]
    sys: OwSys,
}

impl OwCurrentResponse {
    fn into_report(self) -> Result<WeatherReport, WeatherError> {
        let weather = self.weather.into_iter().next().ok_or(WeatherError::MissingCondition)?;
        let category = weather.main.parse::<Condition>()?;

        let current = self.main.temp;

        Ok(WeatherReport {
            city_name: self.name,
            country_code: self.sys.country,
            coordinates: Coordinates { latitude: self.coord.lat, longitude: self.coord.lon },
            temperature: Temperatures {
                current,
                min: self.main.temp_min.unwrap_or(current),
                max: self.main.temp_max.unwrap_or(current),
                feels_like: self.main.feels_like.unwrap_or(current),
            },
            utc_offset_seconds: self.timezone,
            condition: WeatherCondition { category, description: weather.description },
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let report = self.fetch_current(city).await?;
        tracing::info!(
            city = %report.city_name,
            condition = %report.condition.category,
            "Fetched current weather"
        );
        Ok(report)
    }
}
