use crate::{WeatherConfig, WeatherReport, error::WeatherError};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the current weather for a free-text city name.
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}

/// Construct the weather provider from config.
pub fn provider_from_config(
    config: &WeatherConfig,
) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    if config.api_key.is_none() {
        tracing::warn!(
            "No API key configured; the request will most likely be rejected. \
             Set API_KEY or run `weather configure`."
        );
    }

    Ok(Box::new(OpenWeatherProvider::new(config)?))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_works_without_api_key() {
        let cfg = WeatherConfig::default();
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let body = "é".repeat(300);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
