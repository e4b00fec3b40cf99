//! Core library for the `weather` report CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider and the weather report model
//! - Unit conversions and the narrative composer
//! - Locale enrichment and the spoken report
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod convert;
pub mod error;
pub mod locale;
pub mod model;
pub mod narrative;
pub mod provider;
pub mod speech;

pub use config::{Config, LocaleConfig, SpeechConfig, WeatherConfig};
pub use error::{AudioError, WeatherError};
pub use locale::{IpLocator, LocaleContext};
pub use model::{Condition, ReportStyle, WeatherReport};
pub use narrative::{Narrative, compose};
pub use provider::{WeatherProvider, provider_from_config};
pub use speech::{Announcer, SpeechAnnouncer};

/// Fetch the weather for `city` and compose its narrative.
///
/// With a `locator`, the caller's city and clocks are resolved as well; they
/// only show up in [`ReportStyle::Speech`].
pub async fn weather_report(
    provider: &dyn WeatherProvider,
    city: &str,
    style: ReportStyle,
    locator: Option<&IpLocator>,
) -> Result<(WeatherReport, Narrative), WeatherError> {
    let report = provider.current_weather(city).await?;

    let locale = match locator {
        Some(locator) => Some(LocaleContext::detect(locator, report.utc_offset_seconds).await?),
        None => None,
    };

    let narrative = compose(&report, style, locale.as_ref());
    Ok((report, narrative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, Temperatures, WeatherCondition};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct StubProvider(Result<WeatherReport, fn() -> WeatherError>);

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current_weather(&self, _city: &str) -> Result<WeatherReport, WeatherError> {
            self.0.clone().map_err(|make| make())
        }
    }

    fn snowy_oslo() -> WeatherReport {
        WeatherReport {
            city_name: "Oslo".into(),
            country_code: Some("NO".into()),
            coordinates: Coordinates { latitude: 59.91, longitude: 10.75 },
            temperature: Temperatures {
                current: 268.15,
                min: 266.15,
                max: 270.15,
                feels_like: 263.15,
            },
            utc_offset_seconds: 3600,
            condition: WeatherCondition {
                category: Condition::Snow,
                description: "light snow".into(),
            },
        }
    }

    #[tokio::test]
    async fn weather_report_composes_fetched_report() {
        let provider = StubProvider(Ok(snowy_oslo()));

        let (report, narrative) =
            weather_report(&provider, "Oslo", ReportStyle::Report, None).await.unwrap();

        assert_eq!(report.city_name, "Oslo");
        let text = narrative.to_string();
        assert!(text.contains("beautiful Oslo of NO"));
        assert!(text.contains("-5°c"));
        assert!(text.contains("snowing"));
        assert!(text.contains("GMT +1"));
    }

    #[tokio::test]
    async fn weather_report_propagates_provider_errors() {
        let provider = StubProvider(Err(|| WeatherError::MissingCondition));

        let err = weather_report(&provider, "Oslo", ReportStyle::Report, None).await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingCondition));
    }
}
