//! Where is the caller, and what time is it there and in the queried city.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{LocaleConfig, error::WeatherError};

/// City reported when the caller's location cannot be determined.
pub const UNKNOWN_CITY: &str = "Unknown";

/// Format used for both clocks; comparing the rendered strings decides
/// whether the caller and the city share the same time.
pub const TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

#[derive(Debug, Deserialize)]
struct IpInfo {
    city: Option<String>,
}

/// Best-effort geolocation of the caller from their public IP.
#[derive(Debug, Clone)]
pub struct IpLocator {
    url: String,
    http: Client,
}

impl IpLocator {
    pub fn new(config: &LocaleConfig) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self { url: config.geo_url.clone(), http })
    }

    /// City of the caller, or [`UNKNOWN_CITY`] on any failure.
    pub async fn current_city(&self) -> String {
        match self.lookup().await {
            Ok(Some(city)) if !city.trim().is_empty() => city,
            Ok(_) => {
                tracing::debug!("Geolocation response carried no city");
                UNKNOWN_CITY.to_string()
            }
            Err(e) => {
                tracing::debug!("Geolocation lookup failed: {}", e);
                UNKNOWN_CITY.to_string()
            }
        }
    }

    async fn lookup(&self) -> Result<Option<String>, reqwest::Error> {
        let info: IpInfo =
            self.http.get(&self.url).send().await?.error_for_status()?.json().await?;
        Ok(info.city)
    }
}

/// Local date and time of a city `offset_seconds` east of UTC. Flat offset,
/// no daylight saving.
pub fn city_time(
    offset_seconds: i32,
    now: DateTime<Utc>,
) -> Result<DateTime<FixedOffset>, WeatherError> {
    let offset =
        FixedOffset::east_opt(offset_seconds).ok_or(WeatherError::InvalidOffset(offset_seconds))?;
    Ok(now.with_timezone(&offset))
}

/// Rendered clocks of the caller and of the queried city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    pub caller_city: String,
    pub caller_time: String,
    pub city_time: String,
}

impl LocaleContext {
    pub fn new(caller_city: String, caller_time: NaiveDateTime, city_time: NaiveDateTime) -> Self {
        Self {
            caller_city,
            caller_time: caller_time.format(TIME_FORMAT).to_string(),
            city_time: city_time.format(TIME_FORMAT).to_string(),
        }
    }

    /// Detect the caller's city and compare the current clocks.
    pub async fn detect(locator: &IpLocator, offset_seconds: i32) -> Result<Self, WeatherError> {
        let caller_city = locator.current_city().await;
        let now = Utc::now();
        let city_now = city_time(offset_seconds, now)?;
        let caller_now = now.with_timezone(&Local);

        tracing::debug!(%caller_city, %city_now, %caller_now, "Resolved locale context");

        Ok(Self::new(caller_city, caller_now.naive_local(), city_now.naive_local()))
    }

    /// Whether both clocks render identically.
    pub fn same_time(&self) -> bool {
        self.caller_time == self.city_time
    }

    pub fn same_city(&self, city: &str) -> bool {
        self.caller_city == city
    }
}
