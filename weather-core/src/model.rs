use std::{fmt, str::FromStr};

use crate::{convert::kelvin_to_celsius, error::WeatherError};

/// Which flavour of narrative to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportStyle {
    /// Printed report with compact notation.
    #[default]
    Report,
    /// Report meant to be read aloud; words instead of symbols.
    Speech,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Temperature group in Kelvin, as delivered by the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperatures {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub feels_like: f64,
}

/// Temperature group in whole degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelsiusTemperatures {
    pub current: i32,
    pub min: i32,
    pub max: i32,
    pub feels_like: i32,
}

impl Temperatures {
    pub fn to_celsius(&self) -> CelsiusTemperatures {
        CelsiusTemperatures {
            current: kelvin_to_celsius(self.current),
            min: kelvin_to_celsius(self.min),
            max: kelvin_to_celsius(self.max),
            feels_like: kelvin_to_celsius(self.feels_like),
        }
    }
}

/// Weather category as reported by OpenWeather's `weather[].main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Drizzle,
    Smoke,
    Ash,
    Squall,
    Tornado,
    Dust,
    Fog,
    Sand,
    Mist,
    Haze,
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
}

impl Condition {
    pub const fn all() -> &'static [Condition] {
        &[
            Condition::Drizzle,
            Condition::Smoke,
            Condition::Ash,
            Condition::Squall,
            Condition::Tornado,
            Condition::Dust,
            Condition::Fog,
            Condition::Sand,
            Condition::Mist,
            Condition::Haze,
            Condition::Clear,
            Condition::Clouds,
            Condition::Rain,
            Condition::Thunderstorm,
            Condition::Snow,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Drizzle => "Drizzle",
            Condition::Smoke => "Smoke",
            Condition::Ash => "Ash",
            Condition::Squall => "Squall",
            Condition::Tornado => "Tornado",
            Condition::Dust => "Dust",
            Condition::Fog => "Fog",
            Condition::Sand => "Sand",
            Condition::Mist => "Mist",
            Condition::Haze => "Haze",
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Rain => "Rain",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Snow => "Snow",
        }
    }

    /// Completes the sentence "it seems like <city> is ...".
    pub fn phrase(&self) -> &'static str {
        match self {
            Condition::Drizzle => "drizzling",
            Condition::Smoke => "feeling smoky",
            Condition::Ash => "full of ashes",
            Condition::Squall => "having a squall",
            Condition::Tornado => "having a tornado",
            Condition::Dust => "feeling dusty",
            Condition::Fog => "foggy",
            Condition::Sand => "having sands on the atmosphere",
            Condition::Mist => "having a mist",
            Condition::Haze => "having a haze",
            Condition::Clear => "sunny",
            Condition::Clouds => "cloudy",
            Condition::Rain => "raining",
            Condition::Thunderstorm => "stormy",
            Condition::Snow => "snowing",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = WeatherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Condition::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| WeatherError::UnknownCondition(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCondition {
    pub category: Condition,
    pub description: String,
}

/// Current weather for one city, read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city_name: String,
    pub country_code: Option<String>,
    pub coordinates: Coordinates,
    pub temperature: Temperatures,
    pub utc_offset_seconds: i32,
    pub condition: WeatherCondition,
}
