//! Unit conversions used by the narrative: temperatures, coordinates and
//! UTC offsets.

use crate::model::ReportStyle;

const KELVIN_OFFSET: f64 = 273.15;
const SECONDS_PER_HOUR: u32 = 3600;

/// Converts Kelvin to whole degrees Celsius, rounding ties to even.
pub fn kelvin_to_celsius(kelvin: f64) -> i32 {
    (kelvin - KELVIN_OFFSET).round_ties_even() as i32
}

/// An angle split into degrees, minutes and seconds. Always non-negative;
/// the sign lives in the hemisphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
}

/// Degrees and minutes are truncated, the remainder is kept in seconds.
pub fn decimal_degrees_to_dms(degrees: f64) -> Dms {
    let value = degrees.abs();
    let d = value.trunc();
    let m = ((value - d) * 60.0).trunc();
    let s = (value - d - m / 60.0) * 3600.0;

    Dms { degrees: d as u32, minutes: m as u32, seconds: s }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn of_latitude(latitude: f64) -> Self {
        if latitude >= 0.0 { Hemisphere::North } else { Hemisphere::South }
    }

    pub fn of_longitude(longitude: f64) -> Self {
        if longitude >= 0.0 { Hemisphere::East } else { Hemisphere::West }
    }

    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }

    pub fn word(&self) -> &'static str {
        match self {
            Hemisphere::North => "North",
            Hemisphere::South => "South",
            Hemisphere::East => "East",
            Hemisphere::West => "West",
        }
    }
}

fn format_axis(value: f64, hemisphere: Hemisphere, style: ReportStyle) -> String {
    let dms = decimal_degrees_to_dms(value);
    match style {
        ReportStyle::Report => format!(
            "{}° {}' {:.4}'' {}",
            dms.degrees,
            dms.minutes,
            dms.seconds,
            hemisphere.letter()
        ),
        ReportStyle::Speech => format!(
            "{} degrees {} minutes {:.1} seconds {}",
            dms.degrees,
            dms.minutes,
            dms.seconds,
            hemisphere.word()
        ),
    }
}

/// Formats a coordinate pair as DMS strings, latitude first.
pub fn dms_format(latitude: f64, longitude: f64, style: ReportStyle) -> (String, String) {
    (
        format_axis(latitude, Hemisphere::of_latitude(latitude), style),
        format_axis(longitude, Hemisphere::of_longitude(longitude), style),
    )
}

/// Renders a UTC offset as a GMT label.
///
/// Report style always carries a sign (`GMT +1`, `GMT -1`); speech style only
/// spells out the minus (`GMT 1`, `GMT -1`). Offsets that are not whole hours
/// keep their minutes (`GMT +5:30`).
pub fn offset_seconds_to_gmt(offset_seconds: i32, style: ReportStyle) -> String {
    let negative = offset_seconds < 0;
    let total = offset_seconds.unsigned_abs();
    let hours = total / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / 60;

    let magnitude = if minutes == 0 {
        hours.to_string()
    } else {
        format!("{hours}:{minutes:02}")
    };

    match (style, negative) {
        (_, true) => format!("GMT -{magnitude}"),
        (ReportStyle::Report, false) => format!("GMT +{magnitude}"),
        (ReportStyle::Speech, false) => format!("GMT {magnitude}"),
    }
}
