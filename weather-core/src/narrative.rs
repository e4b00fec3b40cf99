//! Turns a [`WeatherReport`] into the scripted weather report.

use std::fmt;

use crate::{
    convert::{dms_format, offset_seconds_to_gmt},
    locale::{LocaleContext, UNKNOWN_CITY},
    model::{ReportStyle, WeatherReport},
};

/// The composed report, one sentence group per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub opening: String,
    pub timezone: String,
    /// Local time remarks, only present in speech style.
    pub locale: Vec<String>,
    pub coordinates: String,
    pub temperature: String,
    pub weather: String,
    pub closing: String,
}

impl Narrative {
    /// The report as printed: introduction, conditions, sign-off.
    pub fn paragraphs(&self) -> Vec<String> {
        let mut intro = vec![self.opening.as_str(), self.timezone.as_str()];
        intro.extend(self.locale.iter().map(String::as_str));
        intro.push(self.coordinates.as_str());

        vec![
            intro.join(" "),
            format!("{} {}", self.temperature, self.weather),
            self.closing.clone(),
        ]
    }

    /// The whole report as a single block of text to be read aloud.
    pub fn speech_text(&self) -> String {
        self.paragraphs().join(" ")
    }
}

impl fmt::Display for Narrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.paragraphs().join("\n"))
    }
}

/// Compose the report. `locale` is only used in [`ReportStyle::Speech`].
pub fn compose(
    report: &WeatherReport,
    style: ReportStyle,
    locale: Option<&LocaleContext>,
) -> Narrative {
    let name = report.city_name.as_str();
    let temps = report.temperature.to_celsius();
    let (lat, lon) =
        dms_format(report.coordinates.latitude, report.coordinates.longitude, style);
    let gmt = offset_seconds_to_gmt(report.utc_offset_seconds, style);

    let opening = match (style, report.country_code.as_deref()) {
        (ReportStyle::Report, Some(country)) => format!(
            "This is the weather report! Today we will take a look at the beautiful {name} of {country}!"
        ),
        _ => format!(
            "This is the weather report! Today we will take a look at the beautiful {name}!"
        ),
    };

    let coordinates = format!(
        "If you are wandering: 'where is that place?' Fear not, I'm here to tell you that \
         {name}'s DMS latitude longitude coordinates are {lat} and {lon}."
    );

    let timezone = format!(
        "Well how about its timezone? Indeed, the official time zone in {name} defined by an \
         UTC offset of {gmt}."
    );

    let degrees = |value: i32| match style {
        ReportStyle::Report => format!("{value}°c"),
        ReportStyle::Speech => format!("{value} degrees Celsius"),
    };

    let temperature = format!(
        "Enough with the introduction, let's start our report today with {name}'s temperature! \
         I'm here to tell you that the temperature in {name} for today is {}, which it is \
         predicted to peak {}, and reach the lowest at {}. If you are at {name} at this moment, \
         you might feel the current temperature is like {}.",
        degrees(temps.current),
        degrees(temps.max),
        degrees(temps.min),
        degrees(temps.feels_like),
    );

    let weather = format!(
        "For the weather itself, it seems like {name} is {}! I would describe the current \
         situation as '{}'!",
        report.condition.category.phrase(),
        report.condition.description,
    );

    let closing =
        "Well, that's a wrap for our report today! Thank you for listening, and have a nice day!"
            .to_string();

    let locale = match (style, locale) {
        (ReportStyle::Speech, Some(ctx)) => locale_remarks(name, ctx),
        _ => Vec::new(),
    };

    Narrative { opening, timezone, locale, coordinates, temperature, weather, closing }
}

fn locale_remarks(name: &str, ctx: &LocaleContext) -> Vec<String> {
    let here = if ctx.caller_city == UNKNOWN_CITY {
        "where you are".to_string()
    } else {
        format!("here in {}", ctx.caller_city)
    };

    let mut remarks = vec![format!(
        "Right now it is {} in {name}, while {here} it is {}.",
        ctx.city_time, ctx.caller_time
    )];

    if ctx.same_time() {
        remarks.push(format!(
            "Looks like {name} shares the same clock as you, so no need to adjust your watch!"
        ));
    }

    if ctx.same_city(name) {
        remarks.push(
            "Wait a second, that is where you are right now! Just take a look out of the window!"
                .to_string(),
        );
    }

    remarks
}
