use std::{
    io::{self, BufRead, IsTerminal, Write},
    process::ExitCode,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use weather_core::{
    Announcer, Config, IpLocator, Narrative, ReportStyle, SpeechAnnouncer, WeatherError,
    WeatherReport, provider_from_config, weather_report,
};

/// The only thing users see when the weather cannot be fetched.
const GENERIC_ERROR: &str = "An error occurred!";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Scripted weather report for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Print the weather report for a city (the default).
    Report {
        /// City name; prompted for when absent.
        city: Option<String>,

        /// Also compare clocks with your location and read the report aloud.
        #[arg(long)]
        speak: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command.unwrap_or(Command::Report { city: None, speak: false }) {
            Command::Configure => configure(),
            Command::Report { city, speak } => report(city, speak).await,
        }
    }
}

fn configure() -> anyhow::Result<ExitCode> {
    // Loaded without env overrides so API_KEY never ends up on disk.
    let mut config = Config::load()?;
    if config.api_key().is_some() {
        println!("An API key is already configured; it will be replaced.");
    }

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(ExitCode::SUCCESS)
}

/// Ask for the city on a terminal; otherwise take the first line of stdin.
fn prompt_city() -> anyhow::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Text::new("Enter a city name:").prompt().context("Failed to read city name");
    }
    read_city(&mut stdin.lock()).context("Failed to read city name from stdin")
}

/// One line of input without its line ending.
fn read_city(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Print the narrative, or only the generic error line when the fetch failed.
fn render(
    result: &Result<(WeatherReport, Narrative), WeatherError>,
    out: &mut impl Write,
) -> io::Result<ExitCode> {
    match result {
        Ok((_, narrative)) => {
            writeln!(out, "{narrative}")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Weather report failed");
            writeln!(out, "{GENERIC_ERROR}")?;
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn report(city: Option<String>, speak: bool) -> anyhow::Result<ExitCode> {
    let config = Config::load()?.with_env_overrides();

    let city = match city {
        Some(city) => city,
        None => prompt_city()?,
    };

    let style = if speak { ReportStyle::Speech } else { ReportStyle::Report };
    let provider = provider_from_config(&config.weather)?;
    let locator = speak.then(|| IpLocator::new(&config.locale)).transpose()?;

    let result = weather_report(provider.as_ref(), &city, style, locator.as_ref()).await;
    let code = render(&result, &mut io::stdout())?;

    let Ok((report, narrative)) = result else {
        return Ok(code);
    };

    if speak {
        let announcer = SpeechAnnouncer::new(&config.speech, report.city_name.as_str())?;
        match announcer.announce(&narrative.speech_text()).await {
            Ok(path) => println!("Saved spoken report to {}", path.display()),
            Err(e) => {
                eprintln!("Speech failed: {e}");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(code)
}
