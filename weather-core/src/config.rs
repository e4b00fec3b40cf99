use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "API_KEY";

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_GEO_URL: &str = "https://ipinfo.io/json";
pub const DEFAULT_TTS_URL: &str = "https://translate.google.com/translate_tts";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for the weather provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_WEATHER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Settings for detecting where the caller is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub geo_url: String,
    pub timeout_secs: u64,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self { geo_url: DEFAULT_GEO_URL.to_string(), timeout_secs: DEFAULT_TIMEOUT_SECS }
    }
}

/// Settings for the spoken report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Folder the synthesized mp3 files land in.
    pub output_dir: PathBuf,
    pub tts_url: String,
    pub language: String,
    /// Player command line; the audio file path is appended as last argument.
    pub player: Vec<String>,
    pub playback: bool,
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("speech"),
            tts_url: DEFAULT_TTS_URL.to_string(),
            language: "en".to_string(),
            player: vec!["mpv".into(), "--no-video".into(), "--really-quiet".into()],
            playback: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [weather]
/// api_key = "..."
///
/// [speech]
/// player = ["ffplay", "-nodisp", "-autoexit"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub weather: WeatherConfig,
    pub locale: LocaleConfig,
    pub speech: SpeechConfig,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-report", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_key_override(std::env::var(API_KEY_ENV).ok())
    }

    /// Replace the API key when `key` holds a non-empty value.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.weather.api_key = Some(key);
        }
        self
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.weather.api_key = Some(api_key);
    }

    /// Returns the API key, if present.
    pub fn api_key(&self) -> Option<&str> {
        self.weather.api_key.as_deref()
    }
}
