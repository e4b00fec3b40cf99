use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures while fetching or interpreting a weather report.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather provider answered with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weather response contained no condition")]
    MissingCondition,

    #[error("unknown weather condition '{0}'")]
    UnknownCondition(String),

    #[error("UTC offset of {0} seconds is out of range")]
    InvalidOffset(i32),
}

/// Failures while synthesizing or playing back the spoken report.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("nothing to say")]
    EmptyText,

    #[error("speech synthesis request failed: {0}")]
    Synthesis(#[from] reqwest::Error),

    #[error("speech synthesis answered with status {0}")]
    SynthesisStatus(StatusCode),

    #[error("failed to write speech file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no audio player configured")]
    NoPlayer,

    #[error("failed to start audio player '{program}': {source}")]
    Playback {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("audio player '{program}' exited with {status}")]
    PlayerExit { program: String, status: std::process::ExitStatus },
}
