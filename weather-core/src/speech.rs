//! Spoken report: text-to-speech into an mp3 file, then playback.

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use reqwest::Client;
use std::{
    fmt::Debug,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{SpeechConfig, error::AudioError};

/// Longest piece of text the translate TTS endpoint accepts in one request.
const MAX_CHUNK_CHARS: usize = 100;
const FILE_TIMESTAMP_FORMAT: &str = "%d-%m-%Y_%H-%M-%S";

#[async_trait]
pub trait Announcer: Send + Sync + Debug {
    /// Speak `text`, returning where the audio was saved.
    async fn announce(&self, text: &str) -> Result<PathBuf, AudioError>;
}

/// `<city>_<DD-MM-YYYY_HH-MM-SS>.mp3`; path separators in the city are replaced.
pub fn speech_file_name(city: &str, at: NaiveDateTime) -> String {
    let city: String =
        city.chars().map(|c| if matches!(c, '/' | '\\') { '_' } else { c }).collect();
    format!("{city}_{}.mp3", at.format(FILE_TIMESTAMP_FORMAT))
}

/// Splits text into word-aligned chunks of at most `max_chars` characters.
/// Words longer than the limit are cut.
pub fn split_for_tts(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            chunks.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Client for the Google translate text-to-speech endpoint; answers mp3.
#[derive(Debug, Clone)]
pub struct TranslateTts {
    url: String,
    language: String,
    http: Client,
}

impl TranslateTts {
    pub fn new(config: &SpeechConfig) -> Result<Self, AudioError> {
        let http = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self { url: config.tts_url.clone(), language: config.language.clone(), http })
    }

    /// Synthesize `text`; mp3 segments of all chunks are concatenated.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, AudioError> {
        let chunks = split_for_tts(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(AudioError::EmptyText);
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            tracing::debug!(idx, total = %total, "Synthesizing speech chunk");

            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();

            let res = self
                .http
                .get(&self.url)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", self.language.as_str()),
                    ("q", chunk.as_str()),
                    ("idx", idx.as_str()),
                    ("total", total.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await?;

            let status = res.status();
            if !status.is_success() {
                return Err(AudioError::SynthesisStatus(status));
            }

            audio.extend_from_slice(&res.bytes().await?);
        }

        Ok(audio)
    }
}

/// Runs an external player on the saved file and waits for it to finish.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    command: Vec<String>,
}

impl CommandPlayer {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    pub async fn play(&self, path: &Path) -> Result<(), AudioError> {
        let (program, args) = self.command.split_first().ok_or(AudioError::NoPlayer)?;

        let status = tokio::process::Command::new(program)
            .args(args)
            .arg(path)
            .status()
            .await
            .map_err(|source| AudioError::Playback { program: program.clone(), source })?;

        if !status.success() {
            return Err(AudioError::PlayerExit { program: program.clone(), status });
        }
        Ok(())
    }
}

/// Saves the spoken report for one city and plays it back.
#[derive(Debug, Clone)]
pub struct SpeechAnnouncer {
    tts: TranslateTts,
    player: Option<CommandPlayer>,
    output_dir: PathBuf,
    city: String,
}

impl SpeechAnnouncer {
    pub fn new(config: &SpeechConfig, city: impl Into<String>) -> Result<Self, AudioError> {
        let player = config.playback.then(|| CommandPlayer::new(config.player.clone()));

        Ok(Self {
            tts: TranslateTts::new(config)?,
            player,
            output_dir: config.output_dir.clone(),
            city: city.into(),
        })
    }

    async fn save(&self, audio: &[u8]) -> Result<PathBuf, AudioError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| AudioError::Io { path: self.output_dir.clone(), source })?;

        let path = self
            .output_dir
            .join(speech_file_name(&self.city, Local::now().naive_local()));

        tokio::fs::write(&path, audio)
            .await
            .map_err(|source| AudioError::Io { path: path.clone(), source })?;

        Ok(path)
    }
}

#[async_trait]
impl Announcer for SpeechAnnouncer {
    async fn announce(&self, text: &str) -> Result<PathBuf, AudioError> {
        let audio = self.tts.synthesize(text).await?;
        let path = self.save(&audio).await?;
        tracing::info!(path = %path.display(), bytes = audio.len(), "Saved spoken report");

        if let Some(player) = &self.player {
            player.play(&path).await?;
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer, dir: &Path) -> SpeechConfig {
        SpeechConfig {
            output_dir: dir.join("speech"),
            tts_url: format!("{}/translate_tts", server.uri()),
            playback: false,
            timeout_secs: 5,
            ..SpeechConfig::default()
        }
    }

    #[test]
    fn file_name_uses_city_and_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(7, 5, 3).unwrap();

        assert_eq!(speech_file_name("London", at), "London_09-03-2024_07-05-03.mp3");
        assert_eq!(speech_file_name("a/b\\c", at), "a_b_c_09-03-2024_07-05-03.mp3");
    }

    #[test]
    fn split_keeps_words_together() {
        let chunks = split_for_tts("one two three four", 9);
        assert_eq!(chunks, vec!["one two", "three", "four"]);
    }

    #[test]
    fn split_respects_limit_on_long_text() {
        let text = "This is the weather report! ".repeat(20);
        let chunks = split_for_tts(&text, MAX_CHUNK_CHARS);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
        assert_eq!(chunks.join(" "), text.trim_end());
    }

    #[test]
    fn split_cuts_overlong_words() {
        let chunks = split_for_tts("hi abcdefghij yo", 4);
        assert_eq!(chunks, vec!["hi", "abcd", "efgh", "ij", "yo"]);
    }

    #[test]
    fn split_of_blank_text_is_empty() {
        assert!(split_for_tts("   \n ", 10).is_empty());
    }

    #[tokio::test]
    async fn announce_saves_concatenated_audio() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(query_param("tl", "en"))
            .and(query_param("client", "tw-ob"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3".to_vec()))
            .expect(2)
            .mount(&server)
            .await;

        let announcer = SpeechAnnouncer::new(&config(&server, dir.path()), "London").unwrap();
        let text = "word ".repeat(30);

        let path = announcer.announce(&text).await.unwrap();

        assert!(path.starts_with(dir.path().join("speech")));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("London_"));
        assert!(name.ends_with(".mp3"));
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3ID3");
    }

    #[tokio::test]
    async fn announce_rejects_empty_text() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        let announcer = SpeechAnnouncer::new(&config(&server, dir.path()), "London").unwrap();
        let err = announcer.announce("  ").await.unwrap_err();

        assert!(matches!(err, AudioError::EmptyText));
    }

    #[tokio::test]
    async fn synthesis_failure_is_reported() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let announcer = SpeechAnnouncer::new(&config(&server, dir.path()), "London").unwrap();
        let err = announcer.announce("hello there").await.unwrap_err();

        assert!(matches!(err, AudioError::SynthesisStatus(s) if s.as_u16() == 503));
        assert!(!dir.path().join("speech").exists());
    }

    #[tokio::test]
    async fn empty_player_command_is_an_error() {
        let err = CommandPlayer::new(Vec::new()).play(Path::new("x.mp3")).await.unwrap_err();
        assert!(matches!(err, AudioError::NoPlayer));
    }

    #[tokio::test]
    async fn missing_player_program_is_an_error() {
        let player = CommandPlayer::new(vec!["definitely-not-an-audio-player-42".into()]);
        let err = player.play(Path::new("x.mp3")).await.unwrap_err();

        assert!(matches!(err, AudioError::Playback { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn player_exit_status_is_checked() {
        assert!(CommandPlayer::new(vec!["true".into()]).play(Path::new("x.mp3")).await.is_ok());

        let err =
            CommandPlayer::new(vec!["false".into()]).play(Path::new("x.mp3")).await.unwrap_err();
        assert!(matches!(err, AudioError::PlayerExit { .. }));
    }
}
