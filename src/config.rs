use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::extract::AudioFormat;

/// Application configuration loaded from `config.toml`. Every field has a
/// default so a missing or partial file still yields a usable config.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub encoder: EncoderConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Default output format when none is given on the command line.
    pub format: AudioFormat,
    /// Default bitrate token for lossy formats.
    pub bitrate: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            format: AudioFormat::Mp3,
            bitrate: "192k".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EncoderConfig {
    /// Pinned ffmpeg binary. When unset the locator probes the usual
    /// installation directories.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load the config file, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config: {}", path.display()))
    }
}

pub fn config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("audiosift").join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}

pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let default_config = r#"# AudioSift Configuration File
# This file contains default settings for the application

[extraction]
# Default output format (mp3, wav, ogg, m4a, flac, aiff)
format = "mp3"
# Default bitrate for lossy formats (128k, 192k, 256k, 320k)
# Ignored for lossless formats (wav, flac, aiff)
bitrate = "192k"

[encoder]
# Pin a specific ffmpeg binary instead of probing the usual locations
# path = "/usr/local/bin/ffmpeg"
"#;

    std::fs::write(path, default_config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.extraction.format, AudioFormat::Mp3);
        assert_eq!(config.extraction.bitrate, "192k");
        assert!(config.encoder.path.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("[extraction]\nformat = \"flac\"\n").unwrap();
        assert_eq!(config.extraction.format, AudioFormat::Flac);
        assert_eq!(config.extraction.bitrate, "192k");
    }

    #[test]
    fn default_template_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        create_default_config(&path).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.extraction.format, AudioFormat::Mp3);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = Config::load(Path::new("/nonexistent/audiosift.toml")).unwrap();
        assert_eq!(config.extraction.bitrate, "192k");
    }

    #[test]
    fn encoder_path_round_trips() {
        let config: Config =
            toml::from_str("[encoder]\npath = \"/opt/ffmpeg/ffmpeg\"\n").unwrap();
        assert_eq!(
            config.encoder.path,
            Some(PathBuf::from("/opt/ffmpeg/ffmpeg"))
        );
    }
}
