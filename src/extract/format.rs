use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::error::ExtractError;

/// The closed set of output formats. Each variant carries its encoding
/// profile as data; unknown format names are rejected at the boundary by
/// `FromStr`, never inside the command builder.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Ogg,
    M4a,
    Flac,
    Aiff,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 6] = [
        AudioFormat::Mp3,
        AudioFormat::Wav,
        AudioFormat::Ogg,
        AudioFormat::M4a,
        AudioFormat::Flac,
        AudioFormat::Aiff,
    ];

    /// Codec arguments passed to ffmpeg for this format.
    pub fn codec_args(&self) -> &'static [&'static str] {
        match self {
            AudioFormat::Mp3 => &["-c:a", "libmp3lame"],
            AudioFormat::Wav => &["-c:a", "pcm_s16le"],
            AudioFormat::Ogg => &["-c:a", "libvorbis", "-q:a", "6"],
            AudioFormat::M4a => &["-c:a", "aac"],
            AudioFormat::Flac => &["-c:a", "flac"],
            AudioFormat::Aiff => &["-c:a", "pcm_s16be"],
        }
    }

    /// Whether the profile takes a `-b:a` bitrate flag. Lossless and
    /// quality-scaled codecs ignore the requested bitrate.
    pub fn accepts_bitrate(&self) -> bool {
        matches!(self, AudioFormat::Mp3 | AudioFormat::M4a)
    }

    pub fn is_lossless(&self) -> bool {
        matches!(
            self,
            AudioFormat::Wav | AudioFormat::Flac | AudioFormat::Aiff
        )
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
            AudioFormat::M4a => "m4a",
            AudioFormat::Flac => "flac",
            AudioFormat::Aiff => "aiff",
        }
    }

    /// Human-readable label for selectors and listings.
    pub fn label(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "MP3 - best compatibility",
            AudioFormat::Wav => "WAV - lossless",
            AudioFormat::Ogg => "OGG - open format",
            AudioFormat::M4a => "M4A - Apple format",
            AudioFormat::Flac => "FLAC - lossless compression",
            AudioFormat::Aiff => "AIFF - professional audio",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mp3" => Ok(AudioFormat::Mp3),
            "wav" => Ok(AudioFormat::Wav),
            "ogg" => Ok(AudioFormat::Ogg),
            "m4a" => Ok(AudioFormat::M4a),
            "flac" => Ok(AudioFormat::Flac),
            "aiff" => Ok(AudioFormat::Aiff),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_args_match_profiles() {
        assert_eq!(AudioFormat::Mp3.codec_args(), ["-c:a", "libmp3lame"]);
        assert_eq!(AudioFormat::Wav.codec_args(), ["-c:a", "pcm_s16le"]);
        assert_eq!(
            AudioFormat::Ogg.codec_args(),
            ["-c:a", "libvorbis", "-q:a", "6"]
        );
        assert_eq!(AudioFormat::M4a.codec_args(), ["-c:a", "aac"]);
        assert_eq!(AudioFormat::Flac.codec_args(), ["-c:a", "flac"]);
        assert_eq!(AudioFormat::Aiff.codec_args(), ["-c:a", "pcm_s16be"]);
    }

    #[test]
    fn only_lossy_byte_rate_formats_accept_bitrate() {
        for format in AudioFormat::ALL {
            let expected = matches!(format, AudioFormat::Mp3 | AudioFormat::M4a);
            assert_eq!(format.accepts_bitrate(), expected, "{format}");
        }
    }

    #[test]
    fn lossless_flags() {
        assert!(!AudioFormat::Mp3.is_lossless());
        assert!(AudioFormat::Wav.is_lossless());
        assert!(!AudioFormat::Ogg.is_lossless());
        assert!(!AudioFormat::M4a.is_lossless());
        assert!(AudioFormat::Flac.is_lossless());
        assert!(AudioFormat::Aiff.is_lossless());
    }

    #[test]
    fn parses_known_formats_case_insensitively() {
        assert_eq!("mp3".parse::<AudioFormat>().unwrap(), AudioFormat::Mp3);
        assert_eq!("FLAC".parse::<AudioFormat>().unwrap(), AudioFormat::Flac);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "opus".parse::<AudioFormat>().unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ref s) if s == "opus"));
    }

    #[test]
    fn extension_round_trips_through_as_str() {
        for format in AudioFormat::ALL {
            assert_eq!(format.extension(), format.as_str());
            assert_eq!(format.as_str().parse::<AudioFormat>().unwrap(), format);
        }
    }
}
