use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of one extraction job. None of these are retried by the
/// core; each is delivered once as the terminal result of the job.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No working ffmpeg binary was found. This is a configuration problem,
    /// not a transient fault; the hint carries platform install guidance.
    #[error("FFmpeg not found. {hint}")]
    EncoderNotFound { hint: &'static str },

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// FFmpeg printed an error line on its diagnostic stream. The offending
    /// line is surfaced verbatim.
    #[error("FFmpeg error: {0}")]
    EncoderError(String),

    #[error("FFmpeg exited with status {code}")]
    EncoderExit { code: i32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
