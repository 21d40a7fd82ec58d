//! Audio extraction core: encoder discovery, command construction,
//! diagnostic-stream progress parsing, and supervised background jobs.
//! Nothing in here knows about the TUI or CLI surfaces.

pub mod command;
pub mod error;
pub mod format;
pub mod locator;
pub mod orchestrator;
pub mod progress;
pub mod sanitize;

pub use error::ExtractError;
pub use format::AudioFormat;
pub use orchestrator::{
    ExtractionRequest, ExtractionResult, Extractor, JobEvent, JobHandle, JobState,
};
