use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::extract::AudioFormat;

#[derive(Parser, Debug)]
#[command(name = "audiosift")]
#[command(version = "0.1.0")]
#[command(about = "Extract audio tracks from video files", long_about = None)]
#[command(arg_required_else_help = false)]
pub struct Cli {
    /// Subcommand to execute (if none provided, launches TUI)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the audio track from a video file
    Extract(ExtractArgs),

    /// List supported output formats
    Formats,

    /// Check whether a usable ffmpeg binary can be found
    Doctor,

    /// Manage configuration
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Input video file path
    #[arg(value_name = "VIDEO")]
    pub input: PathBuf,

    /// Output audio file path (default: <input>.<format>)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, or mp3)
    #[arg(short = 'f', long)]
    pub format: Option<AudioFormat>,

    /// Bitrate for lossy formats, e.g. 128k, 192k, 256k, 320k
    #[arg(short = 'b', long)]
    pub bitrate: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,

    /// Initialize default configuration file
    #[arg(long)]
    pub init: bool,

    /// Show configuration file path
    #[arg(long)]
    pub path: bool,
}
