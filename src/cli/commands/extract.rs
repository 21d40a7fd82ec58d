use anyhow::Result;
use std::path::Path;
use std::sync::mpsc;

use crate::cli::args::ExtractArgs;
use crate::config::Config;
use crate::extract::{ExtractionRequest, Extractor, JobEvent};

pub async fn execute(args: ExtractArgs, config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;

    let format = args.format.unwrap_or(config.extraction.format);
    let bitrate = args
        .bitrate
        .unwrap_or_else(|| config.extraction.bitrate.clone());
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension(format.extension()));

    println!("📹 Input video:  {}", args.input.display());
    println!("🎵 Output audio: {}", output.display());
    println!("⚙️  Format: {}", format.as_str());
    if format.is_lossless() {
        println!("⚙️  Quality: lossless\n");
    } else {
        println!("⚙️  Bitrate: {}\n", bitrate);
    }

    let request = ExtractionRequest {
        input: args.input,
        output: Some(output),
        format,
        bitrate,
    };

    let extractor = match config.encoder.path {
        Some(path) => Extractor::with_encoder(path),
        None => Extractor::new(),
    };

    let (tx, rx) = mpsc::channel();
    let _handle = extractor.spawn(request, tx);

    for event in rx {
        match event {
            JobEvent::Log(line) => println!("  {}", line),
            JobEvent::Progress(percent, message) => {
                println!("  [{:3}%] {}", percent, message)
            }
            JobEvent::Finished(Ok(path)) => {
                println!("\n✅ Extraction complete!");
                println!("   Output: {}", path.display());
            }
            JobEvent::Finished(Err(e)) => {
                anyhow::bail!("Extraction failed: {e}");
            }
        }
    }

    Ok(())
}
