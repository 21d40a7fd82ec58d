use anyhow::Result;

use crate::extract::AudioFormat;

pub async fn execute() -> Result<()> {
    println!("Supported output formats:\n");
    println!(
        "  {:<6} {:<30} {:<10} {}",
        "NAME", "DESCRIPTION", "BITRATE", "CODEC ARGS"
    );
    for format in AudioFormat::ALL {
        println!(
            "  {:<6} {:<30} {:<10} {}",
            format.as_str(),
            format.label(),
            if format.accepts_bitrate() { "yes" } else { "-" },
            format.codec_args().join(" "),
        );
    }
    println!("\nLossless formats (wav, flac, aiff) ignore the bitrate setting.");
    Ok(())
}
