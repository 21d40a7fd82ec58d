use anyhow::Result;

use crate::extract::locator;

pub async fn execute() -> Result<()> {
    println!("Probing for ffmpeg...");
    match locator::locate() {
        Some(path) => {
            println!("✅ ffmpeg found: {}", path.display());
            Ok(())
        }
        None => {
            anyhow::bail!("ffmpeg not found. {}", locator::install_hint());
        }
    }
}
