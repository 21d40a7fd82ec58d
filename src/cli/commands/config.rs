use anyhow::Result;
use std::path::Path;

use crate::cli::args::ConfigArgs;
use crate::config;

pub async fn execute(args: ConfigArgs, config_path: &Path) -> Result<()> {
    if args.path {
        println!("Configuration file path:");
        println!("  {}", config_path.display());
        return Ok(());
    }

    if args.init {
        println!("Initializing configuration file...");
        config::create_default_config(config_path)?;
        println!("✅ Configuration file created: {}", config_path.display());
        println!("\nYou can now edit this file to customize default settings.");
        return Ok(());
    }

    if args.show {
        println!("Current configuration:");
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            println!("\n{}", content);
        } else {
            println!("  No configuration file found.");
            println!("  Run 'audiosift config --init' to create one.");
        }
        return Ok(());
    }

    // Default: show help
    println!("Configuration management");
    println!("\nOptions:");
    println!("  --show   Show current configuration");
    println!("  --init   Initialize default configuration file");
    println!("  --path   Show configuration file path");

    Ok(())
}
