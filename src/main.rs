mod app;
mod cli;
mod config;
mod extract;
mod ui;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
