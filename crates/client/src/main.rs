//! Guessing game console client.
//!
//! Composition root: loads configuration, sets up logging, assembles the
//! runtime through `client-bootstrap`, and hands control to the console
//! transport.
//!
//! # Examples
//!
//! ```bash
//! # Play against the built-in catalog as the owner
//! OWNER_ID=1 cargo run -p guessbot-client
//!
//! # Draw characters from the remote catalog
//! CHARACTER_SOURCE=remote cargo run -p guessbot-client
//! ```

use anyhow::Result;
use client_bootstrap::{BotConfig, RuntimeBuilder};
use guessbot_client::Bot;
use guessbot_client::console::Console;
use guessbot_client::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = BotConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_session_id.as_deref())?;

    tracing::info!("Starting guessbot");
    tracing::info!("Character source: {}", config.catalog.source.as_str());
    tracing::info!("Owner: {:?}", config.owner_id);

    let setup = RuntimeBuilder::new(config).build()?;
    let console = Console::new(Bot::new(setup.runtime), &setup.config.console);

    console.run().await?;

    tracing::info!("Console closed, shutting down");
    Ok(())
}
