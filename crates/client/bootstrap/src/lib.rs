//! Shared bootstrap utilities for chat adapters.
//!
//! Provides configuration loading and runtime assembly so any adapter (the
//! console client, a real chat transport) starts the game the same way.
pub mod builder;
pub mod config;

pub use builder::{RuntimeBuilder, RuntimeSetup};
pub use config::{BotConfig, CatalogConfig, CharacterSource, ConsoleConfig};
