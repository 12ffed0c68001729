//! Builds the game runtime from a [`BotConfig`].
use std::sync::Arc;

use anyhow::{Context, Result};
use guess_core::CharacterName;
use guess_runtime::{CatalogStore, GameRuntime, RemoteCatalogProvider};

use crate::config::{BotConfig, CharacterSource};

/// Assembles stores, provider and runtime for adapters.
pub struct RuntimeBuilder {
    config: BotConfig,
}

impl RuntimeBuilder {
    pub fn new(config: BotConfig) -> Self {
        Self { config }
    }

    /// Fails only when the remote catalog client cannot be constructed.
    pub fn build(self) -> Result<RuntimeSetup> {
        let mut builder = GameRuntime::builder()
            .config(self.config.runtime_config())
            .owner(self.config.owner_id);

        builder = match self.config.catalog.source {
            CharacterSource::Static => {
                let names: Vec<CharacterName> = self
                    .config
                    .catalog
                    .characters
                    .iter()
                    .filter_map(|name| CharacterName::new(name).ok())
                    .collect();
                tracing::info!("Static catalog with {} characters", names.len());
                builder.catalog(Arc::new(CatalogStore::new(names)))
            }
            CharacterSource::Remote => {
                tracing::info!(
                    "Remote catalog at {} ({} pages, {:?} timeout)",
                    self.config.catalog.url,
                    self.config.catalog.pages,
                    self.config.catalog.request_timeout
                );
                let provider = RemoteCatalogProvider::new(
                    self.config.catalog.url.clone(),
                    self.config.catalog.pages,
                    self.config.catalog.request_timeout,
                )
                .context("failed to build remote catalog client")?;
                builder.provider(provider)
            }
        };

        if self.config.owner_id.is_none() {
            tracing::warn!("OWNER_ID not set, admin commands are disabled");
        }

        Ok(RuntimeSetup {
            runtime: builder.build(),
            config: self.config,
        })
    }
}

pub struct RuntimeSetup {
    pub config: BotConfig,
    pub runtime: GameRuntime,
}
