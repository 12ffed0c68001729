//! Provider drawing uniformly from the in-memory catalog.

use std::sync::Arc;

use async_trait::async_trait;

use guess_core::CharacterName;

use crate::api::{CharacterProvider, ProviderError};
use crate::repository::CatalogStore;

/// Picks a random entry of a shared [`CatalogStore`].
///
/// The store is shared with the runtime so admin uploads become visible to
/// the very next round.
#[derive(Clone)]
pub struct CatalogProvider {
    catalog: Arc<CatalogStore>,
}

impl CatalogProvider {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }
}

#[async_trait]
impl CharacterProvider for CatalogProvider {
    async fn fetch(&self) -> Result<CharacterName, ProviderError> {
        self.catalog.pick()?.ok_or(ProviderError::EmptyCatalog)
    }
}
