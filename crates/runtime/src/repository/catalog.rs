//! Mutable list of characters backing the static provider.

use std::sync::RwLock;

use rand::seq::SliceRandom;

use guess_core::CharacterName;

use super::{RepositoryError, Result};

/// Characters available when no catalog is configured.
pub const DEFAULT_CHARACTERS: [&str; 4] = [
    "Naruto Uzumaki",
    "Sasuke Uchiha",
    "Sakura Haruno",
    "Kakashi Hatake",
];

/// In-memory character catalog. Admins can append to it at runtime.
pub struct CatalogStore {
    names: RwLock<Vec<CharacterName>>,
}

impl CatalogStore {
    pub fn new(names: Vec<CharacterName>) -> Self {
        Self {
            names: RwLock::new(names),
        }
    }

    /// Catalog seeded with [`DEFAULT_CHARACTERS`].
    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_CHARACTERS
                .iter()
                .filter_map(|name| CharacterName::new(name).ok())
                .collect(),
        )
    }

    pub fn push(&self, name: CharacterName) -> Result<()> {
        let mut names = self.names.write().map_err(|_| poisoned())?;
        names.push(name);
        Ok(())
    }

    /// Uniformly random entry, or `None` when the catalog is empty.
    pub fn pick(&self) -> Result<Option<CharacterName>> {
        let names = self.names.read().map_err(|_| poisoned())?;
        let mut rng = rand::thread_rng();
        Ok(names.choose(&mut rng).cloned())
    }

    pub fn names(&self) -> Result<Vec<CharacterName>> {
        let names = self.names.read().map_err(|_| poisoned())?;
        Ok(names.clone())
    }

    pub fn len(&self) -> usize {
        self.names.read().map(|names| names.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::LockPoisoned { store: "catalog" }
}
