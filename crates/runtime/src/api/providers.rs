//! Asynchronous abstraction for sourcing characters to guess.
//!
//! Runtime users plug in [`CharacterProvider`] implementations so rounds can
//! draw from a static catalog, a remote lookup service, or test fixtures.
use async_trait::async_trait;
use thiserror::Error;

use guess_core::CharacterName;

use crate::repository::RepositoryError;

/// Failures raised while fetching a character.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("character catalog is empty")]
    EmptyCatalog,

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog responded with status {0}")]
    Status(u16),

    #[error("invalid catalog response: {0}")]
    InvalidResponse(String),

    #[error("catalog page contained no usable names")]
    NoCandidates,

    #[error(transparent)]
    Store(#[from] RepositoryError),
}

impl ProviderError {
    /// Whether retrying the same request may succeed.
    ///
    /// An empty static catalog only changes through an admin upload, and a
    /// request that cannot even be built (malformed URL) fails the same way
    /// every time. Both are reported immediately instead of being retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::EmptyCatalog | Self::Store(_) => false,
            Self::Http(err) => !err.is_builder(),
            Self::Status(_) | Self::InvalidResponse(_) | Self::NoCandidates => true,
        }
    }
}

/// Supplies the character for a new round.
#[async_trait]
pub trait CharacterProvider: Send + Sync {
    /// Fetch one character name.
    async fn fetch(&self) -> std::result::Result<CharacterName, ProviderError>;
}
