//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from character providers, stores, and authorization so
//! clients can bubble them up with consistent context.
use thiserror::Error;

use guess_core::{CharacterNameError, PlayerId};

pub use crate::repository::RepositoryError;

use super::providers::ProviderError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("could not start a round after {attempts} fetch attempt(s)")]
    RoundStartFailed {
        attempts: u32,
        #[source]
        source: ProviderError,
    },

    #[error("player {actor} is not allowed to {action}")]
    Unauthorized { actor: PlayerId, action: AdminAction },

    #[error(transparent)]
    InvalidCharacterName(#[from] CharacterNameError),

    #[error("no writable character catalog is configured")]
    CatalogUnavailable,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Privileged operations checked against the authorization store.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdminAction {
    UploadCharacter,
    AddSudo,
    Broadcast,
}

impl std::fmt::Display for AdminAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AdminAction::UploadCharacter => "upload characters",
            AdminAction::AddSudo => "add sudo users",
            AdminAction::Broadcast => "broadcast",
        };
        write!(f, "{}", label)
    }
}
