//! Error types raised by store implementations.

use thiserror::Error;

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{store} lock was poisoned")]
    LockPoisoned { store: &'static str },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
