//! Async orchestration for the character guessing game.
//!
//! This crate wires character providers, in-memory stores and the pure
//! [`guess_core::GameEngine`] into a single service, [`GameRuntime`], that a
//! chat adapter calls once per inbound event.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the error and provider types downstream clients use
//! - [`providers`] contains the catalog and remote providers plus retry policy
//! - [`repository`] provides the session, catalog and authorization stores
pub mod api;
pub mod providers;
pub mod repository;
pub mod runtime;

pub use api::{AdminAction, CharacterProvider, ProviderError, Result, RuntimeError};
pub use providers::{CatalogProvider, RemoteCatalogProvider, RetryPolicy};
pub use repository::{
    AuthorizationStore, CatalogStore, DEFAULT_CHARACTERS, RepositoryError, SessionHandle,
    SessionStore,
};
pub use runtime::{GameRuntime, GameRuntimeBuilder, GuessReply, ProfileView, RuntimeConfig};
