//! In-memory stores for data that changes while the bot runs.
//!
//! - [`SessionStore`]: one [`guess_core::PlayerSession`] per player
//! - [`CatalogStore`]: characters available to the static provider
//! - [`AuthorizationStore`]: owner and sudo users for admin commands
//!
//! Nothing here is persisted; every store starts empty (or seeded) when the
//! process starts.

mod authorization;
mod catalog;
mod error;
mod sessions;

pub use authorization::AuthorizationStore;
pub use catalog::{CatalogStore, DEFAULT_CHARACTERS};
pub use error::{RepositoryError, Result};
pub use sessions::{SessionHandle, SessionStore};
