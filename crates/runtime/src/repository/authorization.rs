//! Owner and sudo users allowed to run admin commands.

use std::collections::HashSet;
use std::sync::RwLock;

use guess_core::PlayerId;

use super::{RepositoryError, Result};

/// Tracks who may run privileged commands.
///
/// The owner is fixed at startup; sudo users are granted by the owner and
/// live only as long as the process.
#[derive(Default)]
pub struct AuthorizationStore {
    owner: Option<PlayerId>,
    sudo: RwLock<HashSet<PlayerId>>,
}

impl AuthorizationStore {
    pub fn new(owner: Option<PlayerId>) -> Self {
        Self {
            owner,
            sudo: RwLock::new(HashSet::new()),
        }
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn is_owner(&self, id: PlayerId) -> bool {
        self.owner == Some(id)
    }

    pub fn is_sudo(&self, id: PlayerId) -> bool {
        self.sudo
            .read()
            .map(|sudo| sudo.contains(&id))
            .unwrap_or(false)
    }

    /// Owner or sudo.
    pub fn is_admin(&self, id: PlayerId) -> bool {
        self.is_owner(id) || self.is_sudo(id)
    }

    /// Grants sudo rights. Returns `false` if `id` already had them.
    pub fn add_sudo(&self, id: PlayerId) -> Result<bool> {
        let mut sudo = self
            .sudo
            .write()
            .map_err(|_| RepositoryError::LockPoisoned {
                store: "authorization",
            })?;
        Ok(sudo.insert(id))
    }

    /// Sudo users, sorted by id.
    pub fn sudo_users(&self) -> Vec<PlayerId> {
        let mut users: Vec<PlayerId> = self
            .sudo
            .read()
            .map(|sudo| sudo.iter().copied().collect())
            .unwrap_or_default();
        users.sort_unstable();
        users
    }
}
