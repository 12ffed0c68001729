//! Per-player session storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use guess_core::{PlayerId, PlayerSession};

use super::{RepositoryError, Result};

/// Shared, individually locked session.
///
/// Holding the mutex serializes every read-modify-write of one player while
/// other players proceed in parallel.
pub type SessionHandle = Arc<Mutex<PlayerSession>>;

#[derive(Default)]
struct SessionIndex {
    sessions: HashMap<PlayerId, SessionHandle>,
    /// Creation order, used for deterministic iteration.
    order: Vec<PlayerId>,
}

/// Lazily populated map of player sessions.
///
/// The index lock is never held across `.await`; callers lock the returned
/// [`SessionHandle`] themselves.
#[derive(Default)]
pub struct SessionStore {
    index: RwLock<SessionIndex>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `id`, creating a zeroed one on first contact.
    ///
    /// `display_name` is only recorded at creation; later calls leave the
    /// stored name untouched.
    pub fn get_or_create(&self, id: PlayerId, display_name: &str) -> Result<SessionHandle> {
        if let Some(handle) = self.get(id)? {
            return Ok(handle);
        }

        let mut index = self.index.write().map_err(|_| poisoned())?;
        // Another task may have created it between the two locks.
        if let Some(handle) = index.sessions.get(&id) {
            return Ok(Arc::clone(handle));
        }

        let handle = Arc::new(Mutex::new(PlayerSession::new(id, display_name)));
        index.sessions.insert(id, Arc::clone(&handle));
        index.order.push(id);
        tracing::debug!(player = %id, name = display_name, "session created");

        Ok(handle)
    }

    pub fn get(&self, id: PlayerId) -> Result<Option<SessionHandle>> {
        let index = self.index.read().map_err(|_| poisoned())?;
        Ok(index.sessions.get(&id).cloned())
    }

    /// All sessions in creation order.
    pub fn all(&self) -> Result<Vec<SessionHandle>> {
        let index = self.index.read().map_err(|_| poisoned())?;
        Ok(index
            .order
            .iter()
            .filter_map(|id| index.sessions.get(id).cloned())
            .collect())
    }

    /// Every known player id in creation order.
    pub fn identities(&self) -> Result<Vec<PlayerId>> {
        let index = self.index.read().map_err(|_| poisoned())?;
        Ok(index.order.clone())
    }

    /// Copies every session, locking each one briefly in turn.
    pub async fn snapshot(&self) -> Result<Vec<PlayerSession>> {
        let handles = self.all()?;
        let mut sessions = Vec::with_capacity(handles.len());
        for handle in handles {
            sessions.push(handle.lock().await.clone());
        }
        Ok(sessions)
    }

    pub fn len(&self) -> usize {
        self.index
            .read()
            .map(|index| index.order.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::LockPoisoned { store: "session" }
}
