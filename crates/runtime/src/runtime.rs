//! High-level game orchestrator.
//!
//! [`GameRuntime`] ties the stores, the character provider and the pure
//! [`GameEngine`] together. Each operation corresponds to one inbound chat
//! event. Provider fetches always happen outside the player's session lock,
//! so a slow catalog never blocks other events for the same player longer
//! than the fetch itself.

use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;

use guess_core::{
    CharacterName, GameConfig, GameEngine, GuessOutcome, Leaderboard, PlayerId, PlayerSession,
    RoundStart,
};

use crate::api::{AdminAction, CharacterProvider, Result, RuntimeError};
use crate::providers::{CatalogProvider, RetryPolicy};
use crate::repository::{AuthorizationStore, CatalogStore, SessionStore};

/// Runtime configuration shared across operations.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub retry: RetryPolicy,
    /// Fixed seed for hint generation. `None` seeds from the OS.
    pub hint_seed: Option<u64>,
}

/// Reply to a free-text message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessReply {
    /// The player had no round running, so the text started one instead of
    /// being evaluated.
    RoundStarted(RoundStart),
    Evaluated(GuessOutcome),
}

/// Snapshot of a player's statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileView {
    /// Name from the event that requested the profile.
    pub display_name: String,
    pub coins: u64,
    pub correct_guesses: u64,
    pub streak: u32,
    pub top_streak: u32,
    pub round_in_progress: bool,
}

/// Game service shared by every chat event.
///
/// Cloning is cheap; all clones operate on the same stores.
#[derive(Clone)]
pub struct GameRuntime {
    config: Arc<RuntimeConfig>,
    sessions: Arc<SessionStore>,
    provider: Arc<dyn CharacterProvider>,
    catalog: Option<Arc<CatalogStore>>,
    authorization: Arc<AuthorizationStore>,
    rng: Arc<Mutex<StdRng>>,
}

impl GameRuntime {
    /// Create a new runtime builder
    pub fn builder() -> GameRuntimeBuilder {
        GameRuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn authorization(&self) -> &AuthorizationStore {
        &self.authorization
    }

    /// Writable catalog, if the runtime draws from one.
    pub fn catalog(&self) -> Option<&CatalogStore> {
        self.catalog.as_deref()
    }

    /// Starts a fresh round for `player`, replacing any round in progress.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::RoundStartFailed`] when the provider keeps failing;
    /// the session is left untouched in that case.
    pub async fn start_round(&self, player: PlayerId, display_name: &str) -> Result<RoundStart> {
        let handle = self.sessions.get_or_create(player, display_name)?;
        let character = self.fetch_character().await?;

        let mut session = handle.lock().await;
        let start = self.begin_round(&mut session, &character);
        tracing::info!(player = %player, hint = %start.hint, "round started");

        Ok(start)
    }

    /// Handles a free-text message from `player`.
    ///
    /// With a round running, the text is evaluated as a guess. Without one,
    /// a round is started and no attempt is consumed. The caller decides
    /// whether to start the next round after a win or an exhausted round.
    pub async fn submit_guess(
        &self,
        player: PlayerId,
        display_name: &str,
        text: &str,
    ) -> Result<GuessReply> {
        let handle = self.sessions.get_or_create(player, display_name)?;

        {
            let mut session = handle.lock().await;
            if !session.is_idle() {
                let outcome = GameEngine::new(&mut session, &self.config.game).submit_guess(text);
                log_outcome(&session, &outcome);
                return Ok(GuessReply::Evaluated(outcome));
            }
        }

        tracing::debug!(player = %player, "guess while idle, starting a round");
        let character = self.fetch_character().await?;

        let mut session = handle.lock().await;
        if let Some(round) = session.active_round.as_ref() {
            // A concurrent event started a round while we were fetching.
            return Ok(GuessReply::RoundStarted(RoundStart {
                hint: round.hint.clone(),
                attempts: self
                    .config
                    .game
                    .max_attempts
                    .saturating_sub(session.attempts_used),
            }));
        }

        let start = self.begin_round(&mut session, &character);
        tracing::info!(player = %player, hint = %start.hint, "round started");

        Ok(GuessReply::RoundStarted(start))
    }

    /// Statistics for `player`, creating the session on first contact.
    pub async fn profile(&self, player: PlayerId, display_name: &str) -> Result<ProfileView> {
        let handle = self.sessions.get_or_create(player, display_name)?;
        let session = handle.lock().await;

        Ok(ProfileView {
            display_name: display_name.to_string(),
            coins: session.coins,
            correct_guesses: session.correct_guesses,
            streak: session.streak,
            top_streak: session.top_streak,
            round_in_progress: !session.is_idle(),
        })
    }

    /// Top players by coins.
    pub async fn leaderboard(&self) -> Result<Leaderboard> {
        let sessions = self.sessions.snapshot().await?;
        Ok(Leaderboard::rank(&sessions, self.config.game.leaderboard_size))
    }

    /// Adds a character to the catalog. Owner or sudo only.
    pub fn upload_character(&self, actor: PlayerId, text: &str) -> Result<CharacterName> {
        self.require(actor, AdminAction::UploadCharacter, |auth| {
            auth.is_admin(actor)
        })?;

        let catalog = self
            .catalog
            .as_ref()
            .ok_or(RuntimeError::CatalogUnavailable)?;
        let name = CharacterName::new(text)?;
        catalog.push(name.clone())?;

        tracing::info!(actor = %actor, character = %name, "character uploaded");
        Ok(name)
    }

    /// Grants sudo rights to `target`. Owner only.
    ///
    /// Returns `false` if `target` already had them.
    pub fn add_sudo(&self, actor: PlayerId, target: PlayerId) -> Result<bool> {
        self.require(actor, AdminAction::AddSudo, |auth| auth.is_owner(actor))?;

        let added = self.authorization.add_sudo(target)?;
        tracing::info!(actor = %actor, target = %target, added, "sudo granted");
        Ok(added)
    }

    /// Every known player, for the adapter to deliver a broadcast to.
    pub fn broadcast_targets(&self, actor: PlayerId) -> Result<Vec<PlayerId>> {
        self.require(actor, AdminAction::Broadcast, |auth| auth.is_admin(actor))?;

        let targets = self.sessions.identities()?;
        tracing::info!(actor = %actor, recipients = targets.len(), "broadcast requested");
        Ok(targets)
    }

    async fn fetch_character(&self) -> Result<CharacterName> {
        self.config.retry.fetch(self.provider.as_ref()).await
    }

    fn begin_round(&self, session: &mut PlayerSession, character: &CharacterName) -> RoundStart {
        // A panic while holding the rng cannot leave it in an invalid state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        GameEngine::new(session, &self.config.game).begin_round(character, &mut *rng)
    }

    fn require(
        &self,
        actor: PlayerId,
        action: AdminAction,
        allowed: impl FnOnce(&AuthorizationStore) -> bool,
    ) -> Result<()> {
        if allowed(&self.authorization) {
            return Ok(());
        }

        tracing::warn!(actor = %actor, %action, "unauthorized admin command");
        Err(RuntimeError::Unauthorized { actor, action })
    }
}

fn log_outcome(session: &PlayerSession, outcome: &GuessOutcome) {
    match outcome {
        GuessOutcome::Correct(result) => tracing::info!(
            player = %session.id,
            coins = result.total_coins,
            streak = result.streak,
            "correct guess"
        ),
        GuessOutcome::Exhausted(result) => tracing::info!(
            player = %session.id,
            answer = %result.correct_answer,
            "attempts exhausted"
        ),
        other => tracing::debug!(
            player = %session.id,
            attempts_used = session.attempts_used,
            outcome = other.as_str(),
            "guess evaluated"
        ),
    }
}

/// Builder for [`GameRuntime`].
pub struct GameRuntimeBuilder {
    config: RuntimeConfig,
    provider: Option<Arc<dyn CharacterProvider>>,
    catalog: Option<Arc<CatalogStore>>,
    owner: Option<PlayerId>,
    sessions: Option<Arc<SessionStore>>,
}

impl GameRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            provider: None,
            catalog: None,
            owner: None,
            sessions: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Writable catalog for admin uploads.
    ///
    /// Without an explicit [`provider`](Self::provider), rounds draw from
    /// this catalog.
    pub fn catalog(mut self, catalog: Arc<CatalogStore>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Character source for new rounds.
    pub fn provider(mut self, provider: impl CharacterProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    pub fn owner(mut self, owner: Option<PlayerId>) -> Self {
        self.owner = owner;
        self
    }

    /// Share an existing session store.
    pub fn sessions(mut self, sessions: Arc<SessionStore>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Build the runtime.
    ///
    /// With neither a provider nor a catalog, the default catalog is used.
    pub fn build(self) -> GameRuntime {
        let (provider, catalog) = match (self.provider, self.catalog) {
            (Some(provider), catalog) => (provider, catalog),
            (None, catalog) => {
                let catalog = catalog.unwrap_or_else(|| Arc::new(CatalogStore::with_defaults()));
                let provider: Arc<dyn CharacterProvider> =
                    Arc::new(CatalogProvider::new(Arc::clone(&catalog)));
                (provider, Some(catalog))
            }
        };

        let rng = match self.config.hint_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        GameRuntime {
            config: Arc::new(self.config),
            sessions: self.sessions.unwrap_or_default(),
            provider,
            catalog,
            authorization: Arc::new(AuthorizationStore::new(self.owner)),
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime_with(names: &[&str]) -> GameRuntime {
        let catalog = CatalogStore::new(
            names
                .iter()
                .map(|name| CharacterName::new(name).unwrap())
                .collect(),
        );

        GameRuntime::builder()
            .config(RuntimeConfig {
                retry: RetryPolicy::immediate(1),
                hint_seed: Some(11),
                ..RuntimeConfig::default()
            })
            .catalog(Arc::new(catalog))
            .owner(Some(PlayerId(1)))
            .build()
    }

    #[tokio::test]
    async fn test_start_round_uses_catalog() {
        let runtime = runtime_with(&["Jiraiya"]);
        let start = runtime.start_round(PlayerId(9), "Konohamaru").await.unwrap();

        assert_eq!(start.hint.chars().count(), 7);
        assert_eq!(start.attempts, 5);

        let handle = runtime.sessions().get(PlayerId(9)).unwrap().unwrap();
        assert_eq!(handle.lock().await.active_character(), Some("jiraiya"));
    }

    #[tokio::test]
    async fn test_failed_start_leaves_session_idle() {
        let runtime = runtime_with(&[]);

        let err = runtime.start_round(PlayerId(9), "Konohamaru").await.unwrap_err();
        assert!(matches!(err, RuntimeError::RoundStartFailed { .. }));

        let handle = runtime.sessions().get(PlayerId(9)).unwrap().unwrap();
        assert!(handle.lock().await.is_idle());
    }

    #[tokio::test]
    async fn test_profile_uses_current_name() {
        let runtime = runtime_with(&["Jiraiya"]);
        runtime.start_round(PlayerId(9), "Konohamaru").await.unwrap();

        let profile = runtime.profile(PlayerId(9), "Konohamaru Sarutobi").await.unwrap();
        assert_eq!(profile.display_name, "Konohamaru Sarutobi");
        assert!(profile.round_in_progress);

        let handle = runtime.sessions().get(PlayerId(9)).unwrap().unwrap();
        assert_eq!(handle.lock().await.display_name, "Konohamaru");
    }

    #[tokio::test]
    async fn test_upload_requires_admin() {
        let runtime = runtime_with(&["Jiraiya"]);

        let err = runtime.upload_character(PlayerId(2), "Minato Namikaze").unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Unauthorized {
                action: AdminAction::UploadCharacter,
                ..
            }
        ));

        let name = runtime.upload_character(PlayerId(1), " Minato Namikaze ").unwrap();
        assert_eq!(name.display(), "Minato Namikaze");
        assert_eq!(runtime.catalog().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_rejects_blank_name() {
        let runtime = runtime_with(&["Jiraiya"]);
        let err = runtime.upload_character(PlayerId(1), "   ").unwrap_err();

        assert!(matches!(err, RuntimeError::InvalidCharacterName(_)));
        assert_eq!(runtime.catalog().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sudo_flow() {
        let runtime = runtime_with(&["Jiraiya"]);

        assert!(runtime.add_sudo(PlayerId(2), PlayerId(3)).is_err());
        assert!(runtime.add_sudo(PlayerId(1), PlayerId(2)).unwrap());

        // Sudo users can upload and broadcast but not grant sudo.
        assert!(runtime.upload_character(PlayerId(2), "Shisui Uchiha").is_ok());
        assert!(runtime.broadcast_targets(PlayerId(2)).is_ok());
        assert!(runtime.add_sudo(PlayerId(2), PlayerId(4)).is_err());
    }

    #[tokio::test]
    async fn test_broadcast_targets_in_creation_order() {
        let runtime = runtime_with(&["Jiraiya"]);
        runtime.profile(PlayerId(5), "Kiba").await.unwrap();
        runtime.profile(PlayerId(4), "Shino").await.unwrap();

        assert_eq!(
            runtime.broadcast_targets(PlayerId(1)).unwrap(),
            [PlayerId(5), PlayerId(4)]
        );
        assert!(runtime.broadcast_targets(PlayerId(5)).is_err());
    }
}
