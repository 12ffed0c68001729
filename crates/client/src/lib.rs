//! Chat adapter for the guessing game.
//!
//! # Architecture
//!
//! ```text
//! transport (console, chat API)
//!   └─→ ChatEvent ─→ Bot::handle ─→ GameRuntime
//!                        └─→ Vec<Outgoing> ─→ transport
//! ```
//!
//! [`Bot`] routes commands and guesses to the runtime and renders replies.
//! It owns the orchestration the engine leaves to its caller: after a win or
//! an exhausted round, the next round is started right away. Delivering the
//! replies is the transport's job.

pub mod chat;
pub mod console;
pub mod logging;
pub mod render;

pub use chat::{ChatEvent, Command};

use anyhow::Result;
use guess_core::{GuessOutcome, PlayerId};
use guess_runtime::{GameRuntime, GuessReply, RuntimeError};

/// A reply addressed to one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outgoing {
    pub to: PlayerId,
    pub text: String,
}

impl Outgoing {
    pub fn new(to: PlayerId, text: impl Into<String>) -> Self {
        Self {
            to,
            text: text.into(),
        }
    }
}

/// Routes chat events to the game runtime.
#[derive(Clone)]
pub struct Bot {
    runtime: GameRuntime,
}

impl Bot {
    pub fn new(runtime: GameRuntime) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &GameRuntime {
        &self.runtime
    }

    /// Handles one inbound event and returns the replies to deliver.
    ///
    /// Failures to start a round are answered in chat; other runtime errors
    /// are returned to the transport.
    pub async fn handle(&self, event: &ChatEvent) -> Result<Vec<Outgoing>> {
        let mut replies = Replies::new(event.player);

        match event.command() {
            Some(command) => {
                tracing::debug!(player = %event.player, ?command, "command received");
                self.handle_command(event, command, &mut replies).await?;
            }
            None => self.handle_guess(event, &mut replies).await?,
        }

        Ok(replies.into_inner())
    }

    async fn handle_command(
        &self,
        event: &ChatEvent,
        command: Command,
        replies: &mut Replies,
    ) -> Result<()> {
        let player = event.player;

        match command {
            Command::Start => {
                // Registers the player before greeting them.
                self.runtime.profile(player, &event.display_name).await?;
                replies.push(render::welcome(self.runtime.config().game.max_attempts));
                self.next_round(event, replies).await?;
            }
            Command::Profile => {
                let view = self.runtime.profile(player, &event.display_name).await?;
                replies.push(render::profile(&view));
            }
            Command::Top => {
                let board = self.runtime.leaderboard().await?;
                replies.push(render::leaderboard(&board));
            }
            Command::Help => replies.push(render::help()),
            Command::Upload(name) => {
                let text = match self.runtime.upload_character(player, &name) {
                    Ok(name) => render::uploaded(name.display()),
                    Err(RuntimeError::Unauthorized { .. }) => render::upload_denied(),
                    Err(RuntimeError::InvalidCharacterName(_)) => render::upload_missing_name(),
                    Err(RuntimeError::CatalogUnavailable) => render::upload_unavailable(),
                    Err(err) => return Err(err.into()),
                };
                replies.push(text);
            }
            Command::AddSudo(target) => {
                let text = if !self.runtime.authorization().is_owner(player) {
                    render::sudo_denied()
                } else {
                    match target {
                        Some(target) => {
                            self.runtime.add_sudo(player, target)?;
                            render::sudo_added(target)
                        }
                        None => render::sudo_invalid(),
                    }
                };
                replies.push(text);
            }
            Command::Broadcast(message) => match self.runtime.broadcast_targets(player) {
                Ok(_) if message.is_empty() => replies.push(render::broadcast_missing_text()),
                Ok(targets) => {
                    let text = render::broadcast_message(&message);
                    for target in &targets {
                        replies.push_to(*target, text.clone());
                    }
                    replies.push(render::broadcast_sent(targets.len()));
                }
                Err(RuntimeError::Unauthorized { .. }) => replies.push(render::broadcast_denied()),
                Err(err) => return Err(err.into()),
            },
            Command::Unknown(name) => replies.push(render::unknown_command(&name)),
        }

        Ok(())
    }

    async fn handle_guess(&self, event: &ChatEvent, replies: &mut Replies) -> Result<()> {
        let reply = self
            .runtime
            .submit_guess(event.player, &event.display_name, &event.text)
            .await;

        let outcome = match reply {
            Ok(GuessReply::RoundStarted(start)) => {
                replies.push(render::round_started(&start));
                return Ok(());
            }
            Ok(GuessReply::Evaluated(outcome)) => outcome,
            Err(RuntimeError::RoundStartFailed { .. }) => {
                replies.push(render::round_start_failed());
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        match &outcome {
            GuessOutcome::Correct(result) => replies.push(render::correct(result)),
            GuessOutcome::Wrong(result) => replies.push(render::wrong(result)),
            GuessOutcome::Exhausted(result) => replies.push(render::exhausted(result)),
            // The runtime starts a round instead of evaluating while idle.
            GuessOutcome::NoActiveRound => {}
        }

        if outcome.ends_round() {
            self.next_round(event, replies).await?;
        }

        Ok(())
    }

    async fn next_round(&self, event: &ChatEvent, replies: &mut Replies) -> Result<()> {
        match self
            .runtime
            .start_round(event.player, &event.display_name)
            .await
        {
            Ok(start) => replies.push(render::round_started(&start)),
            Err(RuntimeError::RoundStartFailed { .. }) => {
                replies.push(render::round_start_failed())
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }
}

/// Collects replies, defaulting to the sender of the current event.
struct Replies {
    sender: PlayerId,
    items: Vec<Outgoing>,
}

impl Replies {
    fn new(sender: PlayerId) -> Self {
        Self {
            sender,
            items: Vec::new(),
        }
    }

    fn push(&mut self, text: String) {
        self.items.push(Outgoing::new(self.sender, text));
    }

    fn push_to(&mut self, to: PlayerId, text: String) {
        self.items.push(Outgoing::new(to, text));
    }

    fn into_inner(self) -> Vec<Outgoing> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use guess_core::CharacterName;
    use guess_runtime::{CatalogStore, RetryPolicy, RuntimeConfig};

    use super::*;

    const OWNER: PlayerId = PlayerId(1);

    fn bot(names: &[&str]) -> Bot {
        let catalog = CatalogStore::new(
            names
                .iter()
                .map(|name| CharacterName::new(name).unwrap())
                .collect(),
        );
        let runtime = GameRuntime::builder()
            .config(RuntimeConfig {
                retry: RetryPolicy::immediate(1),
                hint_seed: Some(5),
                ..RuntimeConfig::default()
            })
            .catalog(Arc::new(catalog))
            .owner(Some(OWNER))
            .build();
        Bot::new(runtime)
    }

    async fn say(bot: &Bot, player: i64, text: &str) -> Vec<Outgoing> {
        bot.handle(&ChatEvent::new(PlayerId(player), "Tester", text))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_start_greets_and_sends_hint() {
        let bot = bot(&["Kiba Inuzuka"]);
        let replies = say(&bot, 2, "/start").await;

        assert_eq!(replies.len(), 2);
        assert!(replies[0].text.contains("Welcome"));
        assert!(replies[1].text.starts_with("🧩 Guess the anime character"));
        assert!(replies.iter().all(|reply| reply.to == PlayerId(2)));
    }

    #[tokio::test]
    async fn test_correct_guess_chains_next_round() {
        let bot = bot(&["Kiba Inuzuka"]);
        say(&bot, 2, "/start").await;

        let replies = say(&bot, 2, "KIBA inuzuka").await;

        assert_eq!(replies.len(), 2);
        assert!(replies[0].text.contains("**Correct!**"));
        assert!(replies[0].text.contains("Total coins: 100"));
        assert!(replies[1].text.starts_with("🧩"));
    }

    #[tokio::test]
    async fn test_exhausted_round_reveals_answer_and_restarts() {
        let bot = bot(&["Kiba Inuzuka"]);
        say(&bot, 2, "/start").await;

        for _ in 0..4 {
            let replies = say(&bot, 2, "akamaru").await;
            assert!(replies[0].text.contains("Wrong guess"));
        }

        let replies = say(&bot, 2, "akamaru").await;
        assert!(replies[0].text.contains("**kiba inuzuka**"));
        assert!(replies[1].text.starts_with("🧩"));
    }

    #[tokio::test]
    async fn test_text_before_start_begins_round() {
        let bot = bot(&["Kiba Inuzuka"]);
        let replies = say(&bot, 3, "hello").await;

        assert_eq!(replies.len(), 1);
        assert!(replies[0].text.starts_with("🧩"));
    }

    #[tokio::test]
    async fn test_empty_catalog_reports_failure() {
        let bot = bot(&[]);
        let replies = say(&bot, 3, "hello").await;
        assert_eq!(replies[0].text, render::round_start_failed());
    }

    #[tokio::test]
    async fn test_admin_commands() {
        let bot = bot(&["Kiba Inuzuka"]);

        assert_eq!(say(&bot, 2, "/upload Shino").await[0].text, render::upload_denied());
        assert_eq!(say(&bot, 1, "/upload").await[0].text, render::upload_missing_name());
        assert!(say(&bot, 1, "/upload Shino Aburame").await[0]
            .text
            .contains("Shino Aburame"));

        assert_eq!(say(&bot, 2, "/addsudo 2").await[0].text, render::sudo_denied());
        assert_eq!(say(&bot, 1, "/addsudo two").await[0].text, render::sudo_invalid());
        assert_eq!(
            say(&bot, 1, "/addsudo 2").await[0].text,
            render::sudo_added(PlayerId(2))
        );
        assert!(say(&bot, 2, "/upload Hana Inuzuka").await[0]
            .text
            .starts_with("✅"));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_player() {
        let bot = bot(&["Kiba Inuzuka"]);
        say(&bot, 5, "/profile").await;
        say(&bot, 6, "/profile").await;

        assert_eq!(say(&bot, 5, "/broadcast hi").await[0].text, render::broadcast_denied());

        let replies = say(&bot, 1, "/broadcast Exam starts soon").await;
        let recipients: Vec<PlayerId> = replies
            .iter()
            .filter(|reply| reply.text == "📢 Exam starts soon")
            .map(|reply| reply.to)
            .collect();

        assert_eq!(recipients, [PlayerId(5), PlayerId(6)]);
        assert_eq!(replies.last().unwrap().text, render::broadcast_sent(2));
    }

    #[tokio::test]
    async fn test_top_without_players() {
        let bot = bot(&["Kiba Inuzuka"]);
        let replies = say(&bot, 1, "/top").await;
        assert!(replies[0].text.contains("No players yet"));
    }
}
