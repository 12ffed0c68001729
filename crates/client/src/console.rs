//! Line-based console transport.
//!
//! Every stdin line is a chat message from the current console identity.
//! `/as <id> <name...>` switches identity so several players can be
//! simulated from one terminal; `/quit` exits.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use client_bootstrap::ConsoleConfig;
use guess_core::PlayerId;

use crate::{Bot, ChatEvent, Outgoing};

/// Console identity switch, handled before the bot sees the line.
#[derive(Debug, PartialEq, Eq)]
enum ConsoleDirective {
    SwitchIdentity { player: PlayerId, name: Option<String> },
    Quit,
}

fn parse_directive(line: &str) -> Option<ConsoleDirective> {
    let line = line.trim();
    if line == "/quit" || line == "/exit" {
        return Some(ConsoleDirective::Quit);
    }

    let args = line.strip_prefix("/as ")?;
    let mut parts = args.trim().splitn(2, char::is_whitespace);
    let player = parts.next()?.parse().ok()?;
    let name = parts
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    Some(ConsoleDirective::SwitchIdentity { player, name })
}

/// Drives a [`Bot`] from stdin and prints replies to stdout.
pub struct Console {
    bot: Bot,
    player: PlayerId,
    name: String,
}

impl Console {
    pub fn new(bot: Bot, config: &ConsoleConfig) -> Self {
        Self {
            bot,
            player: config.player_id,
            name: config.player_name.clone(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        self.print(
            &mut stdout,
            &format!(
                "Playing as {} ({}). Send /start to begin, /as <id> <name> to switch player, /quit to exit.",
                self.name, self.player
            ),
        )
        .await?;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match parse_directive(line) {
                Some(ConsoleDirective::Quit) => break,
                Some(ConsoleDirective::SwitchIdentity { player, name }) => {
                    self.player = player;
                    if let Some(name) = name {
                        self.name = name;
                    }
                    tracing::debug!(
                        player = %self.player,
                        name = %self.name,
                        "console identity switched"
                    );
                    let note = format!("Now playing as {} ({}).", self.name, self.player);
                    self.print(&mut stdout, &note).await?;
                    continue;
                }
                None => {}
            }

            let event = ChatEvent::new(self.player, self.name.clone(), line);
            match self.bot.handle(&event).await {
                Ok(replies) => {
                    for reply in replies {
                        let text = self.format_reply(&reply);
                        self.print(&mut stdout, &text).await?;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to handle message: {:#}", e);
                    self.print(&mut stdout, &crate::render::internal_error()).await?;
                }
            }
        }

        Ok(())
    }

    fn format_reply(&self, reply: &Outgoing) -> String {
        if reply.to == self.player {
            reply.text.clone()
        } else {
            format!("[to {}] {}", reply.to, reply.text)
        }
    }

    async fn print(&self, stdout: &mut tokio::io::Stdout, text: &str) -> Result<()> {
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}
