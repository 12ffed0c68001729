//! Inbound chat events and command parsing.

use guess_core::PlayerId;

/// One message received from the chat transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatEvent {
    pub player: PlayerId,
    /// Name of the sender as shown on this event.
    pub display_name: String,
    pub text: String,
}

impl ChatEvent {
    pub fn new(
        player: PlayerId,
        display_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            player,
            display_name: display_name.into(),
            text: text.into(),
        }
    }

    pub fn command(&self) -> Option<Command> {
        Command::parse(&self.text)
    }
}

/// Commands understood by the bot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Profile,
    Top,
    Help,
    /// Character name, possibly empty.
    Upload(String),
    /// `None` when the argument is missing or not an id.
    AddSudo(Option<PlayerId>),
    Broadcast(String),
    Unknown(String),
}

impl Command {
    /// Parses `/name args...`. Returns `None` for plain text.
    ///
    /// A `@botname` suffix on the command word is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let body = text.strip_prefix('/')?;

        let (word, args) = match body.split_once(char::is_whitespace) {
            Some((word, args)) => (word, args.trim()),
            None => (body, ""),
        };
        let name = word.split('@').next().unwrap_or(word).to_lowercase();

        let command = match name.as_str() {
            "start" => Self::Start,
            "profile" => Self::Profile,
            "top" => Self::Top,
            "help" => Self::Help,
            "upload" => Self::Upload(args.to_string()),
            "addsudo" => Self::AddSudo(
                args.split_whitespace()
                    .next()
                    .and_then(|id| id.parse().ok()),
            ),
            "broadcast" => Self::Broadcast(args.to_string()),
            _ => Self::Unknown(name),
        };

        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(Command::parse("naruto uzumaki"), None);
        assert_eq!(ChatEvent::new(PlayerId(1), "A", "  sasuke").command(), None);
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse(" /TOP "), Some(Command::Top));
        assert_eq!(Command::parse("/profile@GuessBot"), Some(Command::Profile));
        assert_eq!(
            Command::parse("/dance"),
            Some(Command::Unknown("dance".to_string()))
        );
    }

    #[test]
    fn test_upload_keeps_full_name() {
        assert_eq!(
            Command::parse("/upload  Minato   Namikaze "),
            Some(Command::Upload("Minato   Namikaze".to_string()))
        );
        assert_eq!(
            Command::parse("/upload"),
            Some(Command::Upload(String::new()))
        );
    }

    #[test]
    fn test_addsudo_argument() {
        assert_eq!(
            Command::parse("/addsudo 4242"),
            Some(Command::AddSudo(Some(PlayerId(4242))))
        );
        assert_eq!(Command::parse("/addsudo bob"), Some(Command::AddSudo(None)));
        assert_eq!(Command::parse("/addsudo"), Some(Command::AddSudo(None)));
    }
}
