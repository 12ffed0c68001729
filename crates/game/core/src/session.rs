//! Per-player session state.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Stable identity of a player (the chat id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// The round currently being played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveRound {
    /// Lowercase canonical answer.
    pub answer: String,
    /// Masked name shown to the player when the round started.
    pub hint: String,
}

/// Everything tracked about one player.
///
/// Invariants maintained by [`crate::GameEngine`]:
/// - `attempts_used < max_attempts` while a round is active
/// - `top_streak >= streak`
/// - `coins` never decreases
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSession {
    pub id: PlayerId,
    /// Name captured when the session was created.
    pub display_name: String,
    pub coins: u64,
    pub streak: u32,
    pub top_streak: u32,
    pub correct_guesses: u64,
    pub attempts_used: u32,
    pub active_round: Option<ActiveRound>,
}

impl PlayerSession {
    pub fn new(id: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            coins: 0,
            streak: 0,
            top_streak: 0,
            correct_guesses: 0,
            attempts_used: 0,
            active_round: None,
        }
    }

    /// Lowercase answer of the round in progress, if any.
    pub fn active_character(&self) -> Option<&str> {
        self.active_round.as_ref().map(|round| round.answer.as_str())
    }

    pub fn phase(&self) -> RoundPhase {
        if self.active_round.is_some() {
            RoundPhase::Active
        } else {
            RoundPhase::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == RoundPhase::Idle
    }
}

/// The two states of a session's round state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    Idle,
    Active,
}

impl RoundPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
