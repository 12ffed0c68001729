//! Results returned by [`super::GameEngine`] transitions.

/// Emitted when a round begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundStart {
    pub hint: String,
    /// Attempts available for this round.
    pub attempts: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorrectResult {
    pub coins_awarded: u64,
    pub total_coins: u64,
    pub streak: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrongResult {
    pub attempts_remaining: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExhaustedResult {
    pub correct_answer: String,
}

/// Outcome of evaluating one guess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The session was idle; nothing was evaluated and no attempt consumed.
    NoActiveRound,
    /// Round won; the session is idle again.
    Correct(CorrectResult),
    /// Round still running.
    Wrong(WrongResult),
    /// Last attempt failed; the session is idle again and the streak is reset.
    Exhausted(ExhaustedResult),
}

impl GuessOutcome {
    /// True when this guess closed the round.
    pub fn ends_round(&self) -> bool {
        matches!(self, Self::Correct(_) | Self::Exhausted(_))
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoActiveRound => "no_active_round",
            Self::Correct(_) => "correct",
            Self::Wrong(_) => "wrong",
            Self::Exhausted(_) => "exhausted",
        }
    }
}
