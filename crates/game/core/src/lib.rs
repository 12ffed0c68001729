//! Rules of the character guessing game.
//!
//! `guess-core` holds the synchronous parts of the game: validated character
//! names, per-player sessions, hint masking, the round state machine and the
//! coin leaderboard. It performs no I/O and owns no randomness; the runtime
//! crate supplies both.
pub mod character;
pub mod config;
pub mod engine;
pub mod hint;
pub mod leaderboard;
pub mod session;

pub use character::{CharacterName, CharacterNameError};
pub use config::GameConfig;
pub use engine::{
    CorrectResult, ExhaustedResult, GameEngine, GuessOutcome, RoundStart, WrongResult,
};
pub use hint::{HintRng, generate_hint};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use session::{ActiveRound, PlayerId, PlayerSession, RoundPhase};
