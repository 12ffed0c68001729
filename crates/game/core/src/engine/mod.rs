//! Round state machine and scoring.
//!
//! [`GameEngine`] is the only code that mutates a [`PlayerSession`]. It
//! borrows the session for a single step, so callers decide how the session
//! is stored and locked. Fetching the next character is also the caller's
//! job: the engine only applies a name it has been handed.
//!
//! ```text
//!            begin_round
//!   Idle ──────────────────▶ Active ──┐ wrong guess (attempts left)
//!    ▲                          │  ◀──┘
//!    └──────────────────────────┘
//!       correct / exhausted
//! ```

mod outcome;

pub use outcome::{CorrectResult, ExhaustedResult, GuessOutcome, RoundStart, WrongResult};

use crate::character::CharacterName;
use crate::config::GameConfig;
use crate::hint::{HintRng, generate_hint};
use crate::session::{ActiveRound, PlayerSession};

/// Applies round transitions to one borrowed session.
pub struct GameEngine<'a> {
    session: &'a mut PlayerSession,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(session: &'a mut PlayerSession, config: &'a GameConfig) -> Self {
        Self { session, config }
    }

    /// Assigns `character` as the new round and returns its hint.
    ///
    /// Any round already in progress is replaced. The hint is derived from
    /// the original-case name; only the lowercase answer is compared later.
    pub fn begin_round<R>(&mut self, character: &CharacterName, rng: &mut R) -> RoundStart
    where
        R: HintRng + ?Sized,
    {
        let hint = generate_hint(character.display(), self.config.mask, rng);

        self.session.attempts_used = 0;
        self.session.active_round = Some(ActiveRound {
            answer: character.answer().to_string(),
            hint: hint.clone(),
        });

        RoundStart {
            hint,
            attempts: self.config.max_attempts,
        }
    }

    /// Evaluates a raw guess against the active round.
    ///
    /// The text is trimmed and lowercased, then compared exactly. Blank text is
    /// an ordinary wrong guess.
    pub fn submit_guess(&mut self, raw: &str) -> GuessOutcome {
        let Some(round) = self.session.active_round.as_ref() else {
            return GuessOutcome::NoActiveRound;
        };

        let guess = raw.trim().to_lowercase();
        let is_correct = guess == round.answer;
        self.session.attempts_used += 1;

        if is_correct {
            return GuessOutcome::Correct(self.award());
        }

        if self.session.attempts_used >= self.config.max_attempts {
            return GuessOutcome::Exhausted(self.exhaust());
        }

        GuessOutcome::Wrong(WrongResult {
            attempts_remaining: self.config.max_attempts - self.session.attempts_used,
        })
    }

    fn award(&mut self) -> CorrectResult {
        let session = &mut *self.session;
        let reward = self.config.correct_reward;

        session.coins += reward;
        session.correct_guesses += 1;
        session.streak += 1;
        session.top_streak = session.top_streak.max(session.streak);
        session.active_round = None;

        CorrectResult {
            coins_awarded: reward,
            total_coins: session.coins,
            streak: session.streak,
        }
    }

    fn exhaust(&mut self) -> ExhaustedResult {
        self.session.streak = 0;
        let round = self.session.active_round.take();

        ExhaustedResult {
            correct_answer: round.map(|round| round.answer).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::session::{PlayerId, RoundPhase};

    fn start(session: &mut PlayerSession, config: &GameConfig, name: &str) -> RoundStart {
        let character = CharacterName::new(name).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        GameEngine::new(session, config).begin_round(&character, &mut rng)
    }

    fn guess(session: &mut PlayerSession, config: &GameConfig, text: &str) -> GuessOutcome {
        GameEngine::new(session, config).submit_guess(text)
    }

    #[test]
    fn test_begin_round_sets_lowercase_answer() {
        let config = GameConfig::default();
        let mut session = PlayerSession::new(PlayerId(1), "Iruka");
        session.attempts_used = 3;

        let start = start(&mut session, &config, "Kakashi Hatake");

        assert_eq!(session.phase(), RoundPhase::Active);
        assert_eq!(session.active_character(), Some("kakashi hatake"));
        assert_eq!(session.attempts_used, 0);
        assert_eq!(start.attempts, 5);
        assert_eq!(start.hint.chars().count(), "Kakashi Hatake".chars().count());
        assert_eq!(session.active_round.as_ref().unwrap().hint, start.hint);
    }

    #[test]
    fn test_guess_while_idle_consumes_nothing() {
        let config = GameConfig::default();
        let mut session = PlayerSession::new(PlayerId(1), "Iruka");

        assert_eq!(guess(&mut session, &config, "naruto"), GuessOutcome::NoActiveRound);
        assert_eq!(session.attempts_used, 0);
        assert!(session.is_idle());
    }

    #[test]
    fn test_correct_guess_scores_and_ends_round() {
        let config = GameConfig::default();
        let mut session = PlayerSession::new(PlayerId(1), "Iruka");
        start(&mut session, &config, "Sasuke Uchiha");

        let outcome = guess(&mut session, &config, "  sasuke UCHIHA\n");

        assert_eq!(
            outcome,
            GuessOutcome::Correct(CorrectResult {
                coins_awarded: 100,
                total_coins: 100,
                streak: 1,
            })
        );
        assert_eq!(session.coins, 100);
        assert_eq!(session.streak, 1);
        assert_eq!(session.top_streak, 1);
        assert_eq!(session.correct_guesses, 1);
        assert!(session.is_idle());
    }

    #[test]
    fn test_fifth_wrong_guess_exhausts() {
        let config = GameConfig::default();
        let mut session = PlayerSession::new(PlayerId(1), "Iruka");
        session.streak = 4;
        session.top_streak = 4;
        start(&mut session, &config, "Sakura Haruno");

        for remaining in (1..=4).rev() {
            assert_eq!(
                guess(&mut session, &config, "hinata"),
                GuessOutcome::Wrong(WrongResult {
                    attempts_remaining: remaining
                })
            );
            assert_eq!(session.streak, 4);
        }

        let outcome = guess(&mut session, &config, "");
        assert_eq!(
            outcome,
            GuessOutcome::Exhausted(ExhaustedResult {
                correct_answer: "sakura haruno".to_string()
            })
        );
        assert_eq!(session.streak, 0);
        assert_eq!(session.top_streak, 4);
        assert!(session.is_idle());

        // A sixth guess has nothing to evaluate.
        assert_eq!(guess(&mut session, &config, "sakura haruno"), GuessOutcome::NoActiveRound);
    }

    #[test]
    fn test_correct_on_last_attempt_wins() {
        let config = GameConfig::default();
        let mut session = PlayerSession::new(PlayerId(1), "Iruka");
        start(&mut session, &config, "Rock Lee");

        for _ in 0..4 {
            guess(&mut session, &config, "guy");
        }

        assert!(matches!(
            guess(&mut session, &config, "rock lee"),
            GuessOutcome::Correct(_)
        ));
    }

    #[test]
    fn test_no_fuzzy_matching() {
        let config = GameConfig::default();
        let mut session = PlayerSession::new(PlayerId(1), "Iruka");
        start(&mut session, &config, "Naruto Uzumaki");

        for attempt in ["naruto", "naruto  uzumaki", "the naruto uzumaki"] {
            assert!(
                matches!(guess(&mut session, &config, attempt), GuessOutcome::Wrong(_)),
                "{attempt} should not match"
            );
        }
    }

    #[test]
    fn test_top_streak_tracks_maximum() {
        let config = GameConfig::default();
        let mut session = PlayerSession::new(PlayerId(1), "Iruka");
        let mut previous_top = 0;

        let script: [(&str, bool); 6] = [
            ("Naruto Uzumaki", true),
            ("Sasuke Uchiha", true),
            ("Sakura Haruno", false),
            ("Kakashi Hatake", true),
            ("Rock Lee", true),
            ("Gaara", true),
        ];

        for (name, win) in script {
            start(&mut session, &config, name);
            if win {
                guess(&mut session, &config, name);
            } else {
                for _ in 0..5 {
                    guess(&mut session, &config, "wrong");
                }
            }
            assert!(session.top_streak >= previous_top);
            assert!(session.top_streak >= session.streak);
            previous_top = session.top_streak;
        }

        assert_eq!(session.streak, 3);
        assert_eq!(session.top_streak, 3);
        assert_eq!(session.coins, 500);
        assert_eq!(session.correct_guesses, 5);
    }
}
