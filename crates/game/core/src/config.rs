/// Game constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Guesses allowed per round. The round ends on the last failed attempt.
    pub max_attempts: u32,
    /// Coins awarded for a correct guess.
    pub correct_reward: u64,
    /// Number of entries shown on the leaderboard.
    pub leaderboard_size: usize,
    /// Character used to conceal letters in hints.
    pub mask: char,
}

impl GameConfig {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
    pub const DEFAULT_CORRECT_REWARD: u64 = 100;
    pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;
    pub const DEFAULT_MASK: char = '_';

    pub const fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            correct_reward: Self::DEFAULT_CORRECT_REWARD,
            leaderboard_size: Self::DEFAULT_LEADERBOARD_SIZE,
            mask: Self::DEFAULT_MASK,
        }
    }

    pub fn with_leaderboard_size(mut self, leaderboard_size: usize) -> Self {
        self.leaderboard_size = leaderboard_size;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
