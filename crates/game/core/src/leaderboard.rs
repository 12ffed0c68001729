//! Coin ranking across sessions.

use crate::session::PlayerSession;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub display_name: String,
    pub coins: u64,
}

/// Ranked view over the known players.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Leaderboard {
    /// Nobody has played yet.
    NoPlayers,
    Ranked(Vec<LeaderboardEntry>),
}

impl Leaderboard {
    /// Ranks `sessions` by coins, highest first, keeping at most `limit`.
    ///
    /// The sort is stable: players with equal coins keep the order in which
    /// `sessions` yields them.
    pub fn rank<'s, I>(sessions: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = &'s PlayerSession>,
    {
        let mut players: Vec<&PlayerSession> = sessions.into_iter().collect();
        if players.is_empty() {
            return Self::NoPlayers;
        }

        players.sort_by(|a, b| b.coins.cmp(&a.coins));

        let entries = players
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, session)| LeaderboardEntry {
                rank: index + 1,
                display_name: session.display_name.clone(),
                coins: session.coins,
            })
            .collect();

        Self::Ranked(entries)
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        match self {
            Self::NoPlayers => &[],
            Self::Ranked(entries) => entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoPlayers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PlayerId;

    fn player(id: i64, name: &str, coins: u64) -> PlayerSession {
        let mut session = PlayerSession::new(PlayerId(id), name);
        session.coins = coins;
        session
    }

    #[test]
    fn test_empty_signals_no_players() {
        let board = Leaderboard::rank(std::iter::empty(), 10);
        assert_eq!(board, Leaderboard::NoPlayers);
        assert!(board.entries().is_empty());
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let sessions = vec![
            player(1, "Shikamaru", 200),
            player(2, "Choji", 500),
            player(3, "Ino", 200),
            player(4, "Neji", 0),
        ];

        let board = Leaderboard::rank(&sessions, 10);
        let names: Vec<&str> = board
            .entries()
            .iter()
            .map(|entry| entry.display_name.as_str())
            .collect();

        assert_eq!(names, ["Choji", "Shikamaru", "Ino", "Neji"]);
        assert_eq!(board.entries()[0].rank, 1);
        assert_eq!(board.entries()[3].rank, 4);
    }

    #[test]
    fn test_truncates_to_limit() {
        let sessions: Vec<PlayerSession> = (0..25)
            .map(|i| player(i, &format!("player{i}"), (i as u64) * 100))
            .collect();

        let board = Leaderboard::rank(&sessions, 10);

        assert_eq!(board.entries().len(), 10);
        assert_eq!(board.entries()[0].coins, 2400);
        assert!(
            board
                .entries()
                .windows(2)
                .all(|pair| pair[0].coins >= pair[1].coins)
        );
    }

    #[test]
    fn test_fewer_players_than_limit() {
        let sessions = vec![player(1, "Tenten", 100)];
        assert_eq!(Leaderboard::rank(&sessions, 10).entries().len(), 1);
    }
}
