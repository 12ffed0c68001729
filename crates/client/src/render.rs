//! Reply texts with light `**bold**` markup for the chat transport.

use guess_core::{CorrectResult, ExhaustedResult, Leaderboard, PlayerId, RoundStart, WrongResult};
use guess_runtime::ProfileView;

pub fn welcome(attempts: u32) -> String {
    format!(
        "👋 Welcome to **Naruto Guess Bot**! 🎮\n\
         ✨ I will send anime characters for you to guess. 🎉\n\
         🔥 You have {attempts} attempts per character. Start guessing! 🧐\n\
         🍀 Test your knowledge of the Naruto universe and aim for the top streak!"
    )
}

pub fn round_started(start: &RoundStart) -> String {
    format!("🧩 Guess the anime character: **{}**", start.hint)
}

pub fn correct(result: &CorrectResult) -> String {
    format!(
        "🎉 **Correct!** You earned 💰 {} coins! 🎊\n\
         📈 Total coins: {}\n\
         🔥 Streak: {} 🔥",
        result.coins_awarded, result.total_coins, result.streak
    )
}

pub fn wrong(result: &WrongResult) -> String {
    format!(
        "❌ Wrong guess! 😅\n⚡ Try again! Attempts left: {}.",
        result.attempts_remaining
    )
}

pub fn exhausted(result: &ExhaustedResult) -> String {
    format!(
        "❌ Out of attempts! 😔\n\
         The correct answer was: **{}**. 🤓\n\
         Let's try a new character! 🆕",
        result.correct_answer
    )
}

pub fn round_start_failed() -> String {
    "⚠️ I couldn't fetch a character right now. Send /start to try again.".to_string()
}

pub fn profile(view: &ProfileView) -> String {
    format!(
        "🧑 **Profile**:\n\
         📛 Name: {}\n\
         💰 Coins: {}\n\
         ✅ Correct Guesses: {}\n\
         🔥 Current Streak: {}\n\
         🌟 Top Streak: {}",
        view.display_name, view.coins, view.correct_guesses, view.streak, view.top_streak
    )
}

pub fn leaderboard(board: &Leaderboard) -> String {
    match board {
        Leaderboard::NoPlayers => "⚠️ No players yet! Be the first to play! 🎮".to_string(),
        Leaderboard::Ranked(entries) => {
            let lines: Vec<String> = entries
                .iter()
                .map(|entry| {
                    format!(
                        "{}. 🥇 {}: 💰 {} coins",
                        entry.rank, entry.display_name, entry.coins
                    )
                })
                .collect();
            format!("🏆 **Top Players**:\n{}", lines.join("\n"))
        }
    }
}

pub fn upload_denied() -> String {
    "🚫 You do not have permission to upload character names.".to_string()
}

pub fn upload_missing_name() -> String {
    "⚠️ Please provide a character name to upload.".to_string()
}

pub fn upload_unavailable() -> String {
    "⚠️ Characters come from a remote catalog; uploads are disabled.".to_string()
}

pub fn uploaded(name: &str) -> String {
    format!("✅ Character '{name}' has been added successfully!")
}

pub fn sudo_denied() -> String {
    "🚫 Only the owner can add sudo users.".to_string()
}

pub fn sudo_invalid() -> String {
    "⚠️ Please provide a valid user ID to add as sudo.".to_string()
}

pub fn sudo_added(target: PlayerId) -> String {
    format!("✅ User ID {target} has been added as a sudo user!")
}

pub fn broadcast_denied() -> String {
    "🚫 You do not have permission to broadcast.".to_string()
}

pub fn broadcast_missing_text() -> String {
    "⚠️ Please provide a message to broadcast.".to_string()
}

pub fn broadcast_message(text: &str) -> String {
    format!("📢 {text}")
}

pub fn broadcast_sent(recipients: usize) -> String {
    format!("✅ Broadcast sent to {recipients} player(s).")
}

pub fn unknown_command(name: &str) -> String {
    format!("🤔 Unknown command /{name}. Send /help for the list.")
}

pub fn help() -> String {
    "📖 **Commands**:\n\
     /start - start playing\n\
     /profile - your coins and streaks\n\
     /top - leaderboard\n\
     /upload <name> - add a character (admins)\n\
     /addsudo <id> - grant admin rights (owner)\n\
     /broadcast <text> - message every player (admins)\n\
     Anything else is a guess."
        .to_string()
}

pub fn internal_error() -> String {
    "⚠️ Something went wrong. Please try again.".to_string()
}
