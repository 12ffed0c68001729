//! Bot configuration structures and loaders.
use std::env;
use std::time::Duration;

use guess_core::{GameConfig, PlayerId};
use guess_runtime::providers::remote::{DEFAULT_CATALOG_URL, DEFAULT_REQUEST_TIMEOUT};
use guess_runtime::{DEFAULT_CHARACTERS, RetryPolicy, RuntimeConfig};

/// Everything needed to assemble the game and run an adapter.
#[derive(Clone, Debug)]
pub struct BotConfig {
    /// Player allowed to run every admin command.
    pub owner_id: Option<PlayerId>,
    pub catalog: CatalogConfig,
    pub retry: RetryPolicy,
    pub leaderboard_size: usize,
    pub hint_seed: Option<u64>,
    pub console: ConsoleConfig,
    /// Subdirectory name for this run's log file.
    pub log_session_id: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            owner_id: None,
            catalog: CatalogConfig::default(),
            retry: RetryPolicy::default(),
            leaderboard_size: GameConfig::DEFAULT_LEADERBOARD_SIZE,
            hint_seed: None,
            console: ConsoleConfig::default(),
            log_session_id: None,
        }
    }
}

impl BotConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `OWNER_ID` - Owner chat id (default: none, admin commands disabled)
    /// - `CHARACTER_SOURCE` - `static` or `remote` (default: static)
    /// - `CHARACTERS` - Comma-separated initial catalog (default: built-in list)
    /// - `CATALOG_URL` - Remote catalog endpoint
    /// - `CATALOG_PAGES` - Pages to sample from the remote catalog (default: 50)
    /// - `CATALOG_TIMEOUT_MS` - Bound on one remote catalog request (default: 10000)
    /// - `FETCH_MAX_ATTEMPTS` - Fetch attempts per round start (default: 5)
    /// - `FETCH_BACKOFF_MS` - First retry delay (default: 250)
    /// - `FETCH_MAX_BACKOFF_MS` - Retry delay cap (default: 5000)
    /// - `LEADERBOARD_SIZE` - Players shown by /top (default: 10)
    /// - `HINT_SEED` - Fixed hint seed for reproducible runs
    /// - `CONSOLE_PLAYER_ID` / `CONSOLE_PLAYER_NAME` - Initial console identity
    /// - `LOG_SESSION_ID` - Log subdirectory (default: timestamp)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    ///
    /// Values that fail to parse are logged and replaced by their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.owner_id = parse_value("OWNER_ID", read("OWNER_ID"));

        if let Some(source) = read("CHARACTER_SOURCE") {
            match CharacterSource::parse(&source) {
                Some(source) => config.catalog.source = source,
                None => tracing::warn!(
                    "Unknown CHARACTER_SOURCE {:?}, using {}",
                    source,
                    config.catalog.source.as_str()
                ),
            }
        }

        if let Some(list) = read("CHARACTERS") {
            config.catalog.characters = parse_list(&list);
        }
        if let Some(url) = read("CATALOG_URL") {
            config.catalog.url = url.trim().to_string();
        }
        if let Some(pages) = parse_value::<u32>("CATALOG_PAGES", read("CATALOG_PAGES")) {
            config.catalog.pages = pages.max(1);
        }
        if let Some(ms) = parse_value::<u64>("CATALOG_TIMEOUT_MS", read("CATALOG_TIMEOUT_MS")) {
            config.catalog.request_timeout = Duration::from_millis(ms.max(1));
        }

        let attempts = parse_value::<u32>("FETCH_MAX_ATTEMPTS", read("FETCH_MAX_ATTEMPTS"))
            .unwrap_or(RetryPolicy::DEFAULT_MAX_ATTEMPTS);
        let backoff = parse_value::<u64>("FETCH_BACKOFF_MS", read("FETCH_BACKOFF_MS"))
            .map(Duration::from_millis)
            .unwrap_or(RetryPolicy::DEFAULT_INITIAL_BACKOFF);
        let max_backoff =
            parse_value::<u64>("FETCH_MAX_BACKOFF_MS", read("FETCH_MAX_BACKOFF_MS"))
                .map(Duration::from_millis)
                .unwrap_or(RetryPolicy::DEFAULT_MAX_BACKOFF);
        config.retry = RetryPolicy::new(attempts, backoff, max_backoff);

        if let Some(size) = parse_value::<usize>("LEADERBOARD_SIZE", read("LEADERBOARD_SIZE")) {
            config.leaderboard_size = size.max(1);
        }
        config.hint_seed = parse_value("HINT_SEED", read("HINT_SEED"));

        if let Some(id) = parse_value("CONSOLE_PLAYER_ID", read("CONSOLE_PLAYER_ID")) {
            config.console.player_id = id;
        }
        if let Some(name) = read("CONSOLE_PLAYER_NAME") {
            config.console.player_name = name.trim().to_string();
        }

        config.log_session_id = read("LOG_SESSION_ID");

        config
    }

    /// Runtime settings derived from this configuration.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            game: GameConfig::default().with_leaderboard_size(self.leaderboard_size),
            retry: self.retry.clone(),
            hint_seed: self.hint_seed,
        }
    }
}

/// Where round characters come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharacterSource {
    /// In-memory catalog, extendable with /upload.
    Static,
    /// Remote HTTP catalog.
    Remote,
}

impl CharacterSource {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "static" | "list" => Some(Self::Static),
            "remote" | "http" => Some(Self::Remote),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Remote => "remote",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub source: CharacterSource,
    /// Initial catalog for the static source.
    pub characters: Vec<String>,
    pub url: String,
    pub pages: u32,
    /// Bound on one remote request, connect included.
    pub request_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CharacterSource::Static,
            characters: DEFAULT_CHARACTERS.iter().map(|s| s.to_string()).collect(),
            url: DEFAULT_CATALOG_URL.to_string(),
            pages: 50,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Identity used by the console adapter until `/as` switches it.
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub player_id: PlayerId,
    pub player_name: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            player_id: PlayerId(1),
            player_name: "Player".to_string(),
        }
    }
}

/// Parses an optional variable, warning when a value is present but invalid.
fn parse_value<T>(key: &str, value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = value?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring invalid {} value {:?}, using default", key, value);
            None
        }
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
