use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::engine::board::Board;

/// One registry entry: the board plus bookkeeping the engine does not
/// carry.
pub struct GameEntry {
    pub board: Board,
    pub created_at: DateTime<Utc>,
}

impl GameEntry {
    pub fn new() -> Self {
        GameEntry {
            board: Board::new(),
            created_at: Utc::now(),
        }
    }
}

impl Default for GameEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Games stored by short ID. The write lock serialises mutation, so each
/// board sees at most one in-flight move at a time.
pub type GameStore = RwLock<HashMap<String, GameEntry>>;

/// Shared application state passed to all handlers via Axum's State
/// extractor.
pub struct AppState {
    pub games: GameStore,
    pub config: AppConfig,
    pub start_time: std::time::Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(AppState {
            games: RwLock::new(HashMap::new()),
            config,
            start_time: std::time::Instant::now(),
        })
    }
}

/// Length of generated game identifiers.
pub const GAME_ID_LEN: usize = 6;

/// A short random alphanumeric game ID. Callers retry on the (unlikely)
/// collision with an existing entry.
pub fn generate_game_id() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(GAME_ID_LEN)
        .map(char::from)
        .collect()
}
