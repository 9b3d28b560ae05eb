//! Persistent game history.
//!
//! Three kinds of persistent ledger entries hold the history:
//! - `Games`        → `Map<u64, GameRecord>`, key-ordered game summaries.
//! - `Journal(id)`  → `Vec<HistoryEntry>`, the log lines of one game.
//! - `Journals`     → `Vec<u64>`, ids owning a journal, oldest first.
//!
//! Every game id in `Games` also owns a journal. A journal can outlive its
//! record when history is cleared while a round keeps playing.
//!
//! `Journals` holds at most `MAX_GAMES` ids. Starting a journal beyond that
//! evicts the oldest game together with its record, so every call touches
//! a bounded number of ledger entries. A journal holds at most
//! `MAX_TRIES + 1` entries (the start line plus one per guess).
//!
//! Ids come from counters in instance storage that are never reset, so
//! they are unique across `clear_all` and key order is creation order.

use core::fmt::Write;

use soroban_sdk::{contracttype, Env, Map, String, Vec};

use crate::text::{self, TextBuf};
use crate::{instance_set, persist_set, DataKey, Error, MAX_ENTRY_BODY_LEN, MAX_GAMES};

/// Lifecycle state of a recorded game.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameStatus {
    Active = 0,
    Ended = 1,
}

/// Summary of one game session.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameRecord {
    pub id: u64,
    pub status: GameStatus,
    /// Ledger timestamp (seconds) when the game started.
    pub started_at: u64,
    pub formatted_started_at: String,
}

/// One free-text log line tied to a game.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    pub id: u64,
    pub game_id: u64,
    pub body: String,
    pub timestamp: u64,
    pub formatted_timestamp: String,
}

/// Reserve the next id from the counter under `key`.
fn allocate(env: &Env, key: DataKey) -> Result<u64, Error> {
    let id: u64 = env.storage().instance().get(&key).unwrap_or(0);
    let next = id.checked_add(1).ok_or(Error::Overflow)?;
    instance_set(env, key, &next);
    Ok(id)
}

fn load_games(env: &Env) -> Map<u64, GameRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::Games)
        .unwrap_or_else(|| Map::new(env))
}

fn load_journals(env: &Env) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::Journals)
        .unwrap_or_else(|| Vec::new(env))
}

fn load_journal(env: &Env, game_id: u64) -> Vec<HistoryEntry> {
    env.storage()
        .persistent()
        .get(&DataKey::Journal(game_id))
        .unwrap_or_else(|| Vec::new(env))
}

/// Register `game_id` as owning a journal, evicting the oldest games while
/// the index is full.
fn track_journal(env: &Env, game_id: u64) {
    let mut journals = load_journals(env);
    if journals.contains(game_id) {
        return;
    }

    let mut games = load_games(env);
    let mut evicted = false;
    while journals.len() >= MAX_GAMES {
        let Some(oldest) = journals.pop_front() else {
            break;
        };
        env.storage().persistent().remove(&DataKey::Journal(oldest));
        evicted |= games.remove(oldest).is_some();
    }
    if evicted {
        persist_set(env, DataKey::Games, &games);
    }

    journals.push_back(game_id);
    persist_set(env, DataKey::Journals, &journals);
}

/// Create a new active game record plus its "started" entry.
///
/// Returns the new game id.
pub fn record_game_start(env: &Env, word_length: u32, tries: u32) -> Result<u64, Error> {
    let started_at = env.ledger().timestamp();
    let game_id = allocate(env, DataKey::GamesNext)?;

    let mut body = TextBuf::<MAX_ENTRY_BODY_LEN>::new();
    write!(
        body,
        "Game was started, word length: {}, tries: {}",
        word_length, tries
    )
    .map_err(|_| Error::EntryTooLarge)?;

    track_journal(env, game_id);

    let mut games = load_games(env);
    games.set(
        game_id,
        GameRecord {
            id: game_id,
            status: GameStatus::Active,
            started_at,
            formatted_started_at: format_timestamp(env, started_at),
        },
    );
    persist_set(env, DataKey::Games, &games);

    record_event(env, game_id, &body.finish(env))?;
    Ok(game_id)
}

/// Append a history entry for `game_id`.
pub fn record_event(env: &Env, game_id: u64, body: &String) -> Result<u64, Error> {
    if body.len() as usize > MAX_ENTRY_BODY_LEN {
        return Err(Error::EntryTooLarge);
    }

    let timestamp = env.ledger().timestamp();
    let id = allocate(env, DataKey::EntriesNext)?;
    track_journal(env, game_id);

    let mut journal = load_journal(env, game_id);
    journal.push_back(HistoryEntry {
        id,
        game_id,
        body: body.clone(),
        timestamp,
        formatted_timestamp: format_timestamp(env, timestamp),
    });
    persist_set(env, DataKey::Journal(game_id), &journal);
    Ok(id)
}

/// Flip a game record to `Ended`. Absent records are left alone.
pub fn mark_ended(env: &Env, game_id: u64) {
    let mut games = load_games(env);
    if let Some(mut game) = games.get(game_id) {
        game.status = GameStatus::Ended;
        games.set(game_id, game);
        persist_set(env, DataKey::Games, &games);
    }
}

pub fn get_game(env: &Env, game_id: u64) -> Option<GameRecord> {
    load_games(env).get(game_id)
}

/// All recorded games in key order.
pub fn list_games(env: &Env) -> Vec<GameRecord> {
    load_games(env).values()
}

/// Entries linked to `game_id`, oldest first; empty for unknown ids.
pub fn list_entries_for_game(env: &Env, game_id: u64) -> Vec<HistoryEntry> {
    load_journal(env, game_id)
}

/// Delete every game record and journal. Returns
/// `(games_removed, entries_removed)`.
pub fn clear_all(env: &Env) -> (u64, u64) {
    let games_removed = u64::from(load_games(env).len());
    let mut entries_removed = 0u64;
    for game_id in load_journals(env).iter() {
        let key = DataKey::Journal(game_id);
        if let Some(journal) = env.storage().persistent().get::<_, Vec<HistoryEntry>>(&key) {
            entries_removed += u64::from(journal.len());
            env.storage().persistent().remove(&key);
        }
    }
    env.storage().persistent().remove(&DataKey::Games);
    env.storage().persistent().remove(&DataKey::Journals);
    (games_removed, entries_removed)
}

fn format_timestamp(env: &Env, seconds: u64) -> String {
    let mut out = TextBuf::<48>::new();
    let written = text::write_timestamp(&mut out, seconds);
    debug_assert!(written.is_ok(), "timestamp exceeds its buffer");
    out.finish(env)
}
