//! Stellarcade Word Guess Contract
//!
//! A single-session word-guessing game. A caller starts a game with a word
//! length and a number of tries, then submits guesses until the word is
//! found or the tries run out. Every lifecycle event is appended to a
//! persistent history that can be listed per game and cleared in bulk.
//!
//! ## Game Flow
//! 1. Call `rules` to learn the word lengths this deployment can serve.
//! 2. Call `start(word_length, tries)`; a secret word is drawn at random.
//! 3. Call `guess(word)` repeatedly. Each call returns the guess and its
//!    feedback, and ends the game on a win or when tries reach zero.
//! 4. Read `games_history_list`, `specific_game_history` or
//!    `current_game_history` at any time; `remove_history` wipes all of it.
//!
//! ## Guess Scoring
//! Each character in a guess is scored per position:
//! - `+`: right letter, right position.
//! - `*`: letter occurs somewhere in the secret.
//! - `-`: letter not in the secret at all.
//!
//! `*` is a plain containment test and does not consume secret letters,
//! see [`scoring`].
//!
//! ## Storage Strategy
//! - `instance()` storage: the word list installed at deployment, the one
//!   shared `Session`, and the history id counters.
//! - `persistent()` storage: a key-ordered map of `GameRecord`s, one journal
//!   of `HistoryEntry`s per game, and the index of journals. TTLs are
//!   extended on every write (~30 days). At most `MAX_GAMES` games are
//!   kept, so every call touches a bounded number of ledger entries.
//!
//! ## Errors
//! Failures are returned as [`Error`] codes and roll back the invocation.
//! `describe_error` renders a code as the player-facing message.
#![no_std]
#![allow(unexpected_cfgs)]

use core::fmt::Write;

use soroban_sdk::{
    contract, contracterror, contractevent, contractimpl, contracttype, panic_with_error, Env,
    IntoVal, String, Val, Vec,
};

pub mod dictionary;
pub mod history;
pub mod scoring;
pub mod session;
pub mod text;

use dictionary::{read_word, Dictionary};
use history::{GameRecord, HistoryEntry};
use session::{ActiveRound, GameState, Session};
use text::TextBuf;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest word a dictionary may hold, in bytes.
pub const MAX_WORD_LEN: usize = 16;

/// Largest word list accepted at deployment.
pub const MAX_WORD_LIST_LEN: u32 = 512;

/// Largest history entry body, in bytes.
pub const MAX_ENTRY_BODY_LEN: usize = 1_000;

/// Most tries a game may start with; bounds the size of one game's journal.
pub const MAX_TRIES: u32 = 100;

/// Most games whose history is kept. Starting one more evicts the oldest,
/// which keeps `remove_history` within a single transaction's write budget.
pub const MAX_GAMES: u32 = 40;

/// Persistent storage TTL (~30 days at 5 s/ledger).
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

/// Instance storage TTL, kept in step with the history it indexes.
pub const INSTANCE_BUMP_LEDGERS: u32 = 518_400;

const NOT_STARTED_TEXT: &str = "Game is not started.";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    WordLengthOutOfRange = 1,
    InvalidTriesCount = 2,
    WordUnavailable = 3,
    NotStarted = 4,
    NoTriesLeft = 5,
    GuessLengthMismatch = 6,
    InvalidGuess = 7,
    EntryTooLarge = 8,
    InvalidWordList = 9,
    Overflow = 10,
}

impl Error {
    pub fn from_code(code: u32) -> Option<Self> {
        let err = match code {
            1 => Error::WordLengthOutOfRange,
            2 => Error::InvalidTriesCount,
            3 => Error::WordUnavailable,
            4 => Error::NotStarted,
            5 => Error::NoTriesLeft,
            6 => Error::GuessLengthMismatch,
            7 => Error::InvalidGuess,
            8 => Error::EntryTooLarge,
            9 => Error::InvalidWordList,
            10 => Error::Overflow,
            _ => return None,
        };
        Some(err)
    }
}

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

/// Storage key discriminants.
///
/// Instance keys hold deployment config, the shared session and the
/// history id counters. Persistent keys hold the game records and one
/// journal per game.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // --- instance() keys ---
    /// Vec<String> installed by the constructor; absent means built-in words.
    WordList,
    Session,
    GamesNext,
    EntriesNext,
    // --- persistent() keys ---
    /// Map<u64, GameRecord> of every kept game.
    Games,
    /// Vec<u64> of game ids owning a journal, oldest first.
    Journals,
    /// Vec<HistoryEntry> of one game.
    Journal(u64),
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[contractevent]
pub struct GameStarted {
    #[topic]
    pub game_id: u64,
    pub word_length: u32,
    pub tries: u32,
}

#[contractevent]
pub struct GuessSubmitted {
    #[topic]
    pub game_id: u64,
    pub tries_left: u32,
    pub solved: bool,
}

#[contractevent]
pub struct GameEnded {
    #[topic]
    pub game_id: u64,
    pub won: bool,
}

#[contractevent]
pub struct HistoryCleared {
    pub games_removed: u64,
    pub entries_removed: u64,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct WordGuess;

#[contractimpl]
impl WordGuess {
    /// Install the word list for this deployment.
    ///
    /// An empty `words` selects the built-in dictionary. Otherwise every
    /// word must be lowercase ASCII of 1 to `MAX_WORD_LEN` letters, and the
    /// list may hold at most `MAX_WORD_LIST_LEN` words.
    pub fn __constructor(env: Env, words: Vec<String>) {
        if words.is_empty() {
            return;
        }
        if let Err(err) = dictionary::validate_word_list(&words) {
            panic_with_error!(&env, err);
        }
        instance_set(&env, DataKey::WordList, &words);
    }

    // -----------------------------------------------------------------------
    // rules / tries_left
    // -----------------------------------------------------------------------

    /// Allowed word-length range plus usage instructions.
    pub fn rules(env: Env) -> String {
        let bounds = Dictionary::load(&env).bounds();
        text::short(
            &env,
            format_args!(
                "Select length of word from {} to {}\n\
                 Execute start function with needed word length and tries count",
                bounds.min, bounds.max
            ),
        )
    }

    /// Remaining tries as text, or a notice when no round is active.
    pub fn tries_left(env: Env) -> String {
        match Session::load(&env).state {
            GameState::Active(round) => text::short(&env, format_args!("{}", round.tries_left)),
            GameState::Inactive => String::from_str(&env, NOT_STARTED_TEXT),
        }
    }

    // -----------------------------------------------------------------------
    // start
    // -----------------------------------------------------------------------

    /// Start a new game with a random word of `word_length` letters.
    ///
    /// Any round in progress is replaced. Its game record is not marked
    /// ended and keeps its `Active` status.
    ///
    /// Emits `GameStarted`.
    pub fn start(env: Env, word_length: u32, tries: u32) -> Result<String, Error> {
        let dictionary = Dictionary::load(&env);
        if !dictionary.bounds().contains(word_length) {
            return Err(Error::WordLengthOutOfRange);
        }
        if tries == 0 || tries > MAX_TRIES {
            return Err(Error::InvalidTriesCount);
        }
        let secret = dictionary.pick(&env, word_length)?;

        let mut session = Session::load(&env);
        session.current_game = None;
        let game_id = history::record_game_start(&env, word_length, tries)?;
        session.state = GameState::Active(ActiveRound {
            secret,
            tries_left: tries,
        });
        session.current_game = Some(game_id);
        session.save(&env);

        GameStarted {
            game_id,
            word_length,
            tries,
        }
        .publish(&env);

        let plural = if tries == 1 { "try" } else { "tries" };
        Ok(text::short(
            &env,
            format_args!(
                "Word with length {} was generated, you have {} {}, execute guess method next.",
                word_length, tries, plural
            ),
        ))
    }

    // -----------------------------------------------------------------------
    // guess
    // -----------------------------------------------------------------------

    /// Score a guess against the secret word.
    ///
    /// Returns the guess in spaced capitals, the spaced feedback symbols,
    /// and on the final guess the outcome. The same text is appended to the
    /// current game's history.
    ///
    /// Emits `GuessSubmitted`, and `GameEnded` when the game finishes.
    pub fn guess(env: Env, word: String) -> Result<String, Error> {
        let mut session = Session::load(&env);
        let GameState::Active(mut round) = session.state.clone() else {
            return Err(Error::NotStarted);
        };
        if round.tries_left == 0 {
            return Err(Error::NoTriesLeft);
        }
        let game_id = session.current_game.ok_or(Error::NotStarted)?;

        let mut secret_buf = [0u8; MAX_WORD_LEN];
        let secret = read_word(&round.secret, &mut secret_buf).ok_or(Error::WordUnavailable)?;
        let mut guess_buf = [0u8; MAX_WORD_LEN];
        let guess = read_word(&word, &mut guess_buf).ok_or(Error::GuessLengthMismatch)?;
        if !guess.is_ascii() {
            return Err(Error::InvalidGuess);
        }
        let feedback = scoring::score_guess(secret, guess)?;

        round.tries_left = round.tries_left.checked_sub(1).ok_or(Error::NoTriesLeft)?;
        let tries_left = round.tries_left;
        let solved = guess == secret;

        let mut body = TextBuf::<MAX_ENTRY_BODY_LEN>::new();
        write_report(&mut body, guess, feedback.marks()).map_err(|_| Error::EntryTooLarge)?;

        let finished = if solved {
            body.write_str("You won.").map_err(|_| Error::EntryTooLarge)?;
            true
        } else if tries_left == 0 {
            write!(
                body,
                "You lost, generated word was \"{}\".",
                core::str::from_utf8(secret).unwrap_or_default()
            )
            .map_err(|_| Error::EntryTooLarge)?;
            true
        } else {
            false
        };

        if finished {
            session.end_game(&env);
        } else {
            session.state = GameState::Active(round);
        }

        let report = body.finish(&env);
        history::record_event(&env, game_id, &report)?;
        session.save(&env);

        GuessSubmitted {
            game_id,
            tries_left,
            solved,
        }
        .publish(&env);
        if finished {
            GameEnded {
                game_id,
                won: solved,
            }
            .publish(&env);
        }

        Ok(report)
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// All recorded games, in creation order.
    pub fn games_history_list(env: Env) -> Vec<GameRecord> {
        history::list_games(&env)
    }

    /// History entries of one game; empty for unknown ids.
    pub fn specific_game_history(env: Env, game_id: u64) -> Vec<HistoryEntry> {
        history::list_entries_for_game(&env, game_id)
    }

    /// History entries of the most recently started game.
    pub fn current_game_history(env: Env) -> Result<Vec<HistoryEntry>, Error> {
        let game_id = Session::load(&env)
            .current_game
            .ok_or(Error::NotStarted)?;
        Ok(history::list_entries_for_game(&env, game_id))
    }

    /// Delete every game record and history entry. Irreversible.
    ///
    /// The session is untouched: a round in progress keeps writing to its
    /// game id.
    ///
    /// Emits `HistoryCleared`.
    pub fn remove_history(env: Env) {
        let (games_removed, entries_removed) = history::clear_all(&env);
        HistoryCleared {
            games_removed,
            entries_removed,
        }
        .publish(&env);
    }

    // -----------------------------------------------------------------------
    // View helpers
    // -----------------------------------------------------------------------

    /// Returns a game record, or `None` if not found.
    pub fn get_game(env: Env, game_id: u64) -> Option<GameRecord> {
        history::get_game(&env, game_id)
    }

    /// Player-facing message for an `Error` code.
    pub fn describe_error(env: Env, code: u32) -> String {
        let Some(err) = Error::from_code(code) else {
            return String::from_str(&env, "Unknown error.");
        };
        match err {
            Error::WordLengthOutOfRange => {
                let bounds = Dictionary::load(&env).bounds();
                text::short(
                    &env,
                    format_args!("Select length of word from {} to {}", bounds.min, bounds.max),
                )
            }
            Error::InvalidTriesCount => text::short(
                &env,
                format_args!(
                    "Tries count must be greater than zero and at most {}.",
                    MAX_TRIES
                ),
            ),
            Error::WordUnavailable => describe_unavailable(&env),
            Error::NotStarted => String::from_str(&env, "Game was not started yet."),
            Error::NoTriesLeft => String::from_str(&env, "You have no tries left, start again."),
            Error::GuessLengthMismatch => match Session::load(&env).state {
                GameState::Active(round) => text::short(
                    &env,
                    format_args!("Word must be {} letters long.", round.secret.len()),
                ),
                GameState::Inactive => {
                    String::from_str(&env, "Word length does not match the secret word.")
                }
            },
            Error::InvalidGuess => {
                String::from_str(&env, "Word must contain only ASCII characters.")
            }
            Error::EntryTooLarge => text::short(
                &env,
                format_args!("History entry exceeds {} bytes.", MAX_ENTRY_BODY_LEN),
            ),
            Error::InvalidWordList => text::short(
                &env,
                format_args!(
                    "Word list must contain 1 to {} lowercase ASCII words of 1 to {} letters.",
                    MAX_WORD_LIST_LEN, MAX_WORD_LEN
                ),
            ),
            Error::Overflow => String::from_str(&env, "Identifier space exhausted."),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Name the in-range word lengths the dictionary has no words for.
fn describe_unavailable(env: &Env) -> String {
    let dictionary = Dictionary::load(env);
    let bounds = dictionary.bounds();
    let missing = (bounds.min..=bounds.max).filter(|&len| dictionary.count_of_length(len) == 0);

    let mut out = TextBuf::<{ text::SHORT_TEXT_LEN }>::new();
    let mut count = 0usize;
    for len in missing {
        let sep = if count == 0 { "" } else { ", " };
        if write!(out, "{}{}", sep, len).is_err() {
            break;
        }
        count += 1;
    }
    match count {
        0 => String::from_str(env, "Word with requested length cannot be generated."),
        1 => text::short(
            env,
            format_args!("Word with length {} cannot be generated.", out.as_str()),
        ),
        _ => text::short(
            env,
            format_args!("Words with lengths {} cannot be generated.", out.as_str()),
        ),
    }
}

/// Render `"\nG U E S S\n+ * - - +\n"`.
fn write_report<W: Write>(
    out: &mut W,
    guess: &[u8],
    marks: &[scoring::Mark],
) -> core::fmt::Result {
    out.write_char('\n')?;
    for (i, &b) in guess.iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        out.write_char(char::from(b.to_ascii_uppercase()))?;
    }
    out.write_char('\n')?;
    for (i, mark) in marks.iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        out.write_char(mark.symbol())?;
    }
    out.write_char('\n')
}

/// Persist a value in persistent storage and extend its TTL.
pub(crate) fn persist_set<V: IntoVal<Env, Val>>(env: &Env, key: DataKey, val: &V) {
    env.storage().persistent().set(&key, val);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

/// Persist a value in instance storage and extend the instance TTL.
pub(crate) fn instance_set<V: IntoVal<Env, Val>>(env: &Env, key: DataKey, val: &V) {
    env.storage().instance().set(&key, val);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_BUMP_LEDGERS, INSTANCE_BUMP_LEDGERS);
}
