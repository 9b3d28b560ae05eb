//! The single game session shared by every caller.

use soroban_sdk::{contracttype, Env, String};

use crate::{history, instance_set, DataKey};

/// A round in progress.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActiveRound {
    pub secret: String,
    /// Guesses still allowed. Always positive while the round is stored.
    pub tries_left: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GameState {
    Inactive,
    Active(ActiveRound),
}

/// Game state plus the pointer to the game that history is written to.
///
/// `current_game` outlives the round: once a game ends its history stays
/// reachable until the next `start`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    pub state: GameState,
    pub current_game: Option<u64>,
}

impl Session {
    pub fn load(env: &Env) -> Self {
        env.storage()
            .instance()
            .get(&DataKey::Session)
            .unwrap_or(Session {
                state: GameState::Inactive,
                current_game: None,
            })
    }

    pub fn save(&self, env: &Env) {
        instance_set(env, DataKey::Session, self);
    }

    /// Leave the active round and mark the current game record as ended.
    pub fn end_game(&mut self, env: &Env) {
        self.state = GameState::Inactive;
        if let Some(game_id) = self.current_game {
            history::mark_ended(env, game_id);
        }
    }
}
