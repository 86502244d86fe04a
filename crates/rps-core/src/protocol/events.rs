//! Notifications appended to the ledger log.

use crate::crypto::GameId;
use crate::games::Outcome;
use crate::ledger::Address;
use serde::{Deserialize, Serialize};

/// Audit trail of game transitions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    GameCreated {
        creator: Address,
        game_id: GameId,
    },
    Committed {
        player: Address,
        game_id: GameId,
    },
    Revealed {
        player: Address,
        game_id: GameId,
    },
    /// Emitted in the same call as the second reveal
    Resolved {
        game_id: GameId,
        outcome: Outcome,
        winner: Option<Address>,
    },
}

impl GameEvent {
    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::GameCreated { game_id, .. }
            | GameEvent::Committed { game_id, .. }
            | GameEvent::Revealed { game_id, .. }
            | GameEvent::Resolved { game_id, .. } => *game_id,
        }
    }
}
