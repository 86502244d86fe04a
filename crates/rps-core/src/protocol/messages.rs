//! Caller-side helpers and wire messages.
//!
//! Commitments are computed off-ledger: the ledger only ever sees the hash
//! until the reveal.

use crate::crypto::{Commitment, GameId, Secret};
use crate::games::Move;
use crate::ledger::Address;
use serde::{Deserialize, Serialize};

/// Commit call payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub commit_hash: Commitment,
}

/// Reveal call payload
///
/// `move` stays a raw code so out-of-range values reach the ledger and are
/// rejected there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealMessage {
    #[serde(rename = "move")]
    pub mv: u8,
    pub secret: Secret,
}

/// A player's hidden choice for one game, kept by the player until reveal
#[derive(Clone, Debug)]
pub struct SealedMove {
    pub game_id: GameId,
    pub player: Address,
    pub mv: Move,
    pub secret: Secret,
}

impl SealedMove {
    /// Seal `mv` with a fresh random secret
    pub fn new(game_id: GameId, player: Address, mv: Move) -> Self {
        Self::with_secret(game_id, player, mv, Secret::random())
    }

    pub fn with_secret(game_id: GameId, player: Address, mv: Move, secret: Secret) -> Self {
        Self {
            game_id,
            player,
            mv,
            secret,
        }
    }

    pub fn commitment(&self) -> Commitment {
        Commitment::new(&self.game_id, self.mv, &self.secret, &self.player)
    }

    pub fn commit_message(&self) -> CommitMessage {
        CommitMessage {
            commit_hash: self.commitment(),
        }
    }

    pub fn reveal_message(&self) -> RevealMessage {
        RevealMessage {
            mv: self.mv.code(),
            secret: self.secret.clone(),
        }
    }
}
