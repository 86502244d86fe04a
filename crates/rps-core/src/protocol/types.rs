//! Game record and its public view.

use crate::crypto::{Commitment, GameId, Secret};
use crate::error::GameError;
use crate::games::{resolve, Move, Outcome, Slot, SlotLookup};
use crate::ledger::Address;
use serde::{Deserialize, Serialize};

/// Persistent state of one game
///
/// Fields are private so the invariants hold by construction: a slot can
/// only carry a commitment once its player is bound, a result only after a
/// matching reveal, and the outcome is written once both results exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    players: [Option<Address>; 2],
    commitments: [Option<Commitment>; 2],
    results: [Option<Move>; 2],
    outcome: Option<Outcome>,
    /// Block timestamp of creation
    created_at: u64,
}

impl Game {
    /// New game with the creator bound to the first slot
    pub fn new(id: GameId, creator: Address, created_at: u64) -> Self {
        Self {
            id,
            players: [Some(creator), None],
            commitments: [None, None],
            results: [None, None],
            outcome: None,
            created_at,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn player(&self, slot: Slot) -> Option<Address> {
        self.players[slot.index()]
    }

    pub fn has_committed(&self, slot: Slot) -> bool {
        self.commitments[slot.index()].is_some()
    }

    /// Both slots hold a commitment
    pub fn all_committed(&self) -> bool {
        Slot::ALL.iter().all(|slot| self.has_committed(*slot))
    }

    pub fn result(&self, slot: Slot) -> Option<Move> {
        self.results[slot.index()]
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Winning identity, absent until resolved and on a draw
    pub fn winner(&self) -> Option<Address> {
        match self.outcome? {
            Outcome::Winner(slot) => self.player(slot),
            Outcome::Draw => None,
        }
    }

    pub fn lookup_slot(&self, caller: &Address) -> SlotLookup {
        SlotLookup::resolve(&self.players, caller)
    }

    /// Find the caller's slot, binding the second slot to a new identity
    pub fn admit(&mut self, caller: &Address) -> Result<Slot, GameError> {
        match self.lookup_slot(caller) {
            SlotLookup::Bound(slot) => Ok(slot),
            SlotLookup::Vacant => {
                self.players[Slot::Second.index()] = Some(*caller);
                Ok(Slot::Second)
            }
            SlotLookup::Rejected => Err(GameError::GameFull),
        }
    }

    /// Store the commitment of a bound slot, once
    pub fn record_commitment(
        &mut self,
        slot: Slot,
        commitment: Commitment,
    ) -> Result<(), GameError> {
        let stored = &mut self.commitments[slot.index()];
        if stored.is_some() {
            return Err(GameError::CommitAlreadySaved);
        }
        *stored = Some(commitment);
        Ok(())
    }

    /// Check a reveal against the slot's commitment and record the move
    pub fn record_reveal(
        &mut self,
        slot: Slot,
        mv: Move,
        secret: &Secret,
        player: &Address,
    ) -> Result<(), GameError> {
        if self.results[slot.index()].is_some() {
            return Err(GameError::AlreadyRevealed);
        }
        let commitment = self.commitments[slot.index()].ok_or(GameError::AwaitingCommits)?;
        if !commitment.verify(&self.id, mv, secret, player) {
            return Err(GameError::RevealMismatch);
        }
        self.results[slot.index()] = Some(mv);
        Ok(())
    }

    /// Settle the game once both moves are known; no-op otherwise
    pub fn try_resolve(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            return None;
        }
        let (Some(a), Some(b)) = (self.results[0], self.results[1]) else {
            return None;
        };
        let outcome = resolve(a, b);
        self.outcome = Some(outcome);
        Some(outcome)
    }

    /// Public projection without commitment hashes
    pub fn view(&self) -> GameView {
        GameView {
            players: self.players,
            commits: [
                self.has_committed(Slot::First),
                self.has_committed(Slot::Second),
            ],
            results: self.results,
            winner: self.winner(),
            outcome: self.outcome,
        }
    }
}

/// Read-only answer to a game query
///
/// Unknown ids yield the default view: no players, no commits, no results.
/// Results travel as move codes with 0 for unrevealed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub players: [Option<Address>; 2],
    pub commits: [bool; 2],
    #[serde(with = "result_codes")]
    pub results: [Option<Move>; 2],
    pub winner: Option<Address>,
    pub outcome: Option<Outcome>,
}

impl GameView {
    /// Results as wire codes, 0 for unrevealed
    pub fn result_codes(&self) -> [u8; 2] {
        result_codes::encode(&self.results)
    }
}

mod result_codes {
    use crate::games::Move;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn encode(results: &[Option<Move>; 2]) -> [u8; 2] {
        let code = |result: Option<Move>| result.map(Move::code).unwrap_or(0);
        [code(results[0]), code(results[1])]
    }

    pub fn serialize<S: Serializer>(results: &[Option<Move>; 2], s: S) -> Result<S::Ok, S::Error> {
        encode(results).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[Option<Move>; 2], D::Error> {
        let codes = <[u8; 2]>::deserialize(d)?;
        let decode = |code: u8| -> Result<Option<Move>, D::Error> {
            match code {
                0 => Ok(None),
                code => Move::try_from(code)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
            }
        };
        Ok([decode(codes[0])?, decode(codes[1])?])
    }
}
