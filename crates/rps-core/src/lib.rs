//! RPS Core Library
//!
//! The commit-reveal rock-paper-scissors state machine: game identity
//! derivation, slot admission, commitment storage, reveal verification and
//! winner resolution, all executed through an injected ledger.

pub mod contract;
pub mod crypto;
pub mod error;
pub mod games;
pub mod ledger;
pub mod protocol;

pub use contract::{GameLedger, GameRegistry, RockPaperScissors};
pub use crypto::{Commitment, GameId, HexBytesError, Secret, SecretError};
pub use error::GameError;
pub use games::{resolve, Move, Outcome, Slot, SlotLookup};
pub use ledger::{Address, Ledger, LogEntry, MockLedger, Receipt};
pub use protocol::{CommitMessage, Game, GameEvent, GameView, RevealMessage, SealedMove};
