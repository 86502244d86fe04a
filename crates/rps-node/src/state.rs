//! Shared node state.

use rps_core::RockPaperScissors;
use rps_core::GameLedger;

/// State shared by all handlers
///
/// Cloning is cheap: every clone drives the same ledger.
#[derive(Clone)]
pub struct NodeState {
    contract: RockPaperScissors<GameLedger>,
}

impl NodeState {
    /// Node backed by a fresh in-memory ledger
    pub fn new() -> Self {
        Self::with_contract(RockPaperScissors::in_memory())
    }

    pub fn with_contract(contract: RockPaperScissors<GameLedger>) -> Self {
        Self { contract }
    }

    pub fn contract(&self) -> &RockPaperScissors<GameLedger> {
        &self.contract
    }

    pub fn ledger(&self) -> &GameLedger {
        self.contract.ledger()
    }
}

impl Default for NodeState {
    fn default() -> Self {
        Self::new()
    }
}
