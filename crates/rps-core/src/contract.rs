//! The game contract: state transitions executed through a ledger.

use crate::crypto::{Commitment, GameId, Secret};
use crate::error::GameError;
use crate::games::{Move, Outcome, SlotLookup};
use crate::ledger::{Address, Call, Ledger, LogEntry, MockLedger, Receipt, Storage};
use crate::protocol::{Game, GameEvent, GameView};
use tracing::debug;

/// Ledger storage: every game ever created, keyed by id
pub type GameRegistry = Storage<GameId, Game>;

/// In-memory ledger specialised for the game contract
pub type GameLedger = MockLedger<GameId, Game, GameEvent>;

type GameCall<'a> = Call<'a, GameId, Game, GameEvent>;

/// Ids ordered by creation time, then id
fn ordered_ids(registry: &GameRegistry) -> Vec<GameId> {
    let mut games: Vec<&Game> = registry.values().collect();
    games.sort_by_key(|game| (game.created_at(), game.id()));
    games.into_iter().map(Game::id).collect()
}

/// Working copy of one game; written back only once every check passed
fn load(call: &GameCall<'_>, game_id: &GameId) -> Result<Game, GameError> {
    call.get(game_id).cloned().ok_or(GameError::GameNotFound)
}

fn create_game(call: &mut GameCall<'_>) -> Result<GameId, GameError> {
    let creator = call.caller();
    let timestamp = call.timestamp();
    let game_id = GameId::derive(timestamp, &creator);

    if call.contains_key(&game_id) {
        return Err(GameError::GameAlreadyExists);
    }
    call.insert(game_id, Game::new(game_id, creator, timestamp));

    call.emit(GameEvent::GameCreated { creator, game_id });
    debug!(%game_id, %creator, timestamp, "game created");
    Ok(game_id)
}

fn commit_result(
    call: &mut GameCall<'_>,
    commitment: Commitment,
    game_id: GameId,
) -> Result<(), GameError> {
    let player = call.caller();
    let mut game = load(call, &game_id)?;
    let slot = game.admit(&player)?;
    game.record_commitment(slot, commitment)?;
    call.insert(game_id, game);

    call.emit(GameEvent::Committed { player, game_id });
    debug!(%game_id, %player, %slot, "commitment recorded");
    Ok(())
}

fn reveal_result(
    call: &mut GameCall<'_>,
    mv: u8,
    secret: &Secret,
    game_id: GameId,
) -> Result<Option<Outcome>, GameError> {
    let player = call.caller();
    let mut game = load(call, &game_id)?;
    if !game.all_committed() {
        return Err(GameError::AwaitingCommits);
    }
    let mv = Move::try_from(mv)?;
    let slot = match game.lookup_slot(&player) {
        SlotLookup::Bound(slot) => slot,
        SlotLookup::Vacant | SlotLookup::Rejected => return Err(GameError::GameFull),
    };
    game.record_reveal(slot, mv, secret, &player)?;
    let resolved = game.try_resolve();
    let winner = game.winner();
    call.insert(game_id, game);

    call.emit(GameEvent::Revealed { player, game_id });
    debug!(%game_id, %player, %slot, %mv, "move revealed");

    if let Some(outcome) = resolved {
        call.emit(GameEvent::Resolved {
            game_id,
            outcome,
            winner,
        });
        debug!(%game_id, ?outcome, ?winner, "game resolved");
    }
    Ok(resolved)
}

/// Two-player commit-reveal Rock-Paper-Scissors hosted on a ledger
///
/// Every mutating operation runs as one atomic ledger call: either all of
/// its writes and notifications land, or none do.
#[derive(Clone)]
pub struct RockPaperScissors<L> {
    ledger: L,
}

impl RockPaperScissors<GameLedger> {
    /// Contract over a fresh in-memory ledger
    pub fn in_memory() -> Self {
        Self::new(GameLedger::default())
    }
}

impl<L> RockPaperScissors<L>
where
    L: Ledger<Key = GameId, Value = Game, Event = GameEvent>,
{
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Open a game with `caller` in the first slot
    pub fn create_game(&self, caller: Address) -> Result<Receipt<GameId, GameEvent>, GameError> {
        self.ledger.execute(caller, create_game)
    }

    /// Record `caller`'s commitment, admitting them to the second slot if
    /// it is still open
    pub fn commit_result(
        &self,
        caller: Address,
        commitment: Commitment,
        game_id: GameId,
    ) -> Result<Receipt<(), GameEvent>, GameError> {
        self.ledger
            .execute(caller, |call| commit_result(call, commitment, game_id))
    }

    /// Open `caller`'s commitment; the second valid reveal resolves the game
    /// and the receipt carries the outcome
    pub fn reveal_result(
        &self,
        caller: Address,
        mv: u8,
        secret: Secret,
        game_id: GameId,
    ) -> Result<Receipt<Option<Outcome>, GameEvent>, GameError> {
        self.ledger
            .execute(caller, |call| reveal_result(call, mv, &secret, game_id))
    }

    /// Public state of a game; the default view for unknown ids
    pub fn get_game(&self, game_id: &GameId) -> GameView {
        self.ledger.view(|registry| {
            registry
                .get(game_id)
                .map(Game::view)
                .unwrap_or_default()
        })
    }

    pub fn game_ids(&self) -> Vec<GameId> {
        self.ledger.view(ordered_ids)
    }

    /// Ordered audit trail of every committed call
    pub fn events(&self) -> Vec<LogEntry<GameEvent>> {
        self.ledger.log()
    }
}
