//! Integration tests for the full game flow.
//!
//! These tests drive complete games through the contract and the in-memory
//! ledger, the way two players and an observer would.

use rps_core::ledger::{verify_chain, Call, LedgerError};
use rps_core::{
    Address, Commitment, Game, GameError, GameEvent, GameId, GameLedger, GameRegistry, GameView,
    Ledger, LogEntry, Move, Outcome, Receipt, RockPaperScissors, SealedMove, Secret, Slot,
};
use std::sync::atomic::{AtomicUsize, Ordering};

const START: u64 = 1_700_000_000;

struct Players {
    contract: RockPaperScissors<GameLedger>,
    player1: Address,
    player2: Address,
    player3: Address,
}

fn setup() -> Players {
    Players {
        contract: RockPaperScissors::in_memory(),
        player1: Address::from_label("player1"),
        player2: Address::from_label("player2"),
        player3: Address::from_label("player3"),
    }
}

fn create_at(players: &Players, timestamp: u64) -> GameId {
    players
        .contract
        .ledger()
        .set_next_timestamp(timestamp)
        .unwrap();
    players.contract.create_game(players.player1).unwrap().output
}

fn sealed(game_id: GameId, player: Address, mv: Move, label: &str) -> SealedMove {
    SealedMove::with_secret(game_id, player, mv, Secret::from_label(label).unwrap())
}

#[test]
fn test_create_game() {
    let players = setup();
    players.contract.ledger().set_next_timestamp(START).unwrap();

    let receipt = players.contract.create_game(players.player1).unwrap();
    let game_id = GameId::derive(START, &players.player1);

    assert_eq!(receipt.output, game_id);
    assert_eq!(
        receipt.events,
        vec![GameEvent::GameCreated {
            creator: players.player1,
            game_id,
        }]
    );
    let view = players.contract.get_game(&game_id);
    assert_eq!(view.players[0], Some(players.player1));
    assert_eq!(view.players[1], None);
    assert_eq!(view.commits, [false, false]);
    assert_eq!(view.result_codes(), [0, 0]);
    assert_eq!(view.winner, None);
}

#[test]
fn test_commit_result() {
    let players = setup();
    let game_id = create_at(&players, START);
    let hand = sealed(game_id, players.player1, Move::Rock, "secret");

    let receipt = players
        .contract
        .commit_result(players.player1, hand.commitment(), game_id)
        .unwrap();

    assert_eq!(players.contract.get_game(&game_id).commits, [true, false]);
    assert_eq!(
        receipt.events,
        vec![GameEvent::Committed {
            player: players.player1,
            game_id,
        }]
    );
}

#[test]
fn test_commit_result_twice_keeps_first_hash() {
    let players = setup();
    let game_id = create_at(&players, START);
    let first = sealed(game_id, players.player1, Move::Rock, "secret");
    let second = sealed(game_id, players.player1, Move::Paper, "other");

    players
        .contract
        .commit_result(players.player1, first.commitment(), game_id)
        .unwrap();
    assert_eq!(
        players
            .contract
            .commit_result(players.player1, first.commitment(), game_id)
            .unwrap_err(),
        GameError::CommitAlreadySaved
    );
    assert_eq!(
        players
            .contract
            .commit_result(players.player1, second.commitment(), game_id)
            .unwrap_err(),
        GameError::CommitAlreadySaved
    );

    // Only the first commitment opens
    let opponent = sealed(game_id, players.player2, Move::Scissors, "secret2");
    players
        .contract
        .commit_result(players.player2, opponent.commitment(), game_id)
        .unwrap();
    let wrong = second.reveal_message();
    assert_eq!(
        players
            .contract
            .reveal_result(players.player1, wrong.mv, wrong.secret, game_id)
            .unwrap_err(),
        GameError::RevealMismatch
    );
    let right = first.reveal_message();
    assert!(players
        .contract
        .reveal_result(players.player1, right.mv, right.secret, game_id)
        .is_ok());
}

#[test]
fn test_commit_result_game_not_created() {
    let players = setup();
    let game_id = GameId::derive(START, &players.player1);
    let hand = sealed(game_id, players.player1, Move::Rock, "secret");

    let err = players
        .contract
        .commit_result(players.player1, hand.commitment(), game_id)
        .unwrap_err();

    assert_eq!(err, GameError::GameNotFound);
    assert_eq!(err.to_string(), "game has not been created");
}

#[test]
fn test_commit_result_game_already_has_players() {
    let players = setup();
    let game_id = create_at(&players, START);

    for (player, mv, label) in [
        (players.player1, Move::Rock, "secret1"),
        (players.player2, Move::Paper, "secret2"),
    ] {
        let hand = sealed(game_id, player, mv, label);
        players
            .contract
            .commit_result(player, hand.commitment(), game_id)
            .unwrap();
    }

    let intruder = sealed(game_id, players.player3, Move::Scissors, "secret3");
    let err = players
        .contract
        .commit_result(players.player3, intruder.commitment(), game_id)
        .unwrap_err();

    assert_eq!(err, GameError::GameFull);
    assert_eq!(err.to_string(), "game already has players");
    assert_eq!(
        players.contract.get_game(&game_id).players,
        [Some(players.player1), Some(players.player2)]
    );
}

/// Creator plays Rock, opponent plays Paper; Paper wins
#[test]
fn test_reveal_result_and_winner() {
    let players = setup();
    let game_id = create_at(&players, START);
    let hand1 = sealed(game_id, players.player1, Move::Rock, "secret1");
    let hand2 = sealed(game_id, players.player2, Move::Paper, "secret2");
    let secret1 = Secret::from_label("secret1").unwrap();

    players
        .contract
        .commit_result(players.player1, hand1.commitment(), game_id)
        .unwrap();
    assert_eq!(
        players
            .contract
            .reveal_result(players.player1, 1, secret1.clone(), game_id)
            .unwrap_err(),
        GameError::AwaitingCommits
    );

    players
        .contract
        .commit_result(players.player2, hand2.commitment(), game_id)
        .unwrap();
    assert_eq!(
        players
            .contract
            .reveal_result(players.player1, 0, secret1.clone(), game_id)
            .unwrap_err(),
        GameError::InvalidMoveRange(0)
    );
    assert_eq!(
        players
            .contract
            .reveal_result(players.player1, 3, secret1.clone(), game_id)
            .unwrap_err(),
        GameError::RevealMismatch
    );

    let reveal1 = players
        .contract
        .reveal_result(players.player1, 1, secret1, game_id)
        .unwrap();
    let reveal2 = players
        .contract
        .reveal_result(
            players.player2,
            2,
            Secret::from_label("secret2").unwrap(),
            game_id,
        )
        .unwrap();

    assert_eq!(
        reveal1.events,
        vec![GameEvent::Revealed {
            player: players.player1,
            game_id,
        }]
    );
    assert_eq!(reveal2.output, Some(Outcome::Winner(Slot::Second)));

    let view = players.contract.get_game(&game_id);
    assert_eq!(view.players, [Some(players.player1), Some(players.player2)]);
    assert_eq!(view.commits, [true, true]);
    assert_eq!(view.result_codes(), [1, 2]);
    assert_eq!(view.winner, Some(players.player2));
}

/// A mismatched reveal leaves state and log untouched
#[test]
fn test_mismatched_reveal_changes_nothing() {
    let players = setup();
    let game_id = create_at(&players, START);
    let hand1 = sealed(game_id, players.player1, Move::Rock, "secret1");
    let hand2 = sealed(game_id, players.player2, Move::Paper, "secret2");
    players
        .contract
        .commit_result(players.player1, hand1.commitment(), game_id)
        .unwrap();
    players
        .contract
        .commit_result(players.player2, hand2.commitment(), game_id)
        .unwrap();

    let before_view = players.contract.get_game(&game_id);
    let before_log = players.contract.events();
    let before_block = players.contract.ledger().block_number();

    let err = players
        .contract
        .reveal_result(
            players.player1,
            3,
            Secret::from_label("secret1").unwrap(),
            game_id,
        )
        .unwrap_err();

    assert_eq!(err, GameError::RevealMismatch);
    assert_eq!(players.contract.get_game(&game_id), before_view);
    assert_eq!(players.contract.events(), before_log);
    assert_eq!(players.contract.ledger().block_number(), before_block);
}

/// Only the exact (move, secret) pair from the committing identity opens it
#[test]
fn test_commitment_binds_move_secret_and_identity() {
    let players = setup();
    let game_id = create_at(&players, START);
    let hand1 = sealed(game_id, players.player1, Move::Scissors, "s1");
    let hand2 = sealed(game_id, players.player2, Move::Paper, "s2");
    players
        .contract
        .commit_result(players.player1, hand1.commitment(), game_id)
        .unwrap();
    players
        .contract
        .commit_result(players.player2, hand2.commitment(), game_id)
        .unwrap();

    // Player 2 replays player 1's opening: bound to player 1's identity
    let replay = hand1.reveal_message();
    assert_eq!(
        players
            .contract
            .reveal_result(players.player2, replay.mv, replay.secret, game_id)
            .unwrap_err(),
        GameError::RevealMismatch
    );

    for mv in [Move::Rock, Move::Paper] {
        assert_eq!(
            players
                .contract
                .reveal_result(players.player1, mv.code(), hand1.secret.clone(), game_id)
                .unwrap_err(),
            GameError::RevealMismatch
        );
    }
    assert_eq!(
        players
            .contract
            .reveal_result(
                players.player1,
                Move::Scissors.code(),
                Secret::from_label("s2").unwrap(),
                game_id,
            )
            .unwrap_err(),
        GameError::RevealMismatch
    );

    let open = hand1.reveal_message();
    assert!(players
        .contract
        .reveal_result(players.player1, open.mv, open.secret, game_id)
        .is_ok());
}

/// Every pairing of moves, played end to end
#[test]
fn test_all_nine_pairings() {
    let players = setup();

    for (round, (a, b)) in Move::ALL
        .into_iter()
        .flat_map(|a| Move::ALL.into_iter().map(move |b| (a, b)))
        .enumerate()
    {
        let game_id = create_at(&players, START + round as u64);
        let hand1 = SealedMove::new(game_id, players.player1, a);
        let hand2 = SealedMove::new(game_id, players.player2, b);

        // Commit and reveal in opposite orders for variety
        players
            .contract
            .commit_result(players.player2, hand2.commitment(), game_id)
            .unwrap();
        players
            .contract
            .commit_result(players.player1, hand1.commitment(), game_id)
            .unwrap();
        let r2 = hand2.reveal_message();
        players
            .contract
            .reveal_result(players.player2, r2.mv, r2.secret, game_id)
            .unwrap();
        let r1 = hand1.reveal_message();
        let outcome = players
            .contract
            .reveal_result(players.player1, r1.mv, r1.secret, game_id)
            .unwrap()
            .output;

        // Player 2 committed first but the creator still holds slot 0
        let view = players.contract.get_game(&game_id);
        assert_eq!(view.players, [Some(players.player1), Some(players.player2)]);
        let expected_winner = if a.beats(&b) {
            Some(players.player1)
        } else if b.beats(&a) {
            Some(players.player2)
        } else {
            None
        };
        assert_eq!(view.winner, expected_winner, "{} vs {}", a, b);
        assert_eq!(outcome, view.outcome);
        if a == b {
            assert_eq!(view.outcome, Some(Outcome::Draw));
        }
    }

    assert_eq!(players.contract.game_ids().len(), 9);
}

/// Games progress independently of each other
#[test]
fn test_games_are_independent() {
    let players = setup();
    let first = create_at(&players, START);
    let second = create_at(&players, START + 60);
    assert_ne!(first, second);

    let hand = sealed(first, players.player2, Move::Rock, "x");
    players
        .contract
        .commit_result(players.player2, hand.commitment(), first)
        .unwrap();

    assert_eq!(players.contract.get_game(&first).commits, [false, true]);
    assert_eq!(
        players.contract.get_game(&second),
        GameView {
            players: [Some(players.player1), None],
            ..GameView::default()
        }
    );
    assert_eq!(players.contract.game_ids(), vec![first, second]);
}

/// The log alone is enough to audit a finished game
#[test]
fn test_log_is_auditable() {
    let players = setup();
    let game_id = create_at(&players, START);
    let hand1 = sealed(game_id, players.player1, Move::Paper, "a");
    let hand2 = sealed(game_id, players.player2, Move::Rock, "b");
    for hand in [&hand1, &hand2] {
        players
            .contract
            .commit_result(hand.player, hand.commitment(), game_id)
            .unwrap();
    }
    for hand in [&hand1, &hand2] {
        let reveal = hand.reveal_message();
        players
            .contract
            .reveal_result(hand.player, reveal.mv, reveal.secret, game_id)
            .unwrap();
    }

    let log = players.contract.events();
    assert!(verify_chain(&log));
    let kinds: Vec<&str> = log
        .iter()
        .map(|entry| match entry.event {
            GameEvent::GameCreated { .. } => "created",
            GameEvent::Committed { .. } => "committed",
            GameEvent::Revealed { .. } => "revealed",
            GameEvent::Resolved { .. } => "resolved",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["created", "committed", "committed", "revealed", "revealed", "resolved"]
    );
    assert!(log.iter().all(|entry| entry.event.game_id() == game_id));
    // Resolution is sealed in the same block as the second reveal
    assert_eq!(log[4].block, log[5].block);
    assert_eq!(log[5].caller, players.player2);

    let mut forged = log.clone();
    forged[5].event = GameEvent::Resolved {
        game_id,
        outcome: Outcome::Winner(Slot::Second),
        winner: Some(players.player2),
    };
    assert!(!verify_chain(&forged));

    // The creation timestamp fixes the game id, so it is chained too
    let mut backdated = log.clone();
    backdated[0].timestamp -= 1;
    assert!(!verify_chain(&backdated));
}

/// Reveals are gated on both commitments, whatever the reveal carries
#[test]
fn test_reveal_gating_ignores_reveal_contents() {
    let players = setup();
    let game_id = create_at(&players, START);
    let awaiting = |caller: Address, mv: u8, secret: Secret| {
        players
            .contract
            .reveal_result(caller, mv, secret, game_id)
            .unwrap_err()
    };

    // Out-of-range move with no commitments at all
    assert_eq!(
        awaiting(players.player1, 0, Secret::random()),
        GameError::AwaitingCommits
    );

    let hand = sealed(game_id, players.player1, Move::Rock, "secret1");
    players
        .contract
        .commit_result(players.player1, hand.commitment(), game_id)
        .unwrap();

    // Wrong secret after one commitment
    let wrong_secret = Secret::from_label("not-secret1").unwrap();
    assert_eq!(
        awaiting(players.player1, 1, wrong_secret),
        GameError::AwaitingCommits
    );
    // Identity bound to neither slot
    assert_eq!(
        awaiting(players.player3, 2, Secret::random()),
        GameError::AwaitingCommits
    );

    let view = players.contract.get_game(&game_id);
    assert_eq!(view.commits, [true, false]);
    assert_eq!(view.players, [Some(players.player1), None]);
    assert_eq!(players.contract.events().len(), 2);
}

/// Ledger wrapper counting the calls it hosts
struct CountingLedger {
    inner: GameLedger,
    calls: AtomicUsize,
}

impl Ledger for CountingLedger {
    type Key = GameId;
    type Value = Game;
    type Event = GameEvent;

    fn execute<R, Err, F>(
        &self,
        caller: Address,
        call: F,
    ) -> Result<Receipt<R, GameEvent>, Err>
    where
        Err: From<LedgerError>,
        F: FnOnce(&mut Call<'_, GameId, Game, GameEvent>) -> Result<R, Err>,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(caller, call)
    }

    fn view<R, F>(&self, query: F) -> R
    where
        F: FnOnce(&GameRegistry) -> R,
    {
        self.inner.view(query)
    }

    fn log(&self) -> Vec<LogEntry<GameEvent>> {
        self.inner.log()
    }
}

/// The contract runs on any ledger implementation
#[test]
fn test_contract_over_injected_ledger() {
    let ledger = CountingLedger {
        inner: GameLedger::default(),
        calls: AtomicUsize::new(0),
    };
    let contract = RockPaperScissors::new(ledger);
    let alice = Address::from_label("alice");

    let game_id = contract.create_game(alice).unwrap().output;
    let hand = SealedMove::new(game_id, alice, Move::Rock);
    contract
        .commit_result(alice, hand.commitment(), game_id)
        .unwrap();
    let _ = contract.commit_result(alice, Commitment::from_bytes([1; 32]), game_id);

    assert_eq!(contract.ledger().calls.load(Ordering::SeqCst), 3);
    assert_eq!(contract.events().len(), 2);
    assert_eq!(contract.get_game(&game_id).commits, [true, false]);
}
