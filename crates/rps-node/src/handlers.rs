//! HTTP API handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rps_core::ledger::LedgerError;
use rps_core::{
    Address, CommitMessage, GameError, GameEvent, GameId, GameView, LogEntry, Outcome, Receipt,
    RevealMessage,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::NodeState;

/// Header carrying the caller's identity
pub const CALLER_HEADER: &str = "X-Caller";

// ============ Errors ============

/// Handler failure rendered as `{"error", "code"}`
#[derive(Debug)]
pub enum AppError {
    MissingCaller,
    InvalidCaller(String),
    Game(GameError),
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        AppError::Game(err)
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        AppError::Game(GameError::Ledger(err))
    }
}

fn game_error_status(err: &GameError) -> StatusCode {
    match err {
        GameError::GameNotFound => StatusCode::NOT_FOUND,
        GameError::GameFull => StatusCode::FORBIDDEN,
        GameError::GameAlreadyExists
        | GameError::CommitAlreadySaved
        | GameError::AwaitingCommits
        | GameError::AlreadyRevealed => StatusCode::CONFLICT,
        GameError::InvalidMoveRange(_)
        | GameError::RevealMismatch
        | GameError::Ledger(LedgerError::TimestampNotMonotonic { .. }) => StatusCode::BAD_REQUEST,
        GameError::Ledger(LedgerError::Encoding(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::MissingCaller => (
                StatusCode::UNAUTHORIZED,
                "missing_caller",
                format!("Missing {} header", CALLER_HEADER),
            ),
            AppError::InvalidCaller(reason) => (
                StatusCode::UNAUTHORIZED,
                "invalid_caller",
                format!("Invalid {} header: {}", CALLER_HEADER, reason),
            ),
            AppError::Game(err) => (game_error_status(&err), err.code(), err.to_string()),
        };
        (
            status,
            Json(serde_json::json!({"error": message, "code": code})),
        )
            .into_response()
    }
}

fn caller_from_headers(headers: &HeaderMap) -> Result<Address, AppError> {
    let value = headers
        .get(CALLER_HEADER)
        .ok_or(AppError::MissingCaller)?
        .to_str()
        .map_err(|e| AppError::InvalidCaller(e.to_string()))?;
    value
        .parse()
        .map_err(|e: rps_core::ledger::AddressParseError| AppError::InvalidCaller(e.to_string()))
}

// ============ Request/Response types ============

#[derive(Serialize)]
pub struct GameListResponse {
    pub games: Vec<GameId>,
}

#[derive(Serialize)]
pub struct LogResponse {
    pub entries: Vec<LogEntry<GameEvent>>,
}

#[derive(Deserialize)]
pub struct SetTimestampRequest {
    pub timestamp: u64,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
}

// ============ Game handlers ============

pub async fn create_game(
    State(state): State<NodeState>,
    headers: HeaderMap,
) -> Result<Json<Receipt<GameId, GameEvent>>, AppError> {
    let caller = caller_from_headers(&headers)?;
    let receipt = state.contract().create_game(caller)?;
    info!("Created game {} for {}", receipt.output, caller);
    Ok(Json(receipt))
}

pub async fn list_games(State(state): State<NodeState>) -> Json<GameListResponse> {
    Json(GameListResponse {
        games: state.contract().game_ids(),
    })
}

pub async fn get_game(
    State(state): State<NodeState>,
    Path(game_id): Path<GameId>,
) -> Json<GameView> {
    Json(state.contract().get_game(&game_id))
}

pub async fn commit_result(
    State(state): State<NodeState>,
    Path(game_id): Path<GameId>,
    headers: HeaderMap,
    Json(req): Json<CommitMessage>,
) -> Result<Json<Receipt<(), GameEvent>>, AppError> {
    let caller = caller_from_headers(&headers)?;
    let receipt = state
        .contract()
        .commit_result(caller, req.commit_hash, game_id)?;
    info!("Commitment from {} recorded in game {}", caller, game_id);
    Ok(Json(receipt))
}

pub async fn reveal_result(
    State(state): State<NodeState>,
    Path(game_id): Path<GameId>,
    headers: HeaderMap,
    Json(req): Json<RevealMessage>,
) -> Result<Json<Receipt<Option<Outcome>, GameEvent>>, AppError> {
    let caller = caller_from_headers(&headers)?;
    let receipt = state
        .contract()
        .reveal_result(caller, req.mv, req.secret, game_id)?;
    info!("Reveal from {} accepted in game {}", caller, game_id);
    if let Some(outcome) = receipt.output {
        info!("Game {} resolved: {:?}", game_id, outcome);
    }
    Ok(Json(receipt))
}

// ============ Ledger handlers ============

pub async fn get_log(State(state): State<NodeState>) -> Json<LogResponse> {
    Json(LogResponse {
        entries: state.contract().events(),
    })
}

pub async fn set_next_timestamp(
    State(state): State<NodeState>,
    Json(req): Json<SetTimestampRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    state.ledger().set_next_timestamp(req.timestamp)?;
    Ok(Json(StatusResponse {
        status: "scheduled".to_string(),
    }))
}

pub async fn health() -> &'static str {
    "ok"
}
