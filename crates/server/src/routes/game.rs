//! Game endpoints: session reconstruction, human-move validation and
//! the two-phase engine exchange (reply at the requested tier, hint at
//! maximum strength).

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use chess_core::Board;
use uci_engine::{Difficulty, MoveAdvisor, StockfishEngine};

use crate::config::Config;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct NewGameRequest {
    pub difficulty: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Serialize)]
pub struct NewGameResponse {
    pub board_position: String,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_move: Option<String>,
}

#[derive(Deserialize)]
pub struct MakeMoveRequest {
    pub position: String,
    #[serde(rename = "move")]
    pub move_text: String,
    pub difficulty: String,
}

#[derive(Serialize)]
pub struct MakeMoveResponse {
    pub engine_move: String,
    pub board_position: String,
    /// Max-strength suggestion for the caller's next move; empty when
    /// the engine's reply ended the game.
    pub best_move: String,
}

#[derive(Deserialize)]
pub struct SuggestMoveRequest {
    pub position: String,
}

#[derive(Serialize)]
pub struct SuggestMoveResponse {
    pub best_move: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerColor {
    White,
    Black,
}

fn parse_color(color: Option<&str>) -> Result<PlayerColor, AppError> {
    match color {
        None | Some("white") => Ok(PlayerColor::White),
        Some("black") => Ok(PlayerColor::Black),
        Some(other) => Err(AppError::BadRequest(format!(
            "unknown color '{other}' (expected white or black)"
        ))),
    }
}

/// POST /new_game
///
/// Starts from the standard initial position. When the caller plays
/// Black, the engine makes the opening move at the requested tier and
/// the response reflects it.
pub async fn new_game(
    Extension(config): Extension<Config>,
    Json(req): Json<NewGameRequest>,
) -> Result<Json<NewGameResponse>, AppError> {
    let difficulty: Difficulty = req.difficulty.parse()?;
    let color = parse_color(req.color.as_deref())?;

    let mut board = Board::default();

    let engine_move = match color {
        PlayerColor::White => None,
        PlayerColor::Black => {
            let mut engine =
                StockfishEngine::new(&config.stockfish_path, difficulty, config.search_limits())
                    .await?;
            let mv = engine_reply(&mut engine, &mut board).await?;
            engine.quit().await;
            Some(mv)
        }
    };

    Ok(Json(NewGameResponse {
        board_position: board.fen(),
        difficulty,
        engine_move,
    }))
}

/// POST /make_move
///
/// Validates and applies the caller's move, then runs the engine
/// exchange. Validation failures return 400 before any engine process
/// is spawned.
pub async fn make_move(
    Extension(config): Extension<Config>,
    Json(req): Json<MakeMoveRequest>,
) -> Result<Json<MakeMoveResponse>, AppError> {
    let difficulty: Difficulty = req.difficulty.parse()?;

    let mut board = Board::new(Some(&req.position))?;
    board.apply_move(&req.move_text)?;

    let mut engine =
        StockfishEngine::new(&config.stockfish_path, difficulty, config.search_limits()).await?;
    let exchange = play_exchange(&mut engine, board).await?;
    engine.quit().await;

    Ok(Json(MakeMoveResponse {
        engine_move: exchange.engine_move,
        board_position: exchange.board.fen(),
        best_move: exchange.best_move,
    }))
}

/// POST /suggest_move
///
/// Max-strength suggestion for the given position, nothing applied.
pub async fn suggest_move(
    Extension(config): Extension<Config>,
    Json(req): Json<SuggestMoveRequest>,
) -> Result<Json<SuggestMoveResponse>, AppError> {
    let board = Board::new(Some(&req.position))?;

    let mut engine =
        StockfishEngine::new(&config.stockfish_path, Difficulty::MAX, config.search_limits())
            .await?;
    let best_move = engine
        .best_move(&board.fen())
        .await?
        .ok_or(AppError::EngineUnavailable)?;
    engine.quit().await;

    Ok(Json(SuggestMoveResponse { best_move }))
}

/// Result of the engine exchange: the applied reply, the resulting
/// board, and the hint ("" when the reply ended the game).
#[derive(Debug)]
struct MoveExchange {
    engine_move: String,
    board: Board,
    best_move: String,
}

/// Ask the advisor for a reply and apply it to the board.
async fn engine_reply<A: MoveAdvisor>(
    advisor: &mut A,
    board: &mut Board,
) -> Result<String, AppError> {
    let mv = advisor
        .best_move(&board.fen())
        .await?
        .ok_or(AppError::EngineUnavailable)?;

    board.apply_engine_move(&mv).map_err(|e| {
        tracing::error!("Engine produced an unplayable move '{mv}': {e}");
        AppError::EngineUnavailable
    })?;

    Ok(mv)
}

/// The two-phase exchange on a board that already carries the human
/// move: apply the advisor's reply, then requery at maximum strength
/// for an advisory hint unless the reply delivered checkmate. The
/// hint is never applied to the board.
async fn play_exchange<A: MoveAdvisor>(
    advisor: &mut A,
    mut board: Board,
) -> Result<MoveExchange, AppError> {
    let engine_move = engine_reply(advisor, &mut board).await?;

    let best_move = if board.is_checkmate() {
        String::new()
    } else {
        advisor.set_strength(Difficulty::MAX).await?;
        advisor
            .best_move(&board.fen())
            .await?
            .ok_or(AppError::EngineUnavailable)?
    };

    Ok(MoveExchange {
        engine_move,
        board,
        best_move,
    })
}
