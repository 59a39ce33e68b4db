//! Engine move advisor: difficulty tiers and a best-move query against
//! a spawned UCI engine process.

mod difficulty;
mod error;
mod stockfish;

use async_trait::async_trait;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use error::EngineError;
pub use stockfish::{SearchLimits, StockfishEngine};

/// A best-move capability at a configurable strength.
///
/// Advisors carry no game history: every query supplies the full
/// position. `Ok(None)` means the engine produced no move (no legal
/// reply, crash, timeout), which is distinct from the game already
/// being over.
#[async_trait]
pub trait MoveAdvisor: Send {
    /// Rebind the advisor to a difficulty tier.
    async fn set_strength(&mut self, difficulty: Difficulty) -> Result<(), EngineError>;

    /// Best move for `fen` at the configured strength, in UCI notation.
    async fn best_move(&mut self, fen: &str) -> Result<Option<String>, EngineError>;
}
