use thiserror::Error;

/// Failure to reconstruct a position from caller-supplied text.
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("malformed FEN '{fen}': {reason}")]
    Malformed { fen: String, reason: String },

    #[error("illegal position '{fen}': {reason}")]
    Illegal { fen: String, reason: String },
}

/// Failure to apply a move to the current position. The board is left
/// untouched in every case.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("cannot parse move '{0}'")]
    Parse(String),

    #[error("illegal move '{move_text}': {reason}")]
    Illegal { move_text: String, reason: String },
}
