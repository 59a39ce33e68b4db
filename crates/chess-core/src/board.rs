use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position};

use crate::error::{MoveError, PositionError};

/// FEN of the standard initial position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Sentinel accepted in place of a FEN for the initial position.
const START_SENTINEL: &str = "start";

/// A legal chess position. Constructed from the initial position or a
/// well-formed FEN, and mutated only by validated move application.
#[derive(Debug, Clone)]
pub struct Board {
    pos: Chess,
}

impl Board {
    /// Build a board from caller-supplied position text. `None` or the
    /// `"start"` sentinel give the standard initial position.
    pub fn new(position_text: Option<&str>) -> Result<Self, PositionError> {
        match position_text {
            None | Some(START_SENTINEL) => Ok(Self {
                pos: Chess::default(),
            }),
            Some(fen) => Self::from_fen(fen),
        }
    }

    /// Parse a FEN into a board, rejecting malformed or illegal encodings.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let parsed: Fen = fen.parse().map_err(|e| PositionError::Malformed {
            fen: fen.to_string(),
            reason: format!("{e}"),
        })?;

        let pos = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| PositionError::Illegal {
                fen: fen.to_string(),
                reason: format!("{e}"),
            })?;

        Ok(Self { pos })
    }

    /// Canonical round-trippable FEN of the current position.
    pub fn fen(&self) -> String {
        Fen::from_position(&self.pos, EnPassantMode::Legal).to_string()
    }

    /// Apply a human move given in SAN, falling back to UCI coordinate
    /// notation (web clients submit moves as "e2e4"). Unparsable,
    /// ambiguous or illegal moves leave the board unchanged.
    pub fn apply_move(&mut self, move_text: &str) -> Result<(), MoveError> {
        let mv = self.parse_move(move_text)?;
        self.pos.play_unchecked(mv);
        Ok(())
    }

    /// Apply an engine reply, which is always plain UCI notation.
    pub fn apply_engine_move(&mut self, uci: &str) -> Result<(), MoveError> {
        let parsed: UciMove = uci
            .parse()
            .map_err(|_| MoveError::Parse(uci.to_string()))?;
        let mv = parsed.to_move(&self.pos).map_err(|e| MoveError::Illegal {
            move_text: uci.to_string(),
            reason: format!("{e}"),
        })?;
        self.pos.play_unchecked(mv);
        Ok(())
    }

    /// True iff the side to move has no legal moves and is in check.
    pub fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    fn parse_move(&self, move_text: &str) -> Result<Move, MoveError> {
        if let Ok(san) = move_text.parse::<San>() {
            return san.to_move(&self.pos).map_err(|e| MoveError::Illegal {
                move_text: move_text.to_string(),
                reason: format!("{e}"),
            });
        }

        let uci: UciMove = move_text
            .parse()
            .map_err(|_| MoveError::Parse(move_text.to_string()))?;
        uci.to_move(&self.pos).map_err(|e| MoveError::Illegal {
            move_text: move_text.to_string(),
            reason: format!("{e}"),
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            pos: Chess::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // After 1.e4 e5 2.Bc4 Nc6 3.Qh5: Black to move, Qxf7# hangs over f6.
    const SCHOLAR_SETUP: &str =
        "r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 3 3";

    // Fool's mate: 1.f3 e5 2.g4 Qh4#
    const FOOLS_MATE: &str =
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

    #[test]
    fn new_without_text_is_start_position() {
        let board = Board::new(None).unwrap();
        assert_eq!(board.fen(), START_FEN);
    }

    #[test]
    fn start_sentinel_is_start_position() {
        let board = Board::new(Some("start")).unwrap();
        assert_eq!(board.fen(), START_FEN);
    }

    #[test]
    fn fen_round_trip_is_stable() {
        for fen in [START_FEN, SCHOLAR_SETUP, FOOLS_MATE] {
            let board = Board::new(Some(fen)).unwrap();
            assert_eq!(board.fen(), fen);
            let reparsed = Board::new(Some(&board.fen())).unwrap();
            assert_eq!(reparsed.fen(), board.fen());
        }
    }

    #[test]
    fn malformed_fen_is_rejected() {
        assert!(matches!(
            Board::new(Some("not a fen")),
            Err(PositionError::Malformed { .. })
        ));
    }

    #[test]
    fn illegal_position_is_rejected() {
        // Two white kings
        let err = Board::new(Some("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"));
        assert!(matches!(err, Err(PositionError::Illegal { .. })));
    }

    #[test]
    fn applies_san_move() {
        let mut board = Board::default();
        board.apply_move("e4").unwrap();
        assert_eq!(
            board.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn applies_uci_move() {
        let mut board = Board::default();
        board.apply_move("e2e4").unwrap();
        assert_eq!(
            board.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn applies_castling_and_promotion() {
        // White ready to castle short
        let mut board =
            Board::new(Some("rnbqk2r/pppp1ppp/5n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4"))
                .unwrap();
        board.apply_move("O-O").unwrap();
        assert!(board.fen().contains(" b "));

        // Promotion in UCI form
        let mut board = Board::new(Some("8/4P1k1/8/8/8/8/8/4K3 w - - 0 1")).unwrap();
        board.apply_move("e7e8q").unwrap();
        assert!(board.fen().starts_with("4Q3/6k1/"));
    }

    #[test]
    fn illegal_move_leaves_board_unchanged() {
        let mut board = Board::default();
        let before = board.fen();

        let err = board.apply_move("e5");
        assert!(matches!(err, Err(MoveError::Illegal { .. })));
        assert_eq!(board.fen(), before);
    }

    #[test]
    fn unparsable_move_is_a_parse_error() {
        let mut board = Board::default();
        let before = board.fen();

        assert!(matches!(board.apply_move("zzz"), Err(MoveError::Parse(_))));
        assert_eq!(board.fen(), before);
    }

    #[test]
    fn engine_move_must_be_legal() {
        let mut board = Board::default();
        assert!(board.apply_engine_move("e2e5").is_err());
        assert!(board.apply_engine_move("e2e4").is_ok());
    }

    #[test]
    fn detects_checkmate() {
        let board = Board::new(Some(FOOLS_MATE)).unwrap();
        assert!(board.is_checkmate());

        let board = Board::default();
        assert!(!board.is_checkmate());
    }

    #[test]
    fn scholars_mate_sequence() {
        let mut board = Board::new(Some(SCHOLAR_SETUP)).unwrap();
        board.apply_move("Nf6").unwrap();
        assert!(!board.is_checkmate());

        board.apply_engine_move("h5f7").unwrap();
        assert!(board.is_checkmate());
    }
}
