//! Ties the board, the repetition table, and the situation classifier
//! together into the single object the interactive driver needs.

use crate::board::Board;
use crate::coretypes::{PieceKind, Square, Target, TargetKind};
use crate::error::{Error, ErrorKind};
use crate::eval;
use crate::fen;
use crate::makemove;
use crate::repetition::RepetitionTable;
use crate::situation::{self, Situation};

/// A chess game in progress: a board plus the bookkeeping needed to
/// classify its situation.
pub struct Game {
    board: Board,
    repetition: RepetitionTable,
}

impl Game {
    /// Starts a game from a FEN string, recording it as the first entry
    /// in the repetition table.
    pub fn from_fen(fen_str: &str) -> Result<Self, Error> {
        let parsed: fen::Fen = fen_str.parse().map_err(|_: fen::ParseFenError| {
            Error::from((ErrorKind::GameStartupFen, fen_str))
        })?;
        let board = parsed.into_board().map_err(|_| Error::from((ErrorKind::GameStartupFen, fen_str)))?;
        let mut repetition = RepetitionTable::new();
        repetition.record(&fen::emit(&board));
        Ok(Game { board, repetition })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current, canonical FEN.
    pub fn fen(&self) -> String {
        fen::emit(&self.board)
    }

    pub fn situation(&self) -> Situation {
        situation::classify(&self.board, self.repetition.current_count())
    }

    /// Applies a move described by origin/destination squares and an
    /// optional promotion piece, inferring capture/en-passant from board
    /// state per the external move notation. Records the resulting FEN.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), Error> {
        let mover = self.board.piece_at(from).ok_or(ErrorKind::NoPieceOnSquare)?;
        let is_capture = self.board.piece_at(to).is_some();
        let is_en_passant =
            mover.kind() == PieceKind::Pawn && Some(to) == self.board.en_passant && !is_capture;

        let kind = match (is_en_passant, is_capture, promotion) {
            (true, _, _) => TargetKind::EnPassant,
            (false, true, Some(p)) => TargetKind::CapturePromotion(p),
            (false, true, None) => TargetKind::Capture,
            (false, false, Some(p)) => TargetKind::Promotion(p),
            (false, false, None) => TargetKind::Quiet,
        };

        makemove::make(&mut self.board, from, Target::new(to, kind))?;
        self.repetition.record(&self.fen());
        Ok(())
    }

    /// Lets the engine pick and play its own reply. Returns the move
    /// played, or `None` if it had no legal move (the driver should have
    /// already checked [`Game::situation`] before calling this).
    pub fn play_engine_move(&mut self) -> Option<(Square, Target)> {
        let chosen = eval::choose_move(&mut self.board)?;
        let (from, target) = chosen;
        makemove::make(&mut self.board, from, target).expect("chooser returned an illegal move");
        self.repetition.record(&self.fen());
        Some((from, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::{File, Rank};

    #[test]
    fn promotion_scenario_s5() {
        let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        game.apply_move(
            Square::new(File::A, Rank::R7),
            Square::new(File::A, Rank::R8),
            Some(PieceKind::Queen),
        )
        .unwrap();
        assert!(game.fen().starts_with("Q3k3/8/"));
        assert_eq!(game.board().en_passant, None);
        assert_eq!(game.board().half_move_clock, 0);
    }

    #[test]
    fn en_passant_scenario_s6() {
        let mut game =
            Game::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        game.apply_move(Square::new(File::E, Rank::R5), Square::new(File::D, Rank::R6), None)
            .unwrap();
        assert!(game.board().piece_at(Square::new(File::D, Rank::R5)).is_none());
        assert_eq!(game.board().en_passant, None);
        assert_eq!(game.board().half_move_clock, 0);
    }

    #[test]
    fn threefold_repetition_is_detected() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        for _ in 0..2 {
            game.apply_move(Square::new(File::E, Rank::R1), Square::new(File::F, Rank::R1), None)
                .unwrap();
            game.apply_move(Square::new(File::E, Rank::R8), Square::new(File::F, Rank::R8), None)
                .unwrap();
            game.apply_move(Square::new(File::F, Rank::R1), Square::new(File::E, Rank::R1), None)
                .unwrap();
            game.apply_move(Square::new(File::F, Rank::R8), Square::new(File::E, Rank::R8), None)
                .unwrap();
        }
        assert_eq!(game.situation(), Situation::Threefold);
    }
}
