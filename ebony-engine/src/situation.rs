//! Classifies the current position as ongoing play or one of the
//! terminal conditions, in the order the rules require them to be
//! checked.

use crate::attacks;
use crate::board::Board;
use crate::coretypes::{Color, PieceKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Situation {
    Play,
    Checkmate(Color),
    Stalemate,
    Fifty,
    InsufficientMaterial,
    Threefold,
}

/// The fifty-move threshold, counted here in plies as the original source
/// does — not FIDE's 100-ply (50 full move) rule.
pub const FIFTY_MOVE_PLIES: u16 = 50;

/// Decides the game's situation. `repetition_count` is the current
/// position's prefix occurrence count as tracked by
/// [`crate::repetition::RepetitionTable`].
pub fn classify(board: &Board, repetition_count: u32) -> Situation {
    if repetition_count > 2 {
        return Situation::Threefold;
    }

    if board.n_pieces() <= 3
        && board
            .occupied()
            .filter(|(_, piece)| piece.kind() != PieceKind::King)
            .all(|(_, piece)| matches!(piece.kind(), PieceKind::Bishop | PieceKind::Knight))
    {
        return Situation::InsufficientMaterial;
    }

    let side = board.side_to_move;
    let has_legal_move = board.pieces_of(side).any(|(square, _)| !board.move_list(square).is_empty());
    if !has_legal_move {
        let king_square = board.king_square(side);
        return if attacks::is_attacked(board, king_square, !side) {
            Situation::Checkmate(!side)
        } else {
            Situation::Stalemate
        };
    }

    if board.half_move_clock >= FIFTY_MOVE_PLIES {
        return Situation::Fifty;
    }

    Situation::Play
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse;

    #[test]
    fn fools_mate_is_checkmate_for_black() {
        let board =
            parse("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert_eq!(classify(&board, 1), Situation::Checkmate(Color::Black));
    }

    #[test]
    fn king_and_queen_vs_king_is_stalemate() {
        let board = parse("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(classify(&board, 1), Situation::Stalemate);
    }

    #[test]
    fn king_and_knight_vs_king_is_insufficient_material() {
        let board = parse("8/8/8/4k3/8/4K3/4N3/8 w - - 0 1").unwrap();
        assert_eq!(classify(&board, 1), Situation::InsufficientMaterial);
    }

    #[test]
    fn clock_at_fifty_plies_with_moves_available_is_a_draw() {
        let board = parse("4k3/8/8/8/8/8/8/4K3 w - - 50 30").unwrap();
        assert_eq!(classify(&board, 1), Situation::Fifty);
    }

    #[test]
    fn ongoing_start_position_is_play() {
        let board = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(classify(&board, 1), Situation::Play);
    }
}
