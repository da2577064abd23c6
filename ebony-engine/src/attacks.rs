//! The attack oracle: "is square `S` attacked by color `C`?"
//!
//! Rather than scanning outward from every enemy piece, a hypothetical
//! piece of the *defending* color is placed on `S` for each non-queen
//! kind, its pseudo-moves are generated with no self-check filtering, and
//! each candidate capture is checked against the real board for a
//! matching attacker. A bishop-ray hit covers bishops and queens; a
//! rook-ray hit covers rooks and queens.

use crate::board::Board;
use crate::coretypes::{Color, Piece, PieceKind, Square};
use crate::movegen;

const ORACLE_KINDS: [PieceKind; 5] =
    [PieceKind::Pawn, PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::King];

fn matching_attacker_kind(oracle_kind: PieceKind, occupant_kind: PieceKind) -> bool {
    match oracle_kind {
        PieceKind::Bishop => occupant_kind == PieceKind::Bishop || occupant_kind == PieceKind::Queen,
        PieceKind::Rook => occupant_kind == PieceKind::Rook || occupant_kind == PieceKind::Queen,
        other => occupant_kind == other,
    }
}

/// Is `square` attacked by a piece of color `attacker`?
pub fn is_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    let defender = !attacker;
    for oracle_kind in ORACLE_KINDS {
        let hypothetical = Piece::new(defender, oracle_kind);
        let pseudo = movegen::pseudo_moves(board, square, hypothetical, false);
        for target in pseudo {
            if !target.kind.is_capture() {
                continue;
            }
            if let Some(occupant) = board.piece_at(target.square) {
                if occupant.color() == attacker && matching_attacker_kind(oracle_kind, occupant.kind())
                {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse;

    #[test]
    fn rook_attacks_along_open_file() {
        let board = parse("8/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        assert!(is_attacked(&board, Square::new(crate::coretypes::File::E, crate::coretypes::Rank::R1), Color::Black));
    }

    #[test]
    fn knight_attack_from_fork_square() {
        let board = parse("8/8/8/3n4/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(is_attacked(&board, Square::new(crate::coretypes::File::E, crate::coretypes::Rank::R1), Color::Black));
    }

    #[test]
    fn pawn_attacks_diagonally_only() {
        // Black pawn on e5 attacks d4 and f4, not e4.
        let board = parse("8/8/8/4p3/8/8/8/4K3 w - - 0 1").unwrap();
        use crate::coretypes::{File, Rank};
        assert!(is_attacked(&board, Square::new(File::D, Rank::R4), Color::Black));
        assert!(is_attacked(&board, Square::new(File::F, Rank::R4), Color::Black));
        assert!(!is_attacked(&board, Square::new(File::E, Rank::R4), Color::Black));
    }

    #[test]
    fn queen_counts_for_both_ray_kinds() {
        use crate::coretypes::{File, Rank};
        let board = parse("8/8/8/8/8/8/8/4K2q w - - 0 1").unwrap();
        assert!(is_attacked(&board, Square::new(File::E, Rank::R1), Color::Black));
    }
}
