//! Applying a chosen legal move to a board, and reversing it exactly.

use crate::board::Board;
use crate::coretypes::{Castling, Color, File, MoveCount, Piece, PieceKind, Rank, Square, Target, TargetKind};
use crate::error::{Error, ErrorKind};

/// Everything `undo` needs to put a board back exactly the way `make`
/// found it. Deliberately a small copy-out record rather than a deep
/// clone of the board or its pieces.
#[derive(Debug, Clone, Copy)]
pub struct UndoRecord {
    from: Square,
    to: Square,
    /// The piece as it stood on `from` before the move — its pre-promotion
    /// identity when the move was a promotion.
    moved_piece: Piece,
    /// The piece captured by this move (normal capture or en passant), and
    /// the square it occupied (which differs from `to` for en passant).
    captured: Option<(Square, Piece)>,
    /// `(rook_from, rook_to)` if this move was a castle, so undo can slide
    /// the rook back.
    rook_castle: Option<(Square, Square)>,
    prev_en_passant: Option<Square>,
    prev_castling: Castling,
    prev_half_move_clock: MoveCount,
    prev_full_move_number: MoveCount,
}

fn castle_rook_move(color: Color, kingside: bool) -> (Square, Square) {
    match (color, kingside) {
        (Color::White, true) => (Square::new(File::H, Rank::R1), Square::new(File::F, Rank::R1)),
        (Color::White, false) => (Square::new(File::A, Rank::R1), Square::new(File::D, Rank::R1)),
        (Color::Black, true) => (Square::new(File::H, Rank::R8), Square::new(File::F, Rank::R8)),
        (Color::Black, false) => (Square::new(File::A, Rank::R8), Square::new(File::D, Rank::R8)),
    }
}

fn home_corner_right(square: Square) -> Option<Castling> {
    use File::*;
    use Rank::*;
    match (square.file, square.rank) {
        (A, R1) => Some(Castling::W_QUEEN),
        (H, R1) => Some(Castling::W_KING),
        (A, R8) => Some(Castling::B_QUEEN),
        (H, R8) => Some(Castling::B_KING),
        _ => None,
    }
}

/// Mutates `board` per a chosen `target` of the piece standing on `from`,
/// without recomputing anyone's legal-move lists. Used both by the public,
/// list-recomputing [`make`] and internally by the self-check filter,
/// which only needs accurate occupancy and king locations, not move lists,
/// to query the attack oracle.
pub(crate) fn make_raw(board: &mut Board, from: Square, target: Target) -> UndoRecord {
    let moved_piece = board.piece_at(from).expect("make_raw called with empty `from` square");
    let to = target.square;

    let prev_en_passant = board.en_passant;
    let prev_castling = board.castling;
    let prev_half_move_clock = board.half_move_clock;
    let prev_full_move_number = board.full_move_number;

    board.en_passant = None;

    if moved_piece.kind() == PieceKind::King {
        board.castling.clear_color(moved_piece.color());
    }
    if moved_piece.kind() == PieceKind::Rook {
        if let Some(right) = home_corner_right(from) {
            board.castling.clear(right);
        }
    }

    let captured = match target.kind {
        TargetKind::Capture | TargetKind::CapturePromotion(_) => {
            let piece = board.piece_at(to).expect("capture target has no piece");
            if let Some(right) = home_corner_right(to) {
                board.castling.clear(right);
            }
            Some((to, piece))
        }
        TargetKind::EnPassant => {
            let captured_square = Square::new(to.file, from.rank);
            let piece = board.piece_at(captured_square).expect("en passant target has no pawn");
            Some((captured_square, piece))
        }
        _ => None,
    };

    let is_castle = moved_piece.kind() == PieceKind::King
        && (to.file.idx() as i16 - from.file.idx() as i16).abs() == 2;
    let rook_castle = if is_castle {
        let kingside = to.file.idx() > from.file.idx();
        let (rook_from, rook_to) = castle_rook_move(moved_piece.color(), kingside);
        board.set_piece(rook_from, None);
        board.set_piece(rook_to, Some(Piece::new(moved_piece.color(), PieceKind::Rook)));
        Some((rook_from, rook_to))
    } else {
        None
    };

    let is_pawn = moved_piece.kind() == PieceKind::Pawn;
    let is_double_push = is_pawn && (to.rank.idx() as i16 - from.rank.idx() as i16).abs() == 2;

    if let Some((captured_square, _)) = captured {
        board.set_piece(captured_square, None);
        board.half_move_clock = 0;
    } else if is_double_push {
        let mid_rank = Rank::from_u8((from.rank.idx() + to.rank.idx()) / 2).expect("mid rank valid");
        board.en_passant = Some(Square::new(from.file, mid_rank));
        board.half_move_clock = 0;
    } else if is_pawn {
        board.half_move_clock = 0;
    } else {
        board.half_move_clock += 1;
    }

    board.set_piece(from, None);
    let final_piece = match target.kind.promotion() {
        Some(promotion_kind) => Piece::new(moved_piece.color(), promotion_kind),
        None => moved_piece,
    };
    board.set_piece(to, Some(final_piece));

    if moved_piece.color() == Color::Black {
        board.full_move_number += 1;
    }
    board.side_to_move = !board.side_to_move;

    UndoRecord {
        from,
        to,
        moved_piece,
        captured,
        rook_castle,
        prev_en_passant,
        prev_castling,
        prev_half_move_clock,
        prev_full_move_number,
    }
}

/// Reverses a `make_raw` call exactly, without recomputing move lists.
pub(crate) fn undo_raw(board: &mut Board, record: UndoRecord) {
    board.side_to_move = !board.side_to_move;
    board.full_move_number = record.prev_full_move_number;
    board.half_move_clock = record.prev_half_move_clock;
    board.castling = record.prev_castling;
    board.en_passant = record.prev_en_passant;

    board.set_piece(record.to, None);
    board.set_piece(record.from, Some(record.moved_piece));

    if let Some((rook_from, rook_to)) = record.rook_castle {
        board.set_piece(rook_to, None);
        board.set_piece(rook_from, Some(Piece::new(record.moved_piece.color(), PieceKind::Rook)));
    }

    if let Some((captured_square, captured_piece)) = record.captured {
        board.set_piece(captured_square, Some(captured_piece));
    }
}

/// Applies the move `from -> target.square` for the piece on `from`,
/// which must appear in that piece's current legal-move list. On success,
/// recomputes legal moves for the new side to move and returns the
/// [`UndoRecord`] needed to reverse it.
pub fn make(board: &mut Board, from: Square, target: Target) -> Result<UndoRecord, Error> {
    if board.piece_at(from).is_none() {
        return Err(ErrorKind::NoPieceOnSquare.into());
    }
    if board.move_list(from).binary_search(&target).is_err() {
        return Err(ErrorKind::IllegalMove.into());
    }
    let record = make_raw(board, from, target);
    let next_to_move = board.side_to_move;
    board.refresh_legal_moves(next_to_move);
    Ok(record)
}

/// Reverses a move produced by [`make`], restoring the outgoing side's
/// legal-move lists along with every other field `make` touched.
pub fn undo(board: &mut Board, record: UndoRecord) {
    let mover = record.moved_piece.color();
    undo_raw(board, record);
    board.refresh_legal_moves(mover);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::TargetKind;
    use crate::fen::{emit, parse};

    #[test]
    fn make_undo_roundtrip_quiet_move() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let mut board = parse(fen).unwrap();
        let from = Square::new(File::E, Rank::R2);
        let to = Square::new(File::E, Rank::R4);
        let record = make(&mut board, from, Target::new(to, TargetKind::Quiet)).unwrap();
        assert_eq!(board.en_passant, Some(Square::new(File::E, Rank::R3)));
        assert_eq!(board.half_move_clock, 0);
        undo(&mut board, record);
        assert_eq!(emit(&board), fen);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut board = parse(fen).unwrap();
        let from = Square::new(File::E, Rank::R1);
        let to = Square::new(File::G, Rank::R1);
        let record = make(&mut board, from, Target::new(to, TargetKind::Quiet)).unwrap();
        assert_eq!(board.piece_at(Square::new(File::F, Rank::R1)).unwrap().kind(), PieceKind::Rook);
        assert!(board.piece_at(Square::new(File::H, Rank::R1)).is_none());
        assert!(!board.castling.has(Castling::W_KING));
        assert!(!board.castling.has(Castling::W_QUEEN));
        undo(&mut board, record);
        assert_eq!(emit(&board), fen);
    }

    #[test]
    fn en_passant_capture_removes_correct_pawn() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let mut board = parse(fen).unwrap();
        let from = Square::new(File::E, Rank::R5);
        let to = Square::new(File::D, Rank::R6);
        let record = make(&mut board, from, Target::new(to, TargetKind::EnPassant)).unwrap();
        assert!(board.piece_at(Square::new(File::D, Rank::R5)).is_none());
        assert_eq!(board.en_passant, None);
        undo(&mut board, record);
        assert_eq!(emit(&board), fen);
    }

    #[test]
    fn promotion_replaces_pawn_identity() {
        let fen = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        let mut board = parse(fen).unwrap();
        let from = Square::new(File::A, Rank::R7);
        let to = Square::new(File::A, Rank::R8);
        let record =
            make(&mut board, from, Target::new(to, TargetKind::Promotion(PieceKind::Queen)))
                .unwrap();
        assert_eq!(board.piece_at(to).unwrap().kind(), PieceKind::Queen);
        undo(&mut board, record);
        assert_eq!(emit(&board), fen);
    }
}
