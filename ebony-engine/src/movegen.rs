//! Per-kind pseudo-legal move generation, filtered by a self-check test.
//!
//! Each generator is dispatched on [`PieceKind`] rather than through a
//! per-piece function pointer. When `check_safety` is `true`, every
//! candidate is additionally tested by tentatively making the move,
//! querying the attack oracle against the mover's own king, and undoing
//! it; candidates that leave the king attacked are discarded. The attack
//! oracle itself calls back in here with `check_safety = false` to
//! generate hypothetical-piece pseudo-attacks, so that path must never
//! recurse into the safety filter.

use crate::attacks;
use crate::board::{Board, MoveList};
use crate::coretypes::{Castling, Color, File, Piece, PieceKind, Rank, Square, Target, TargetKind};
use crate::makemove;

const KNIGHT_DELTAS: [(i8, i8); 8] =
    [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];
const KING_DELTAS: [(i8, i8); 8] =
    [(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1)];
const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Generates every legal (or, with `check_safety = false`, pseudo-legal)
/// target for the `piece` standing on `square`.
pub fn generate(board: &mut Board, square: Square, piece: Piece, check_safety: bool) -> MoveList {
    let pseudo = pseudo_moves(board, square, piece, check_safety);
    if !check_safety {
        return pseudo;
    }
    let mut safe = MoveList::new();
    for target in pseudo {
        if leaves_king_safe(board, square, piece, target) {
            safe.push(target);
        }
    }
    safe
}

fn leaves_king_safe(board: &mut Board, from: Square, piece: Piece, target: Target) -> bool {
    let record = makemove::make_raw(board, from, target);
    let king_square = board.king_square(piece.color());
    let safe = !attacks::is_attacked(board, king_square, !piece.color());
    makemove::undo_raw(board, record);
    safe
}

pub(crate) fn pseudo_moves(board: &Board, square: Square, piece: Piece, check_safety: bool) -> MoveList {
    match piece.kind() {
        PieceKind::King => king_moves(board, square, piece.color(), check_safety),
        PieceKind::Queen => {
            let mut moves = slide(board, square, piece.color(), &BISHOP_RAYS);
            moves.extend(slide(board, square, piece.color(), &ROOK_RAYS));
            moves
        }
        PieceKind::Rook => slide(board, square, piece.color(), &ROOK_RAYS),
        PieceKind::Bishop => slide(board, square, piece.color(), &BISHOP_RAYS),
        PieceKind::Knight => jump(board, square, piece.color(), &KNIGHT_DELTAS),
        PieceKind::Pawn => pawn_moves(board, square, piece.color()),
    }
}

fn slide(board: &Board, square: Square, color: Color, rays: &[(i8, i8)]) -> MoveList {
    let mut moves = MoveList::new();
    for &(df, dr) in rays {
        let mut current = square;
        while let Some(next) = current.offset(df, dr) {
            match board.piece_at(next) {
                None => {
                    moves.push(Target::new(next, TargetKind::Quiet));
                    current = next;
                }
                Some(occupant) => {
                    if occupant.color() != color {
                        moves.push(Target::new(next, TargetKind::Capture));
                    }
                    break;
                }
            }
        }
    }
    moves
}

fn jump(board: &Board, square: Square, color: Color, deltas: &[(i8, i8)]) -> MoveList {
    let mut moves = MoveList::new();
    for &(df, dr) in deltas {
        if let Some(next) = square.offset(df, dr) {
            match board.piece_at(next) {
                None => moves.push(Target::new(next, TargetKind::Quiet)),
                Some(occupant) if occupant.color() != color => {
                    moves.push(Target::new(next, TargetKind::Capture))
                }
                Some(_) => {}
            }
        }
    }
    moves
}

fn king_moves(board: &Board, square: Square, color: Color, check_safety: bool) -> MoveList {
    let mut moves = jump(board, square, color, &KING_DELTAS);
    if check_safety {
        add_castling(board, square, color, &mut moves);
    }
    moves
}

fn add_castling(board: &Board, king_square: Square, color: Color, moves: &mut MoveList) {
    if attacks::is_attacked(board, king_square, !color) {
        return; // king already in check, castling never legal
    }
    let home_rank = match color {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    };
    if king_square.rank != home_rank || king_square.file != File::E {
        return;
    }

    let (king_right, queen_right) = match color {
        Color::White => (Castling::W_KING, Castling::W_QUEEN),
        Color::Black => (Castling::B_KING, Castling::B_QUEEN),
    };

    if board.castling.has(king_right) {
        let f = Square::new(File::F, home_rank);
        let g = Square::new(File::G, home_rank);
        if board.piece_at(f).is_none()
            && board.piece_at(g).is_none()
            && !attacks::is_attacked(board, f, !color)
        {
            moves.push(Target::new(g, TargetKind::Quiet));
        }
    }
    if board.castling.has(queen_right) {
        let b = Square::new(File::B, home_rank);
        let c = Square::new(File::C, home_rank);
        let d = Square::new(File::D, home_rank);
        if board.piece_at(b).is_none()
            && board.piece_at(c).is_none()
            && board.piece_at(d).is_none()
            && !attacks::is_attacked(board, d, !color)
        {
            moves.push(Target::new(c, TargetKind::Quiet));
        }
    }
}

fn pawn_moves(board: &Board, square: Square, color: Color) -> MoveList {
    let mut moves = MoveList::new();
    let (forward, start_rank, promotion_rank): (i8, Rank, Rank) = match color {
        Color::White => (1, Rank::R2, Rank::R8),
        Color::Black => (-1, Rank::R7, Rank::R1),
    };

    let push_targets = |dest: Square, is_capture: bool, moves: &mut MoveList| {
        if dest.rank == promotion_rank {
            for kind in PieceKind::PROMOTION_KINDS {
                let target_kind =
                    if is_capture { TargetKind::CapturePromotion(kind) } else { TargetKind::Promotion(kind) };
                moves.push(Target::new(dest, target_kind));
            }
        } else {
            let target_kind = if is_capture { TargetKind::Capture } else { TargetKind::Quiet };
            moves.push(Target::new(dest, target_kind));
        }
    };

    if let Some(one_ahead) = square.offset(0, forward) {
        if board.piece_at(one_ahead).is_none() {
            push_targets(one_ahead, false, &mut moves);
            if square.rank == start_rank {
                if let Some(two_ahead) = square.offset(0, forward * 2) {
                    if board.piece_at(two_ahead).is_none() {
                        moves.push(Target::new(two_ahead, TargetKind::Quiet));
                    }
                }
            }
        }
    }

    for df in [-1i8, 1] {
        if let Some(diag) = square.offset(df, forward) {
            if let Some(occupant) = board.piece_at(diag) {
                if occupant.color() != color {
                    push_targets(diag, true, &mut moves);
                }
            } else if board.en_passant == Some(diag) {
                moves.push(Target::new(diag, TargetKind::EnPassant));
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse;

    #[test]
    fn knight_start_position_has_two_jumps() {
        let mut board = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let b1 = Square::new(File::B, Rank::R1);
        let moves = generate(&mut board, b1, Piece::new(Color::White, PieceKind::Knight), true);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn king_cannot_move_into_check() {
        let mut board = parse("8/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        let e1 = Square::new(File::E, Rank::R1);
        let moves = generate(&mut board, e1, Piece::new(Color::White, PieceKind::King), true);
        // e1 is attacked along the e-file; king can only step off it sideways.
        assert!(moves.iter().all(|t| t.square.file != File::E));
    }

    #[test]
    fn castling_blocked_when_path_attacked() {
        let mut board = parse("r3k2r/8/8/8/8/4r3/8/R3K2R w KQkq - 0 1").unwrap();
        let e1 = Square::new(File::E, Rank::R1);
        let moves = generate(&mut board, e1, Piece::new(Color::White, PieceKind::King), true);
        let g1 = Square::new(File::G, Rank::R1);
        assert!(!moves.iter().any(|t| t.square == g1));
    }

    #[test]
    fn pawn_double_push_and_promotion_choices() {
        let mut board = parse("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let a7 = Square::new(File::A, Rank::R7);
        let moves = generate(&mut board, a7, Piece::new(Color::White, PieceKind::Pawn), true);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|t| t.square == Square::new(File::A, Rank::R8)));
    }
}
