//! The board: 8x8 occupancy plus the bookkeeping fields a position needs
//! (side to move, castling rights, en passant target, clocks, king
//! locations, and piece count).

use std::fmt::{self, Display};

use arrayvec::ArrayVec;

use crate::coretypes::{
    Castling, Color, MoveCount, Piece, PieceKind, Square, Target, MAX_PIECE_MOVES, NUM_FILES,
    NUM_RANKS, NUM_SQUARES,
};

pub type MoveList = ArrayVec<Target, MAX_PIECE_MOVES>;

/// A complete chess position.
///
/// Each occupied square also owns a sorted list of the legal targets for
/// the piece standing there; the lists are only current for the side
/// whose turn it is (see [`Board::refresh_legal_moves`]), mirroring the
/// "pieces own their moves, recomputed on their own turn" model of §3/§4.1.
#[derive(Debug, Clone)]
pub struct Board {
    mailbox: [Option<Piece>; NUM_SQUARES],
    move_lists: [MoveList; NUM_SQUARES],
    white_king: Square,
    black_king: Square,
    n_pieces: u32,
    pub castling: Castling,
    pub en_passant: Option<Square>,
    pub half_move_clock: MoveCount,
    pub full_move_number: MoveCount,
    pub side_to_move: Color,
}

impl Board {
    /// An empty board with no kings placed. Only useful as a staging area
    /// for `Fen::parse`, which immediately places both kings.
    pub(crate) fn empty() -> Self {
        Board {
            mailbox: [None; NUM_SQUARES],
            move_lists: [(); NUM_SQUARES].map(|_| MoveList::new()),
            white_king: Square::new(crate::coretypes::File::A, crate::coretypes::Rank::R1),
            black_king: Square::new(crate::coretypes::File::A, crate::coretypes::Rank::R1),
            n_pieces: 0,
            castling: Castling::NONE,
            en_passant: None,
            half_move_clock: 0,
            full_move_number: 1,
            side_to_move: Color::White,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.idx()]
    }

    /// Places `piece` on `square`, updating king locators and the piece
    /// count. Does not touch move lists; callers recompute those via
    /// [`Board::refresh_legal_moves`].
    pub(crate) fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        let was_occupied = self.mailbox[square.idx()].is_some();
        if let Some(p) = piece {
            if p.kind() == PieceKind::King {
                match p.color() {
                    Color::White => self.white_king = square,
                    Color::Black => self.black_king = square,
                }
            }
            if !was_occupied {
                self.n_pieces += 1;
            }
        } else if was_occupied {
            self.n_pieces -= 1;
        }
        self.mailbox[square.idx()] = piece;
    }

    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    pub fn n_pieces(&self) -> u32 {
        self.n_pieces
    }

    pub fn move_list(&self, square: Square) -> &MoveList {
        &self.move_lists[square.idx()]
    }

    pub(crate) fn set_move_list(&mut self, square: Square, list: MoveList) {
        self.move_lists[square.idx()] = list;
    }

    pub(crate) fn clear_move_list(&mut self, square: Square) {
        self.move_lists[square.idx()].clear();
    }

    /// Every occupied square, as `(square, piece)` pairs, in canonical
    /// (file-major) board order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..NUM_SQUARES).filter_map(|idx| {
            let square = Square::from_idx(idx).expect("idx in range");
            self.mailbox[idx].map(|piece| (square, piece))
        })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color() == color)
    }

    /// Recomputes and installs legal-move lists for every piece belonging
    /// to `color`, and clears lists for every other square so stale
    /// entries from the previous side's turn cannot be queried.
    pub fn refresh_legal_moves(&mut self, color: Color) {
        for idx in 0..NUM_SQUARES {
            match self.mailbox[idx] {
                Some(piece) if piece.color() == color => {
                    let square = Square::from_idx(idx).expect("idx in range");
                    let mut list = crate::movegen::generate(self, square, piece, true);
                    list.sort_unstable();
                    self.move_lists[idx] = list;
                }
                _ => self.move_lists[idx].clear(),
            }
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::with_capacity(NUM_SQUARES + NUM_RANKS);
        for rank in (0..NUM_RANKS).rev() {
            for file in 0..NUM_FILES {
                let square = Square::new(
                    crate::coretypes::File::from_u8(file as u8).unwrap(),
                    crate::coretypes::Rank::from_u8(rank as u8).unwrap(),
                );
                s.push(match self.piece_at(square) {
                    Some(piece) => char::from(piece),
                    None => '.',
                });
            }
            s.push('\n');
        }
        s.pop();
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    #[test]
    fn start_position_king_squares() {
        let fen: Fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .unwrap();
        let board = fen.into_board().unwrap();
        assert_eq!(board.king_square(Color::White).to_string(), "e1");
        assert_eq!(board.king_square(Color::Black).to_string(), "e8");
        assert_eq!(board.n_pieces(), 32);
    }
}
