//! Forsyth-Edwards Notation: parsing a starting position and emitting the
//! canonical FEN of any reachable one.

use std::convert::TryFrom;
use std::error;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::board::Board;
use crate::coretypes::{Castling, Color, File, Piece, Rank, Square, NUM_FILES, NUM_RANKS};

/// Error produced while parsing a FEN string.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseFenError(String);

impl ParseFenError {
    fn new<S: Into<String>>(message: S) -> Self {
        ParseFenError(message.into())
    }
}

impl Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid fen: {}", self.0)
    }
}

impl error::Error for ParseFenError {}

impl From<crate::error::Error> for ParseFenError {
    fn from(err: crate::error::Error) -> Self {
        ParseFenError::new(err.to_string())
    }
}

/// A FEN string, not yet decoded into a [`Board`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Fen(String);

impl Fen {
    /// Decodes the FEN into a fully-formed board, with the side to move's
    /// legal-move lists already populated.
    pub fn into_board(self) -> Result<Board, ParseFenError> {
        parse(&self.0)
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field_count = s.split_whitespace().count();
        if field_count != 6 {
            return Err(ParseFenError::new(format!(
                "expected 6 space-separated fields, found {field_count}"
            )));
        }
        Ok(Fen(s.to_string()))
    }
}

impl Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a complete FEN string into a [`Board`].
pub fn parse(fen: &str) -> Result<Board, ParseFenError> {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().ok_or_else(|| ParseFenError::new("missing placement field"))?;
    let side = fields.next().ok_or_else(|| ParseFenError::new("missing side field"))?;
    let castling = fields.next().ok_or_else(|| ParseFenError::new("missing castling field"))?;
    let en_passant = fields.next().ok_or_else(|| ParseFenError::new("missing en passant field"))?;
    let half_move = fields.next().ok_or_else(|| ParseFenError::new("missing half-move field"))?;
    let full_move = fields.next().ok_or_else(|| ParseFenError::new("missing full-move field"))?;
    if fields.next().is_some() {
        return Err(ParseFenError::new("too many fields"));
    }

    let mut board = Board::empty();

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != NUM_RANKS {
        return Err(ParseFenError::new(format!(
            "placement must have {NUM_RANKS} ranks, found {}",
            ranks.len()
        )));
    }
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank_idx = NUM_RANKS - 1 - rank_from_top;
        let rank = Rank::from_u8(rank_idx as u8).expect("rank_idx in range");
        let mut file_idx = 0usize;
        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10) {
                file_idx += skip as usize;
            } else {
                if file_idx >= NUM_FILES {
                    return Err(ParseFenError::new("rank overflows 8 files"));
                }
                let file = File::from_u8(file_idx as u8).expect("file_idx in range");
                let piece = Piece::try_from(ch).map_err(ParseFenError::from)?;
                board.set_piece(Square::new(file, rank), Some(piece));
                file_idx += 1;
            }
        }
        if file_idx != NUM_FILES {
            return Err(ParseFenError::new("rank does not sum to 8 files"));
        }
    }

    board.side_to_move = Color::try_from(
        side.chars().next().ok_or_else(|| ParseFenError::new("empty side field"))?,
    )
    .map_err(ParseFenError::from)?;
    if side.len() != 1 {
        return Err(ParseFenError::new("side field must be a single character"));
    }

    board.castling = castling.parse::<Castling>().map_err(ParseFenError::from)?;

    board.en_passant = if en_passant == "-" {
        None
    } else {
        Some(en_passant.parse::<Square>().map_err(ParseFenError::from)?)
    };

    board.half_move_clock =
        half_move.parse().map_err(|_| ParseFenError::new("half-move clock is not an integer"))?;
    board.full_move_number =
        full_move.parse().map_err(|_| ParseFenError::new("full-move number is not an integer"))?;

    let side_to_move = board.side_to_move;
    board.refresh_legal_moves(side_to_move);

    Ok(board)
}

/// Emits the canonical FEN of `board`.
pub fn emit(board: &Board) -> String {
    let mut s = String::with_capacity(64);

    for rank_idx in (0..NUM_RANKS).rev() {
        let rank = Rank::from_u8(rank_idx as u8).expect("rank_idx in range");
        let mut empty_run = 0u8;
        for file_idx in 0..NUM_FILES {
            let file = File::from_u8(file_idx as u8).expect("file_idx in range");
            match board.piece_at(Square::new(file, rank)) {
                Some(piece) => {
                    if empty_run > 0 {
                        s.push((b'0' + empty_run) as char);
                        empty_run = 0;
                    }
                    s.push(char::from(piece));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            s.push((b'0' + empty_run) as char);
        }
        if rank_idx > 0 {
            s.push('/');
        }
    }

    s.push(' ');
    s.push(board.side_to_move.to_char());

    s.push(' ');
    s.push_str(&board.castling.to_string());

    s.push(' ');
    match board.en_passant {
        Some(square) => s.push_str(&square.to_string()),
        None => s.push('-'),
    }

    s.push(' ');
    s.push_str(&board.half_move_clock.to_string());

    s.push(' ');
    s.push_str(&board.full_move_number.to_string());

    s
}

/// The position-identifying prefix of a FEN: the first four
/// space-separated fields (placement, side, castling, en passant),
/// joined by single spaces. This is the key the repetition table hashes.
pub fn position_prefix(fen: &str) -> &str {
    let mut seen_spaces = 0;
    for (idx, ch) in fen.char_indices() {
        if ch == ' ' {
            seen_spaces += 1;
            if seen_spaces == 4 {
                return &fen[..idx];
            }
        }
    }
    fen
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn parse_emit_roundtrip_start_position() {
        let board = parse(START).unwrap();
        assert_eq!(emit(&board), START);
    }

    #[test]
    fn parse_emit_roundtrip_with_en_passant() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let board = parse(fen).unwrap();
        assert_eq!(emit(&board), fen);
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        assert!(parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").is_err());
    }

    #[test]
    fn parse_rejects_short_rank() {
        assert!(parse("rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
    }

    #[test]
    fn position_prefix_stops_before_fourth_space() {
        let fen = "8/8/8/8/8/8/8/8 w - - 0 1";
        assert_eq!(position_prefix(fen), "8/8/8/8/8/8/8/8 w - -");
    }
}
