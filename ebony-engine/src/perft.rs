//! Perft: counts the legal move tree below a position to a given depth.
//! Not part of the external protocol; a correctness and performance
//! cross-check for the move generator.

use crate::board::Board;
use crate::makemove;

/// Counts the number of legal move sequences of length `depth` from the
/// current position.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let color = board.side_to_move;
    let candidates: Vec<_> = board
        .pieces_of(color)
        .map(|(square, _)| (square, board.move_list(square).iter().copied().collect::<Vec<_>>()))
        .collect();

    let mut nodes = 0u64;
    for (from, targets) in candidates {
        for target in targets {
            let record = makemove::make(board, from, target).expect("legal move must apply");
            nodes += perft(board, depth - 1);
            makemove::undo(board, record);
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse;

    #[test]
    fn perft_start_position_depth_1() {
        let mut board = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(perft(&mut board, 1), 20);
    }

    #[test]
    fn perft_start_position_depth_2() {
        let mut board = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(perft(&mut board, 2), 400);
    }
}
