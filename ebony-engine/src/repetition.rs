//! Threefold-repetition bookkeeping, keyed on the position-identifying
//! prefix of a position's FEN (placement, side to move, castling rights,
//! en passant target — the strict FIDE repetition key).
//!
//! A standard hashed map replaces the source's hand-rolled open-chained
//! bucket table; the "current" entry is remembered directly rather than
//! recovered through a bucket-and-chain pointer, for O(1) "how many times
//! has the current position occurred" queries.

use std::collections::HashMap;

use crate::fen::position_prefix;

struct RepetitionEntry {
    /// The full FEN this prefix was most recently recorded with.
    fen: String,
    count: u32,
}

/// Tracks how many times each position-identifying FEN prefix has been
/// seen so far in a game.
#[derive(Default)]
pub struct RepetitionTable {
    entries: HashMap<String, RepetitionEntry>,
    current_key: Option<String>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `fen`, bumping the occurrence count of its position prefix,
    /// and returns the resulting count (including this occurrence).
    pub fn record(&mut self, fen: &str) -> u32 {
        let key = position_prefix(fen).to_string();
        let entry = self.entries.entry(key.clone()).or_insert_with(|| RepetitionEntry {
            fen: fen.to_string(),
            count: 0,
        });
        entry.fen = fen.to_string();
        entry.count += 1;
        let count = entry.count;
        self.current_key = Some(key);
        count
    }

    /// The occurrence count of the most recently recorded position.
    pub fn current_count(&self) -> u32 {
        match &self.current_key {
            Some(key) => self.entries.get(key).map(|e| e.count).unwrap_or(0),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_positions_do_not_share_a_count() {
        let mut table = RepetitionTable::new();
        assert_eq!(table.record("8/8/8/8/8/8/8/8 w - - 0 1"), 1);
        assert_eq!(table.record("8/8/8/8/8/8/8/8 b - - 0 1"), 1);
        assert_eq!(table.current_count(), 1);
    }

    #[test]
    fn repeated_prefix_accumulates_regardless_of_clock() {
        let mut table = RepetitionTable::new();
        table.record("8/8/8/8/8/8/8/8 w - - 0 1");
        table.record("8/8/8/8/8/8/8/8 w - - 4 3");
        let count = table.record("8/8/8/8/8/8/8/8 w - - 9 5");
        assert_eq!(count, 3);
        assert_eq!(table.current_count(), 3);
    }
}
