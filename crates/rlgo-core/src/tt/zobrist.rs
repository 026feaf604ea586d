//! 局面和の Zobrist ハッシュ
//!
//! 有効な部分局面を整列して1本の列につなげ、位置ごとの乱数を XOR する。
//! 各部分局面の後ろには区切り用の乱数を入れる。
//!
//! ```text
//! [.x.] [.o]  ->  E@0 ^ L@1 ^ E@2 ^ S@3 ^ E@4 ^ R@5 ^ S@6
//! ```

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::Board;
use crate::types::Cell;

/// 既定の位置数。これを超える位置は先頭に巻き戻して使う
pub const DEFAULT_SLOTS: usize = 4096;

/// 乱数の固定シード
pub const ZOBRIST_SEED: u64 = 2024;

/// 区切りの行番号
const SEPARATOR: usize = Cell::NUM;

/// Zobrist 乱数表
pub struct ZobristTable {
    /// \[セル種別 + 区切り\]\[位置\]
    table: [Vec<u64>; Cell::NUM + 1],
    slots: usize,
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristTable {
    pub fn new() -> Self {
        Self::with_slots(DEFAULT_SLOTS)
    }

    /// 位置数を指定して作る
    pub fn with_slots(slots: usize) -> Self {
        assert!(slots > 0);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(ZOBRIST_SEED);
        let table = std::array::from_fn(|_| (0..slots).map(|_| rng.random()).collect());
        Self { table, slots }
    }

    #[inline]
    pub fn cell_hash(&self, cell: Cell, pos: usize) -> u64 {
        self.table[cell.index()][pos % self.slots]
    }

    #[inline]
    pub fn separator_hash(&self, pos: usize) -> u64 {
        self.table[SEPARATOR][pos % self.slots]
    }

    /// 盤面列のハッシュ。呼び出し側で整列済みであること
    pub fn hash_boards<'a, I>(&self, boards: I) -> u64
    where
        I: IntoIterator<Item = &'a Board>,
    {
        let mut hash = 0;
        let mut pos = 0;
        for board in boards {
            for &cell in board.cells() {
                hash ^= self.cell_hash(cell, pos);
                pos += 1;
            }
            hash ^= self.separator_hash(pos);
            pos += 1;
        }
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_deterministic() {
        let a = ZobristTable::new();
        let b2 = ZobristTable::new();
        let boards = [b(".x."), b("..o")];
        assert_eq!(a.hash_boards(&boards), b2.hash_boards(&boards));
    }

    #[test]
    fn test_separator_distinguishes_splits() {
        let z = ZobristTable::new();
        let joined = [b(".x..")];
        let split = [b(".x"), b("..")];
        assert_ne!(z.hash_boards(&joined), z.hash_boards(&split));
        assert_eq!(z.hash_boards(std::iter::empty()), 0);
    }

    #[test]
    fn test_order_matters() {
        let z = ZobristTable::new();
        let ab = [b(".x"), b("o.")];
        let ba = [b("o."), b(".x")];
        assert_ne!(z.hash_boards(&ab), z.hash_boards(&ba));
    }

    #[test]
    fn test_positions_wrap() {
        let z = ZobristTable::with_slots(4);
        assert_eq!(z.cell_hash(Cell::Left, 1), z.cell_hash(Cell::Left, 5));
        assert_eq!(z.separator_hash(0), z.separator_hash(8));
    }
}
