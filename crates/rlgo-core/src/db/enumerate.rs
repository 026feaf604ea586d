//! 盤面の番号付け
//!
//! 空点 k 個の盤面を「k 個の空点で区切られた k+1 個のスロット」と見なす。
//! 各スロットは {石なし, x, o} の3値で、右端のスロットを最下位桁とする
//! 3進数が盤面の番号になる。レベル k のエントリ数は 3^(k+1)。
//!
//! ```text
//! 番号 0..9 (k = 1):  .  .x  .o  x.  x.x  x.o  o.  o.x  o.o
//! ```

use crate::board::Board;
use crate::types::Cell;

/// スロット値 → 石
#[inline]
fn slot_cell(digit: u8) -> Option<Cell> {
    match digit {
        1 => Some(Cell::Left),
        2 => Some(Cell::Right),
        _ => None,
    }
}

/// レベル k（空点 k 個）のエントリ数
#[inline]
pub const fn level_size(num_empty: usize) -> usize {
    3usize.pow(num_empty as u32 + 1)
}

/// スロット列から盤面を組み立てる
fn assemble(slots: &[u8]) -> Board {
    let mut board = Board::new();
    for (i, &digit) in slots.iter().enumerate() {
        if i > 0 {
            board.push(Cell::Empty);
        }
        if let Some(cell) = slot_cell(digit) {
            board.push(cell);
        }
    }
    board
}

/// レベル内の番号から盤面を復元する
pub fn unrank(num_empty: usize, index: usize) -> Board {
    debug_assert!(index < level_size(num_empty));
    let mut slots = [0u8; super::MAX_SUPPORTED_EMPTY + 1];
    let mut rest = index;
    for slot in slots[..=num_empty].iter_mut().rev() {
        *slot = (rest % 3) as u8;
        rest /= 3;
    }
    assemble(&slots[..=num_empty])
}

/// 盤面のレベル内番号
///
/// スロット形でない盤面（石が隣接している）は `None`。
/// 空点数が `max_empty` を超える場合も `None`。
pub fn rank(board: &Board, max_empty: usize) -> Option<(usize, usize)> {
    let num_empty = board.empty_count();
    if num_empty == 0 || num_empty > max_empty {
        return None;
    }

    let mut code = 0usize;
    let mut digits = 0usize;
    let mut previous = Cell::Empty;
    for &cell in board.cells() {
        let digit = match cell {
            Cell::Empty if previous.is_empty() => Some(0),
            Cell::Empty => None,
            Cell::Left => Some(1),
            Cell::Right => Some(2),
        };
        if let Some(d) = digit {
            digits += 1;
            if digits > num_empty + 1 {
                return None;
            }
            code = code * 3 + d;
        }
        previous = cell;
    }
    if previous.is_empty() {
        code *= 3;
        digits += 1;
    }

    (digits == num_empty + 1).then_some((num_empty, code))
}

/// レベル k の盤面を番号順に列挙する
///
/// スロット列を右端から繰り上げる3進カウンタ。DB構築とロード時の盤面
/// 再構成の両方で使う。
pub struct LevelBoards {
    slots: [u8; super::MAX_SUPPORTED_EMPTY + 1],
    num_slots: usize,
    remaining: usize,
}

impl LevelBoards {
    pub fn new(num_empty: usize) -> Self {
        assert!(num_empty <= super::MAX_SUPPORTED_EMPTY);
        Self {
            slots: [0; super::MAX_SUPPORTED_EMPTY + 1],
            num_slots: num_empty + 1,
            remaining: level_size(num_empty),
        }
    }

    fn advance(&mut self) {
        for slot in self.slots[..self.num_slots].iter_mut().rev() {
            if *slot < 2 {
                *slot += 1;
                return;
            }
            *slot = 0;
        }
    }
}

impl Iterator for LevelBoards {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        if self.remaining == 0 {
            return None;
        }
        let board = assemble(&self.slots[..self.num_slots]);
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(board)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LevelBoards {}
