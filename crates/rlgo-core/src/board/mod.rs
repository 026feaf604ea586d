//! 盤面表現（Board）
//!
//! 最大 `MAX_BOARD_LEN` マスの固定長配列。`Copy` で扱えるので、探索中の
//! 局面の複製はヒープ確保なしで行える。
//!
//! - `simplify`: 同色の連続石を1つにまとめる
//! - `split`: 隣接する異色石の境界で独立な部分盤面に分割する
//! - `canonical`: 自身と左右反転のうち辞書順で小さい方
//!
//! 未使用のマスは常に `Cell::Empty` に保つ（derive した `Eq`/`Hash` が
//! 有効長より後ろを区別しないための不変条件）。

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::types::Cell;

/// 盤面の最大長
pub const MAX_BOARD_LEN: usize = 64;

/// `split` の戻り値。ほとんどの局面は 1〜3 個に分かれる
pub type Segments = SmallVec<[Board; 4]>;

/// 一次元の盤面
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; MAX_BOARD_LEN],
    len: u8,
}

impl Board {
    /// 空（長さ0）の盤面
    pub const fn new() -> Self {
        Self {
            cells: [Cell::Empty; MAX_BOARD_LEN],
            len: 0,
        }
    }

    pub fn from_cells(cells: &[Cell]) -> Result<Self> {
        if cells.len() > MAX_BOARD_LEN {
            return Err(Error::BoardTooLong {
                len: cells.len(),
                max: MAX_BOARD_LEN,
            });
        }
        let mut board = Self::new();
        board.cells[..cells.len()].copy_from_slice(cells);
        board.len = cells.len() as u8;
        Ok(board)
    }

    /// 末尾にマスを追加
    #[inline]
    pub fn push(&mut self, cell: Cell) {
        assert!((self.len as usize) < MAX_BOARD_LEN, "board overflow");
        self.cells[self.len as usize] = cell;
        self.len += 1;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.cells[..self.len as usize].fill(Cell::Empty);
        self.len = 0;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells[..self.len as usize]
    }

    /// 空点の数
    pub fn empty_count(&self) -> usize {
        self.cells().iter().filter(|c| c.is_empty()).count()
    }

    /// 左右反転
    pub fn reverse(&self) -> Board {
        let mut reversed = *self;
        reversed.cells[..self.len as usize].reverse();
        reversed
    }

    /// 色反転（G -> -G）
    pub fn inverse(&self) -> Board {
        let mut inversed = *self;
        for cell in &mut inversed.cells[..self.len as usize] {
            *cell = cell.inverse();
        }
        inversed
    }

    /// 同色の連続石を1つにまとめる。空点同士はまとめない
    pub fn simplify(&self) -> Board {
        let mut simplified = Board::new();
        let mut previous: Option<Cell> = None;
        for &cell in self.cells() {
            if cell.is_empty() || previous != Some(cell) {
                simplified.push(cell);
            }
            previous = Some(cell);
        }
        simplified
    }

    /// 直前のマスと異色の石が現れた位置で分割する
    ///
    /// 分割後の部分盤面を順に連結すると元の盤面に戻る。
    pub fn split(&self) -> Segments {
        let mut segments = Segments::new();
        let Some((&first, rest)) = self.cells().split_first() else {
            return segments;
        };

        let mut segment = Board::new();
        segment.push(first);
        let mut previous = first;
        for &cell in rest {
            if cell.is_stone() && cell == previous.inverse() {
                segments.push(segment);
                segment.clear();
            }
            segment.push(cell);
            previous = cell;
        }
        segments.push(segment);
        segments
    }

    /// 自身と左右反転のうち辞書順で小さい方（同じなら自身）
    pub fn canonical(&self) -> Board {
        let cells = self.cells();
        let n = cells.len();
        for i in 0..n / 2 {
            match cells[i].cmp(&cells[n - 1 - i]) {
                Ordering::Less => return *self,
                Ordering::Greater => return self.reverse(),
                Ordering::Equal => {}
            }
        }
        *self
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for Board {
    type Output = Cell;

    #[inline]
    fn index(&self, index: usize) -> &Cell {
        debug_assert!(index < self.len as usize);
        &self.cells[index]
    }
}

impl IndexMut<usize> for Board {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Cell {
        debug_assert!(index < self.len as usize);
        &mut self.cells[index]
    }
}

/// 長さ優先、同じ長さならマスの辞書順
impl Ord for Board {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len.cmp(&other.len).then_with(|| self.cells().cmp(other.cells()))
    }
}

impl PartialOrd for Board {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::EmptyBoard);
        }
        let len = s.chars().count();
        if len > MAX_BOARD_LEN {
            return Err(Error::BoardTooLong {
                len,
                max: MAX_BOARD_LEN,
            });
        }
        let mut board = Board::new();
        for c in s.chars() {
            board.push(Cell::from_char(c)?);
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells() {
            write!(f, "{}", cell.to_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({self})")
    }
}
