//! 手番（Color）とセル（Cell）

use crate::error::{Error, Result};

/// 手番（Left = 黒 `x` / Right = 白 `o`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Left = 0,
    Right = 1,
}

impl Color {
    /// 手番の数
    pub const NUM: usize = 2;

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Left => Color::Right,
            Color::Right => Color::Left,
        }
    }

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// この手番の石
    #[inline]
    pub const fn stone(self) -> Cell {
        match self {
            Color::Left => Cell::Left,
            Color::Right => Cell::Right,
        }
    }

    /// コマンドライン表記（`b` / `w`）から変換
    pub fn from_player(s: &str) -> Result<Color> {
        match s {
            "b" => Ok(Color::Left),
            "w" => Ok(Color::Right),
            _ => Err(Error::InvalidPlayer(s.to_string())),
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}

/// 盤上の1マス
///
/// 数値の大小（Empty < Left < Right）が盤面の辞書順比較に使われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Left = 1,
    Right = 2,
}

impl Cell {
    /// セルの種類数（Zobrist テーブルの行数に使う）
    pub const NUM: usize = 3;

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub const fn is_stone(self) -> bool {
        !self.is_empty()
    }

    /// 石の色を反転する。空点はそのまま
    #[inline]
    pub const fn inverse(self) -> Cell {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::Left => Cell::Right,
            Cell::Right => Cell::Left,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Left => 'x',
            Cell::Right => 'o',
        }
    }

    pub fn from_char(c: char) -> Result<Cell> {
        match c {
            '.' => Ok(Cell::Empty),
            'x' => Ok(Cell::Left),
            'o' => Ok(Cell::Right),
            _ => Err(Error::InvalidCell(c)),
        }
    }
}
