//! Error types for the solver core
//!
//! 探索中の不変条件違反は panic とし、ここでは入力・ファイル由来の
//! 回復可能なエラーのみを扱う。

/// Core errors
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// 盤面文字列に `.xo` 以外の文字が含まれる
    #[error("Invalid cell character {0:?} (expected one of '.', 'x', 'o')")]
    InvalidCell(char),

    /// 盤面が最大長を超える
    #[error("Board too long: {len} cells (max {max})")]
    BoardTooLong { len: usize, max: usize },

    /// 空の盤面文字列
    #[error("Empty board")]
    EmptyBoard,

    /// 手番文字列が `b` / `w` 以外
    #[error("Invalid player {0:?} (expected 'b' or 'w')")]
    InvalidPlayer(String),

    /// 置換表のビットレイアウトが不正
    #[error("Invalid table layout: {0}")]
    InvalidLayout(String),

    /// DBファイルのサイズがレベルのエントリ数と一致しない
    #[error("Database file {path} has {actual} bytes, expected {expected}")]
    DatabaseSize {
        path: String,
        expected: usize,
        actual: usize,
    },

    /// DBファイル中の未知の勝敗コード
    #[error("Invalid outcome code {0}")]
    InvalidOutcomeCode(i8),

    /// 等価局面のキーがレコードの i32 に収まらない
    #[error("Equivalent index {0} does not fit in a database record")]
    EqIndexOverflow(u32),

    /// File I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
