//! # rlgo-core
//!
//! 一次元囲碁（1×n の盤）の局面和を解くソルバーのコアライブラリ。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, Cell, Outcome）
//! - `board`: 盤面表現と正規化（simplify / split / 対称性）
//! - `game`: 単一局面の合法手判定と勝敗クラス
//! - `db`: 空点数ごとの勝敗データベースと永続化
//! - `tt`: ビットパック置換表と Zobrist ハッシュ
//! - `search`: 局面和の探索（通常版・置換表版）
//!

pub mod error;

// 基本型
pub mod types;

// 盤面表現
pub mod board;
pub mod game;

// 勝敗データベース
pub mod db;

// 置換表
pub mod tt;

// 探索
pub mod search;

pub use board::{Board, MAX_BOARD_LEN};
pub use db::{Database, DatabaseConfig, DbEntry};
pub use error::{Error, Result};
pub use game::Game;
pub use search::{HashSearch, PlainSearch, SearchStats, SumState};
pub use tt::{PackedLayout, TranspositionTable, TtConfig, ZobristTable};
pub use types::{Cell, Color, Outcome};
