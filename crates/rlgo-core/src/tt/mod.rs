//! 置換表モジュール
//!
//! 局面和の探索結果をキャッシュする置換表（Transposition Table）。
//!
//! - `PackedLayout`: エントリのビット配置（構築時に一度だけ検証）
//! - `TranspositionTable`: 固定長エントリを並べたオープンアドレス表
//! - `ZobristTable`: 部分局面の整列済み多重集合を 64bit キーにする乱数表
//!
//! キーの下位 `code_bits` ビットを照合コード、その上の `index_bits` ビットを
//! ホーム位置に使う。衝突は線形探索で解決し、置換・削除は行わない。

mod entry;
mod table;
mod zobrist;

pub use entry::PackedLayout;
pub use table::TranspositionTable;
pub use zobrist::{DEFAULT_SLOTS, ZOBRIST_SEED, ZobristTable};

/// 置換表の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtConfig {
    /// ホーム位置のビット数（エントリ数 = 2^index_bits）
    pub index_bits: u32,
    /// 照合コードのビット数
    pub code_bits: u32,
    /// 1エントリのバイト数
    pub entry_bytes: usize,
}

impl Default for TtConfig {
    /// 16M エントリ × 4バイト = 64MB
    fn default() -> Self {
        Self {
            index_bits: 24,
            code_bits: 27,
            entry_bytes: 4,
        }
    }
}
