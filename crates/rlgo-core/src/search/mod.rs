//! 局面和の探索
//!
//! - `SumState`: 部分局面のプール・undoログ・手番（両探索で共有する状態）
//! - `PlainSearch`: 置換表なしの negamax（DB構築用）
//! - `HashSearch`: 置換表つきの negamax（ソルバー本体）
//! - `prepare_games`: 入力盤面を初期の局面和に変換する
//!
//! 着手は `play` で適用し、必ず1回の `undo` で LIFO に戻す。

mod memo;
mod plain;
mod setup;
mod stats;
mod sum;

#[cfg(test)]
mod tests;

pub use memo::HashSearch;
pub use plain::PlainSearch;
pub use setup::prepare_games;
pub use stats::SearchStats;
pub use sum::{LogEntry, SumState};

use crate::game::Points;

/// 候補点リストの中央付近から1つ取り出す
///
/// 中央寄りの着手ほど先に試すための手順付け。正しさには影響しない。
#[inline]
pub(crate) fn pop_middle(points: &mut Points) -> Option<usize> {
    if points.is_empty() {
        return None;
    }
    let k = points.len() / 2;
    Some(points.remove(k))
}
