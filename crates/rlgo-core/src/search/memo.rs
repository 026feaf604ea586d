//! 置換表つきの negamax
//!
//! 有効な部分局面を盤面順に並べた列のハッシュと手番で置換表を引く。
//! 子局面のキーは着手ごとに並べ直して計算し直す。

use super::{SearchStats, SumState, pop_middle};
use crate::tt::{TranspositionTable, ZobristTable};

/// 置換表つきの探索
pub struct HashSearch<'a, 't> {
    state: SumState<'a>,
    tt: &'t mut TranspositionTable,
    zobrist: &'t ZobristTable,
    stats: SearchStats,
}

impl<'a, 't> HashSearch<'a, 't> {
    pub fn new(state: SumState<'a>, tt: &'t mut TranspositionTable, zobrist: &'t ZobristTable) -> Self {
        Self {
            state,
            tt,
            zobrist,
            stats: SearchStats::new(),
        }
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// 置換表の書き込み回数（報告用のノード数）
    #[inline]
    pub fn stores(&self) -> u64 {
        self.tt.stores()
    }

    /// 添字列の部分局面のハッシュ
    pub fn key(&self, sorted: &[usize]) -> u64 {
        let pool = self.state.pool();
        self.zobrist.hash_boards(sorted.iter().map(|&i| pool[i].board()))
    }

    /// 現在の局面和を解き、手番側が勝つかを返す
    pub fn solve(&mut self) -> bool {
        debug_assert!(self.state.log().is_empty(), "solve in the middle of a line");
        let sorted = self.state.active_sorted();
        let key = self.key(&sorted);
        let win = self.negamax(key, &sorted);
        log::debug!(
            "solved {} sub-positions ({:?} to play): win={win} {} hashfull={}",
            sorted.len(),
            self.state.to_play(),
            self.stats,
            self.tt.hashfull()
        );
        win
    }

    /// `key` は `sorted` のハッシュであること
    pub fn negamax(&mut self, key: u64, sorted: &[usize]) -> bool {
        self.stats.nodes += 1;
        let color = self.state.to_play();

        if let Some(win) = self.tt.get(key, color) {
            self.stats.tt_hits += 1;
            return win;
        }
        if let Some(win) = self.state.static_winner() {
            self.stats.static_cutoffs += 1;
            self.tt.insert(key, win, color);
            return win;
        }

        for &idx in sorted.iter().rev() {
            let mut points = self.state.pool()[idx].legal_points(color);
            while let Some(point) = pop_middle(&mut points) {
                self.state.play(idx, point);
                self.state.flip();
                let child = self.state.active_sorted();
                let child_key = self.key(&child);
                let win = !self.negamax(child_key, &child);
                self.state.flip();
                self.state.undo();
                if win {
                    self.tt.insert(key, true, color);
                    return true;
                }
            }
        }

        self.tt.insert(key, false, color);
        false
    }
}
