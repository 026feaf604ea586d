//! 置換表なしの negamax
//!
//! DB構築で単一局面の勝敗を求めるときに使う。

use super::{SumState, pop_middle};

/// 置換表なしの探索
pub struct PlainSearch<'s, 'a> {
    state: &'s mut SumState<'a>,
}

impl<'s, 'a> PlainSearch<'s, 'a> {
    pub fn new(state: &'s mut SumState<'a>) -> Self {
        Self { state }
    }

    /// 現在の手番側が勝つか
    pub fn negamax(&mut self) -> bool {
        if let Some(win) = self.state.static_winner() {
            return win;
        }

        let color = self.state.to_play();
        // play/undo の後はプールの長さが元に戻る
        let len = self.state.pool().len();
        for idx in 0..len {
            let game = &self.state.pool()[idx];
            if !game.is_active() {
                continue;
            }
            let mut points = game.legal_points(color);
            while let Some(point) = pop_middle(&mut points) {
                self.state.play(idx, point);
                self.state.flip();
                let win = !self.negamax();
                self.state.flip();
                self.state.undo();
                if win {
                    return true;
                }
            }
        }
        false
    }
}
