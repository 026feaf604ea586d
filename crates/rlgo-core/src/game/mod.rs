//! 単一局面（Game）
//!
//! 盤面に、左右それぞれが先手のときの勝敗と、局面和に参加しているかの
//! `active` フラグを持たせたもの。
//!
//! 勝敗クラスの問い合わせ（`is_zero` など）は計算済みの局面でのみ有効で、
//! 未計算で呼ぶと panic する。

mod rules;

pub use rules::Points;

use smallvec::SmallVec;

use crate::board::Board;
use crate::db::Database;
use crate::search::{PlainSearch, SumState};
use crate::types::{Color, Outcome};

/// `play` の戻り値
pub type SubGames = SmallVec<[Game; 4]>;

/// 単一局面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    board: Board,
    left_wins: bool,
    right_wins: bool,
    left_computed: bool,
    right_computed: bool,
    active: bool,
}

impl Game {
    /// 未計算の局面
    pub const fn new(board: Board) -> Self {
        Self {
            board,
            left_wins: false,
            right_wins: false,
            left_computed: false,
            right_computed: false,
            active: true,
        }
    }

    /// 勝敗クラスが既知の局面。`Outcome::Unknown` なら未計算のまま
    pub fn with_outcome(board: Board, outcome: Outcome) -> Self {
        let mut game = Self::new(board);
        game.set_outcome(outcome);
        game
    }

    #[inline]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    #[inline]
    pub const fn is_computed(&self) -> bool {
        self.left_computed && self.right_computed
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// 計算済みかつ P（値 0）
    #[inline]
    pub fn is_computed_zero(&self) -> bool {
        self.is_computed() && self.is_zero()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        assert!(self.is_computed(), "outcome of {} is not computed", self.board);
        !self.left_wins && !self.right_wins
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        assert!(self.is_computed(), "outcome of {} is not computed", self.board);
        self.left_wins && !self.right_wins
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        assert!(self.is_computed(), "outcome of {} is not computed", self.board);
        !self.left_wins && self.right_wins
    }

    #[inline]
    pub fn is_next_win(&self) -> bool {
        assert!(self.is_computed(), "outcome of {} is not computed", self.board);
        self.left_wins && self.right_wins
    }

    /// 勝敗クラス。どちらかの手番が未計算なら `Outcome::Unknown`
    pub fn outcome(&self) -> Outcome {
        if !self.is_computed() {
            return Outcome::Unknown;
        }
        Outcome::from_wins(self.left_wins, self.right_wins)
    }

    pub fn set_outcome(&mut self, outcome: Outcome) {
        match outcome.wins() {
            Some((left, right)) => {
                self.left_wins = left;
                self.right_wins = right;
                self.left_computed = true;
                self.right_computed = true;
            }
            None => {
                self.left_computed = false;
                self.right_computed = false;
            }
        }
    }

    /// 片方の手番だけ結果を設定する
    pub fn set_wins(&mut self, color: Color, wins: bool) {
        match color {
            Color::Left => {
                self.left_wins = wins;
                self.left_computed = true;
            }
            Color::Right => {
                self.right_wins = wins;
                self.right_computed = true;
            }
        }
    }

    /// 盤面が互いの色反転か（左右反転も含めて判定）
    pub fn is_inverse(&self, other: &Game) -> bool {
        let (a, b) = (self.board.cells(), other.board.cells());
        if a.len() != b.len() {
            return false;
        }
        let straight = a.iter().zip(b.iter()).all(|(x, y)| *x == y.inverse());
        straight || a.iter().zip(b.iter().rev()).all(|(x, y)| *x == y.inverse())
    }

    /// 盤面を正規形（左右反転のうち小さい方）に置き換える
    #[inline]
    pub fn canonicalize(&mut self) {
        self.board = self.board.canonical();
    }

    /// 単独の局面和を探索して両手番の勝敗を確定する
    ///
    /// DB構築時のみ使う。`db` には空点数の少ないレベルが構築済みであること。
    pub fn compute(&mut self, db: &Database) {
        debug_assert!(!self.left_computed && !self.right_computed);
        let mut state = SumState::with_games(db, [*self]);

        state.set_to_play(Color::Left);
        let left_wins = PlainSearch::new(&mut state).negamax();
        state.set_to_play(Color::Right);
        let right_wins = PlainSearch::new(&mut state).negamax();

        self.set_wins(Color::Left, left_wins);
        self.set_wins(Color::Right, right_wins);
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)
    }
}
