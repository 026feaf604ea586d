//! 着手規則
//!
//! 自殺手禁止の局所判定。石（とそれに連なる同色石）が直近の隣接マスだけで
//! 呼吸点ゼロになる位置には打てない。盤端のマスは隣接マスが1つ少ない。

use smallvec::SmallVec;

use super::{Game, SubGames};
use crate::types::{Cell, Color};

/// 合法手（マス番号）のリスト
pub type Points = SmallVec<[usize; 16]>;

impl Game {
    /// `color` が `point` に打てるか
    ///
    /// 当てはまる形のどれか1つでも合法なら合法。
    pub fn is_legal_point(&self, point: usize, color: Color) -> bool {
        let board = self.board();
        let n = board.len();
        assert!(n > 0, "empty board");
        if point >= n || !board[point].is_empty() {
            return false;
        }

        let own = color.stone();
        let opp = color.opponent().stone();
        let bound = n - 1;

        let l = point == 1;
        let ll = point >= 2;
        let r = point + 1 == bound;
        let rr = point + 2 <= bound;

        // 内部: 両隣が相手石のときだけ不可
        let l2r2 = ll && rr && !(board[point - 1] == opp && board[point + 1] == opp);
        // 左端の1つ内側
        let l1r2 = l && rr && board[0] != opp && !(board[0] == own && board[2] == opp);
        // 右端の1つ内側
        let l2r1 = r && ll && board[bound] != opp && !(board[bound] == own && board[bound - 2] == opp);
        // 長さ3の中央（両端が同時に1つ内側）
        let l1r1 = l
            && r
            && (board[0].is_empty() || board[2].is_empty())
            && !(board[0] == opp || board[2] == opp);
        // 左端
        let l0 = point == 0
            && point < bound
            && (board[1].is_empty() || (rr && board[1] != opp && board[2].is_empty()));
        // 右端
        let r0 = point == bound
            && point > 0
            && (board[bound - 1].is_empty()
                || (ll && board[bound - 1] != opp && board[bound - 2].is_empty()));

        l2r2 || l1r2 || l2r1 || l1r1 || l0 || r0
    }

    /// `color` の合法手（昇順）
    pub fn legal_points(&self, color: Color) -> Points {
        (0..self.board().len())
            .filter(|&p| self.is_legal_point(p, color))
            .collect()
    }

    /// `point` が `color` の眼か（隣接する石が全て `color`）
    pub fn is_eye(&self, point: usize, color: Color) -> bool {
        let board = self.board();
        let n = board.len();
        assert!(board[point].is_empty(), "eye query on an occupied point");
        let own = color.stone();
        if point == 0 && n > 1 {
            board[1] == own
        } else if point == n - 1 && n > 1 {
            board[n - 2] == own
        } else if n > 2 {
            board[point - 1] == own && board[point + 1] == own
        } else {
            false
        }
    }

    /// 着手して simplify / split した後の部分局面（未計算・active）
    pub fn play(&self, point: usize, color: Color) -> SubGames {
        debug_assert!(self.is_active());
        let mut board = *self.board();
        debug_assert_eq!(board[point], Cell::Empty);
        board[point] = color.stone();
        board
            .simplify()
            .split()
            .into_iter()
            .map(Game::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(s: &str) -> Game {
        Game::new(s.parse().unwrap())
    }

    fn boards(games: &[Game]) -> Vec<String> {
        games.iter().map(|g| g.board().to_string()).collect()
    }

    #[test]
    fn test_single_point_has_no_moves() {
        let game = g(".");
        assert!(game.legal_points(Color::Left).is_empty());
        assert!(game.legal_points(Color::Right).is_empty());
    }

    #[test]
    fn test_plus_one_moves() {
        // .x. は Left だけが打てる
        let game = g(".x.");
        assert_eq!(game.legal_points(Color::Left).as_slice(), &[0, 2]);
        assert!(game.legal_points(Color::Right).is_empty());
    }

    #[test]
    fn test_interior_rule() {
        let game = g("..x.x..");
        // 3 は両隣が x なので Right は打てない
        assert!(!game.is_legal_point(3, Color::Right));
        assert!(game.is_legal_point(3, Color::Left));
    }

    #[test]
    fn test_edge_rules() {
        // 左端: 隣が空点なら打てる
        assert!(g("...").is_legal_point(0, Color::Left));
        // 隣が自石で、その先が空点なら打てる
        assert!(g(".x..").is_legal_point(0, Color::Left));
        // 隣が相手石なら打てない
        assert!(!g(".o..").is_legal_point(0, Color::Left));
        // 右端は対称
        assert!(g("..x.").is_legal_point(3, Color::Left));
        assert!(!g("..o.").is_legal_point(3, Color::Left));
    }

    #[test]
    fn test_near_edge_rules() {
        // 端が自石で 2 が相手石だと、打つと自石ごと呼吸点がなくなる
        assert!(!g("x.o..").is_legal_point(1, Color::Left));
        assert!(g("x....").is_legal_point(1, Color::Left));
        assert!(!g("o....").is_legal_point(1, Color::Left));
        assert!(!g("..o.x").is_legal_point(3, Color::Left));
    }

    #[test]
    fn test_occupied_is_illegal() {
        assert!(!g(".x.").is_legal_point(1, Color::Left));
    }

    #[test]
    fn test_eye() {
        let game = g(".x.x.");
        assert!(game.is_eye(0, Color::Left));
        assert!(game.is_eye(2, Color::Left));
        assert!(game.is_eye(4, Color::Left));
        assert!(!game.is_eye(2, Color::Right));
        assert!(!g("...").is_eye(1, Color::Left));
    }

    #[test]
    fn test_play_simplifies_and_splits() {
        let game = g("..x.o..");
        let subs = game.play(3, Color::Left);
        assert_eq!(boards(&subs), vec!["..x", "o.."]);
        assert!(subs.iter().all(|s| s.is_active() && !s.is_computed()));

        let subs = g("...").play(0, Color::Right);
        assert_eq!(boards(&subs), vec!["o.."]);
    }
}
