//! 局面和の状態
//!
//! プールは追記のみの配列で、ログはプール上の添字を記録する。
//! `undo` は直近の `Start` までを逆順に戻し、追加された局面は必ず
//! プールの末尾から取り除かれる。

use crate::db::Database;
use crate::game::Game;
use crate::types::Color;

/// undoログのエントリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEntry {
    /// 1手の開始
    Start,
    /// pool\[i\] を無効化した
    Deactivated(usize),
    /// pool\[i\] を追加した
    Added(usize),
}

/// 局面和の状態
pub struct SumState<'a> {
    db: &'a Database,
    pool: Vec<Game>,
    log: Vec<LogEntry>,
    to_play: Color,
}

impl<'a> SumState<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            pool: Vec::with_capacity(64),
            log: Vec::with_capacity(256),
            to_play: Color::Left,
        }
    }

    /// 初期局面を並べた状態。局面はそのまま（正規化もログもなし）積む
    pub fn with_games<I>(db: &'a Database, games: I) -> Self
    where
        I: IntoIterator<Item = Game>,
    {
        let mut state = Self::new(db);
        state.pool.extend(games);
        state
    }

    #[inline]
    pub fn pool(&self) -> &[Game] {
        &self.pool
    }

    #[inline]
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    #[inline]
    pub fn to_play(&self) -> Color {
        self.to_play
    }

    #[inline]
    pub fn set_to_play(&mut self, color: Color) {
        self.to_play = color;
    }

    /// 手番を入れ替える
    #[inline]
    pub fn flip(&mut self) {
        self.to_play = !self.to_play;
    }

    /// 局面を正規化して末尾に追加する
    pub fn add(&mut self, mut game: Game) -> usize {
        game.canonicalize();
        game.set_active(true);
        let idx = self.pool.len();
        self.pool.push(game);
        self.log.push(LogEntry::Added(idx));
        idx
    }

    pub fn deactivate(&mut self, idx: usize) {
        assert!(self.pool[idx].is_active(), "pool[{idx}] is already inactive");
        self.pool[idx].set_active(false);
        self.log.push(LogEntry::Deactivated(idx));
    }

    /// `game` の色反転になっている有効な局面
    fn find_inverse(&self, game: &Game) -> Option<usize> {
        self.pool
            .iter()
            .position(|g| g.is_active() && g.is_inverse(game))
    }

    /// pool\[idx\] の `point` に手番側が着手する
    ///
    /// 分割後の部分局面はDBで引き、0 になるものは捨てる。既存の局面と
    /// 打ち消し合うものは、追加せずに相手側を無効化する。
    pub fn play(&mut self, idx: usize, point: usize) {
        let parts = self.pool[idx].play(point, self.to_play);
        self.log.push(LogEntry::Start);
        self.deactivate(idx);

        // 互いに反転な2つに割れたら和は 0
        if parts.len() == 2 && parts[0].is_inverse(&parts[1]) {
            return;
        }

        for mut part in parts {
            self.db.lookup(&mut part, true);
            if part.is_computed_zero() {
                continue;
            }
            match self.find_inverse(&part) {
                Some(partner) => self.deactivate(partner),
                None => {
                    self.add(part);
                }
            }
        }
    }

    /// 直前の `play` を取り消す
    pub fn undo(&mut self) {
        assert!(!self.log.is_empty(), "undo with an empty log");
        loop {
            match self.log.pop() {
                Some(LogEntry::Start) => return,
                Some(LogEntry::Deactivated(idx)) => {
                    assert!(!self.pool[idx].is_active(), "pool[{idx}] is already active");
                    self.pool[idx].set_active(true);
                }
                Some(LogEntry::Added(idx)) => {
                    assert_eq!(idx + 1, self.pool.len(), "added entry is not the pool tail");
                    self.pool.pop();
                }
                None => panic!("undo log has no start marker"),
            }
        }
    }

    /// 勝敗クラスだけで和の勝敗が決まるなら手番側の勝ちを返す
    ///
    /// 未計算の局面があるとき、N が2つ以上あるとき、L と R が混在する
    /// ときは決まらない。
    pub fn static_winner(&self) -> Option<bool> {
        let (mut pos, mut neg, mut fuzzy) = (0u32, 0u32, 0u32);
        for game in self.pool.iter().filter(|g| g.is_active()) {
            if !game.is_computed() {
                return None;
            }
            if game.is_positive() {
                pos += 1;
            } else if game.is_negative() {
                neg += 1;
            } else if game.is_next_win() {
                fuzzy += 1;
            }
        }

        if fuzzy >= 2 || (pos > 0 && neg > 0) {
            return None;
        }
        if pos == 0 && neg == 0 && fuzzy == 0 {
            // 和は 0: 手番側の負け
            return Some(false);
        }

        let opposing = match self.to_play {
            Color::Left => neg,
            Color::Right => pos,
        };
        match (opposing, fuzzy) {
            (0, _) => Some(true),
            (_, 0) => Some(false),
            _ => None,
        }
    }

    /// 有効な局面の添字を盤面順に並べたもの
    pub fn active_sorted(&self) -> Vec<usize> {
        let mut sorted: Vec<usize> = (0..self.pool.len())
            .filter(|&i| self.pool[i].is_active())
            .collect();
        sorted.sort_by(|&a, &b| self.pool[a].board().cmp(self.pool[b].board()));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;

    fn game(s: &str, outcome: Outcome) -> Game {
        Game::with_outcome(s.parse().unwrap(), outcome)
    }

    #[test]
    fn test_static_winner_table() {
        let db = Database::new(1);
        let cases = [
            (vec![], Color::Left, Some(false)),
            (vec![Outcome::L], Color::Left, Some(true)),
            (vec![Outcome::L], Color::Right, Some(false)),
            (vec![Outcome::R, Outcome::R], Color::Right, Some(true)),
            (vec![Outcome::N], Color::Left, Some(true)),
            (vec![Outcome::N], Color::Right, Some(true)),
            (vec![Outcome::N, Outcome::N], Color::Left, None),
            (vec![Outcome::L, Outcome::R], Color::Left, None),
            (vec![Outcome::L, Outcome::N], Color::Left, Some(true)),
            (vec![Outcome::L, Outcome::N], Color::Right, None),
            (vec![Outcome::R, Outcome::N], Color::Left, None),
            (vec![Outcome::P, Outcome::P], Color::Right, Some(false)),
        ];
        for (outcomes, color, expected) in cases {
            let games = outcomes.iter().map(|&o| game("..", o));
            let mut state = SumState::with_games(&db, games);
            state.set_to_play(color);
            assert_eq!(state.static_winner(), expected, "{outcomes:?} {color:?}");
        }
    }

    #[test]
    fn test_static_winner_needs_computed() {
        let db = Database::new(1);
        let games = [game("..", Outcome::L), Game::new("...".parse().unwrap())];
        let state = SumState::with_games(&db, games);
        assert_eq!(state.static_winner(), None);
    }

    #[test]
    fn test_inactive_games_are_ignored() {
        let db = Database::new(1);
        let mut state = SumState::with_games(&db, [game("..", Outcome::R)]);
        state.deactivate(0);
        assert_eq!(state.static_winner(), Some(false));
        assert!(state.active_sorted().is_empty());
    }

    #[test]
    fn test_play_and_undo_restore_state() {
        let db = Database::new(1);
        let games = [Game::new("....x".parse().unwrap()), Game::new("...".parse().unwrap())];
        let mut state = SumState::with_games(&db, games);
        let before: Vec<Game> = state.pool().to_vec();

        state.play(0, 1);
        assert!(!state.pool()[0].is_active());
        assert_eq!(state.log()[0], LogEntry::Start);
        assert!(state.pool().len() > before.len());

        state.undo();
        assert_eq!(state.pool(), before.as_slice());
        assert!(state.log().is_empty());
    }

    #[test]
    fn test_play_adds_canonical_part() {
        let db = Database::new(1);
        let games = [Game::new("..o.".parse().unwrap()), Game::new("...".parse().unwrap())];
        let mut state = SumState::with_games(&db, games);
        state.play(1, 0);
        // x.. は正規化されて ..x になる
        assert_eq!(state.pool()[2].board().to_string(), "..x");
        assert_eq!(state.active_sorted(), vec![2, 0]);
        state.undo();
        assert_eq!(state.pool().len(), 2);
    }

    #[test]
    fn test_play_cancels_against_inverse() {
        let db = Database::new(1);
        let games = [Game::new(".o.".parse().unwrap()), Game::new("...".parse().unwrap())];
        let mut state = SumState::with_games(&db, games);
        // ... の中央に x を打つと .x. になり、.o. と打ち消し合う
        state.play(1, 1);
        assert!(state.active_sorted().is_empty());
        assert_eq!(
            state.log(),
            &[LogEntry::Start, LogEntry::Deactivated(1), LogEntry::Deactivated(0)]
        );
        state.undo();
        assert_eq!(state.active_sorted().len(), 2);
    }

    #[test]
    fn test_split_into_inverse_pair_adds_nothing() {
        let db = Database::new(1);
        let mut state = SumState::with_games(&db, [Game::new(".x.o.".parse().unwrap())]);
        state.set_to_play(Color::Left);
        // .xxo. -> .xo. -> [.x] [o.]
        state.play(0, 2);
        assert_eq!(state.log(), &[LogEntry::Start, LogEntry::Deactivated(0)]);
        assert_eq!(state.pool().len(), 1);
        assert!(state.active_sorted().is_empty());
        state.undo();
        assert!(state.pool()[0].is_active());
    }

    #[test]
    #[should_panic(expected = "empty log")]
    fn test_undo_on_empty_log_panics() {
        let db = Database::new(1);
        let mut state = SumState::new(&db);
        state.undo();
    }

    #[test]
    #[should_panic(expected = "pool tail")]
    fn test_undo_with_foreign_tail_panics() {
        let db = Database::new(1);
        let mut state = SumState::with_games(&db, [Game::new("...".parse().unwrap())]);
        // ... -> .x. は追加される
        state.play(0, 1);
        assert_eq!(state.log().last(), Some(&LogEntry::Added(1)));
        // ログを経由せずに積まれた局面があると末尾が合わない
        state.pool.push(Game::new("..".parse().unwrap()));
        state.undo();
    }

    #[test]
    fn test_active_sorted_orders_by_board() {
        let db = Database::new(1);
        let games = [
            Game::new("...".parse().unwrap()),
            Game::new(".x".parse().unwrap()),
            Game::new("..".parse().unwrap()),
        ];
        let state = SumState::with_games(&db, games);
        assert_eq!(state.active_sorted(), vec![2, 1, 0]);
    }
}
