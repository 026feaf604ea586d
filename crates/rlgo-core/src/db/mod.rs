//! 勝敗データベース
//!
//! 空点が `max_empty` 個以下の全てのスロット形盤面について勝敗クラスを
//! 保持する密な表。レベル k（空点 k 個）はレベル 1..k-1 の後ろに連続して
//! 並び、キーは「それより小さいレベルの総数 + レベル内番号」。
//!
//! - 構築は一度だけ行い、探索中は読み取り専用
//! - レベル単位で存在し、未構築・未ロードのレベルは常にミスになる
//! - 空点0個の盤面は着手できないので常に P として扱う

mod enumerate;
mod io;

use std::path::{Path, PathBuf};

use crate::board::Board;
use crate::error::Result;
use crate::game::Game;
use crate::types::Outcome;

pub use enumerate::{LevelBoards, level_size, rank, unrank};
pub use io::{RECORD_SIZE, level_path};

/// 既定の最大空点数
pub const DEFAULT_MAX_EMPTY: usize = 15;

/// 扱える空点数の上限
///
/// キーの最大値 (3^(k+2) - 9) / 2 - 1 がレコードの i32 に収まる範囲。
/// k = 18 で約 1.74e9、k = 19 では約 5.2e9 になり収まらない。
pub const MAX_SUPPORTED_EMPTY: usize = 18;

/// DBエントリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DbEntry {
    pub outcome: Outcome,
    /// 最も簡単な等価局面のキー（外部で付与される注釈）
    pub eq_idx: Option<u32>,
}

impl DbEntry {
    pub const fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            eq_idx: None,
        }
    }
}

/// DB設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `<dir>/<k>.db` を読み書きするディレクトリ
    pub dir: PathBuf,
    /// 保持する最大空点数
    pub max_empty: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./db"),
            max_empty: DEFAULT_MAX_EMPTY,
        }
    }
}

/// 勝敗データベース
pub struct Database {
    max_empty: usize,
    /// offsets[k] = レベル 1..k-1 のエントリ総数（k = 1..=max_empty+1）
    offsets: Vec<usize>,
    /// levels[k]（k = 0 は未使用）
    levels: Vec<Option<Vec<DbEntry>>>,
}

impl Database {
    /// 空のDB（全レベル未構築）
    pub fn new(max_empty: usize) -> Self {
        assert!(
            max_empty <= MAX_SUPPORTED_EMPTY,
            "max_empty {max_empty} exceeds {MAX_SUPPORTED_EMPTY}"
        );
        let mut offsets = vec![0; max_empty + 2];
        for k in 1..=max_empty {
            offsets[k + 1] = offsets[k] + level_size(k);
        }
        Self {
            max_empty,
            offsets,
            levels: vec![None; max_empty + 1],
        }
    }

    /// 設定のディレクトリから読み込めるレベルを全て読み込む
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let mut db = Self::new(config.max_empty);
        db.load(&config.dir, config.max_empty)?;
        Ok(db)
    }

    #[inline]
    pub fn max_empty(&self) -> usize {
        self.max_empty
    }

    /// 全レベルのエントリ総数
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets[self.max_empty + 1]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_level_loaded(&self, num_empty: usize) -> bool {
        self.levels.get(num_empty).is_some_and(Option::is_some)
    }

    pub(crate) fn level(&self, num_empty: usize) -> Option<&[DbEntry]> {
        self.levels.get(num_empty)?.as_deref()
    }

    pub(crate) fn set_level(&mut self, num_empty: usize, entries: Vec<DbEntry>) {
        assert_eq!(entries.len(), level_size(num_empty));
        self.levels[num_empty] = Some(entries);
    }

    /// 盤面のキー。DBの範囲外なら `None`
    pub fn key(&self, board: &Board) -> Option<usize> {
        let (num_empty, index) = rank(board, self.max_empty)?;
        Some(self.offsets[num_empty] + index)
    }

    /// キーに対応するレベル
    fn level_of(&self, key: usize) -> Option<usize> {
        if key >= self.len() {
            return None;
        }
        // offsets は単調増加
        let k = self.offsets[1..].partition_point(|&o| o <= key);
        Some(k)
    }

    /// キーから盤面を復元する
    pub fn board_at(&self, key: usize) -> Option<Board> {
        let k = self.level_of(key)?;
        Some(unrank(k, key - self.offsets[k]))
    }

    /// レベル k の盤面を番号順に列挙する
    pub fn boards(&self, num_empty: usize) -> LevelBoards {
        assert!((1..=self.max_empty).contains(&num_empty));
        LevelBoards::new(num_empty)
    }

    /// キーのエントリ。レベルが未ロードなら `None`
    pub fn entry(&self, key: usize) -> Option<DbEntry> {
        let k = self.level_of(key)?;
        self.level(k).map(|entries| entries[key - self.offsets[k]])
    }

    /// 盤面の既知エントリ
    pub fn get(&self, board: &Board) -> Option<DbEntry> {
        let entry = self.entry(self.key(board)?)?;
        entry.outcome.is_known().then_some(entry)
    }

    /// 局面の勝敗をDBから埋める
    ///
    /// ヒットしなければ何もしない。`equivalent_replace` が真で等価局面が
    /// 登録されていれば、盤面もその等価局面に置き換える。
    pub fn lookup(&self, game: &mut Game, equivalent_replace: bool) {
        let board = *game.board();
        if board.empty_count() == 0 {
            game.set_outcome(Outcome::P);
            return;
        }
        let Some(entry) = self.get(&board) else {
            return;
        };

        if equivalent_replace {
            let replacement = entry.eq_idx.and_then(|eq| {
                let eq = eq as usize;
                let eq_entry = self.entry(eq)?;
                eq_entry.outcome.is_known().then_some((self.board_at(eq)?, eq_entry.outcome))
            });
            if let Some((eq_board, outcome)) = replacement {
                game.set_board(eq_board);
                game.set_outcome(outcome);
                return;
            }
        }
        game.set_outcome(entry.outcome);
    }

    /// レベル k を構築する
    ///
    /// 各盤面を単独の局面和として探索する。レベル 1..k-1 は構築済みで
    /// あること（未構築でも結果は同じだが遅くなる）。
    pub fn build_level(&mut self, num_empty: usize) {
        self.build_level_with(num_empty, |_, _| {});
    }

    /// `build_level` の進捗コールバック付き版。1盤面ごとに呼ばれる
    pub fn build_level_with<F>(&mut self, num_empty: usize, mut on_entry: F)
    where
        F: FnMut(&Board, Outcome),
    {
        assert!((1..=self.max_empty).contains(&num_empty));
        let mut entries = Vec::with_capacity(level_size(num_empty));
        for board in self.boards(num_empty) {
            let mut game = Game::new(board);
            game.compute(self);
            let outcome = game.outcome();
            on_entry(&board, outcome);
            entries.push(DbEntry::new(outcome));
        }
        log::info!("built level {num_empty}: {} entries", entries.len());
        self.set_level(num_empty, entries);
    }

    /// レベル 1..=up_to を構築し、`store_dir` があればレベルごとに保存する
    pub fn build(&mut self, up_to: usize, store_dir: Option<&Path>) -> Result<()> {
        for k in 1..=up_to.min(self.max_empty) {
            self.build_level(k);
            if let Some(dir) = store_dir {
                self.store_level(dir, k)?;
            }
        }
        Ok(())
    }
}
