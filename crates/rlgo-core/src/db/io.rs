//! DBファイルの読み書き
//!
//! レベル k を `<dir>/<k>.db` に保存する。中身は番号順に並んだ
//! 5バイトレコードの平坦な配列:
//!
//! ```text
//! [0]    勝敗コード (i8: P=0, L=1, R=-1, N=2, U=3)
//! [1..5] 等価局面のキー (i32 little-endian, -1 = なし)
//! ```
//!
//! 盤面そのものは保存せず、ロード時に番号から復元する。

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{Database, DbEntry, level_size};
use crate::error::{Error, Result};
use crate::types::Outcome;

/// 1レコードのサイズ（バイト）
pub const RECORD_SIZE: usize = 5;

/// レベル k のファイルパス
pub fn level_path(dir: &Path, num_empty: usize) -> PathBuf {
    dir.join(format!("{num_empty}.db"))
}

fn encode(entry: &DbEntry) -> Result<[u8; RECORD_SIZE]> {
    let eq = match entry.eq_idx {
        Some(e) => i32::try_from(e).map_err(|_| Error::EqIndexOverflow(e))?,
        None => -1,
    };
    let eq = eq.to_le_bytes();
    Ok([entry.outcome.code() as u8, eq[0], eq[1], eq[2], eq[3]])
}

fn decode(record: &[u8]) -> Result<DbEntry> {
    let outcome = Outcome::from_code(record[0] as i8)?;
    let eq = i32::from_le_bytes([record[1], record[2], record[3], record[4]]);
    Ok(DbEntry {
        outcome,
        eq_idx: u32::try_from(eq).ok(),
    })
}

impl Database {
    /// レベル k をファイルに保存する。未構築のレベルは何もしない
    pub fn store_level(&self, dir: &Path, num_empty: usize) -> Result<()> {
        let Some(entries) = self.level(num_empty) else {
            log::warn!("level {num_empty} is not built; skipping store");
            return Ok(());
        };
        fs::create_dir_all(dir)?;
        let path = level_path(dir, num_empty);
        let mut writer = BufWriter::with_capacity(1024 * 1024, File::create(&path)?);
        for entry in entries {
            writer.write_all(&encode(entry)?)?;
        }
        writer.flush()?;
        log::debug!("stored {} ({} entries)", path.display(), entries.len());
        Ok(())
    }

    /// 構築済みの全レベルを保存する
    pub fn store(&self, dir: &Path) -> Result<()> {
        for k in 1..=self.max_empty() {
            if self.is_level_loaded(k) {
                self.store_level(dir, k)?;
            }
        }
        Ok(())
    }

    /// レベル k をファイルから読み込む
    ///
    /// ファイルがなければ `Ok(false)`（そのレベルは未ロードのまま）。
    pub fn load_level(&mut self, dir: &Path, num_empty: usize) -> Result<bool> {
        let path = level_path(dir, num_empty);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let expected = level_size(num_empty) * RECORD_SIZE;
        if bytes.len() != expected {
            return Err(Error::DatabaseSize {
                path: path.display().to_string(),
                expected,
                actual: bytes.len(),
            });
        }

        let entries = bytes
            .chunks_exact(RECORD_SIZE)
            .map(decode)
            .collect::<Result<Vec<_>>>()?;
        self.set_level(num_empty, entries);
        Ok(true)
    }

    /// レベル 1..=up_to を読み込み、読み込めたレベル数を返す
    pub fn load(&mut self, dir: &Path, up_to: usize) -> Result<usize> {
        let up_to = up_to.min(self.max_empty());
        let mut loaded = 0;
        for k in 1..=up_to {
            if self.load_level(dir, k)? {
                loaded += 1;
            } else {
                log::warn!("{} not found; level {k} will be searched live", level_path(dir, k).display());
            }
        }
        log::info!("loaded {loaded}/{up_to} database levels from {}", dir.display());
        Ok(loaded)
    }
}
