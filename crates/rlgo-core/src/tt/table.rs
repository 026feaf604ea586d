//! 置換表本体

use super::{PackedLayout, TtConfig};
use crate::error::Result;
use crate::types::Color;

/// 置換表
///
/// `entry_bytes` バイトのエントリを little-endian で並べたバイト列。
/// 0 は空きエントリを表す。
pub struct TranspositionTable {
    layout: PackedLayout,
    slots: Vec<u8>,
    /// 書き込み回数（探索ノード数として報告する）
    stores: u64,
    /// 使用中のエントリ数
    occupied: u64,
}

impl TranspositionTable {
    /// 設定を検証して表を確保する
    pub fn new(config: &TtConfig) -> Result<Self> {
        let layout = PackedLayout::from_config(config)?;
        let bytes = layout.capacity() * layout.entry_bytes();
        log::debug!(
            "allocating transposition table: {} entries x {} bytes ({} MB)",
            layout.capacity(),
            layout.entry_bytes(),
            bytes >> 20
        );
        Ok(Self {
            layout,
            slots: vec![0; bytes],
            stores: 0,
            occupied: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.layout.capacity()
    }

    #[inline]
    pub fn stores(&self) -> u64 {
        self.stores
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.occupied
    }

    /// 使用率（‰）
    pub fn hashfull(&self) -> u32 {
        (self.occupied * 1000 / self.capacity() as u64) as u32
    }

    /// 全エントリを消去する
    pub fn clear(&mut self) {
        self.slots.fill(0);
        self.stores = 0;
        self.occupied = 0;
    }

    #[inline]
    fn read_slot(&self, idx: usize) -> u64 {
        let n = self.layout.entry_bytes();
        let mut buf = [0u8; 8];
        buf[..n].copy_from_slice(&self.slots[idx * n..(idx + 1) * n]);
        u64::from_le_bytes(buf)
    }

    #[inline]
    fn write_slot(&mut self, idx: usize, entry: u64) {
        let n = self.layout.entry_bytes();
        self.slots[idx * n..(idx + 1) * n].copy_from_slice(&entry.to_le_bytes()[..n]);
    }

    /// キーのエントリ位置を線形探索で求める
    ///
    /// 同じコードのエントリか空きエントリで止まる。
    fn find_slot(&self, key: u64) -> (usize, u64) {
        let code = self.layout.code(key);
        let mask = self.capacity() - 1;
        let mut idx = self.layout.home(key);
        for _ in 0..self.capacity() {
            let entry = self.read_slot(idx);
            if entry == 0 || self.layout.matches(entry, code) {
                return (idx, entry);
            }
            idx = (idx + 1) & mask;
        }
        panic!("transposition table is full ({} entries)", self.capacity());
    }

    /// `color` 手番の結果を書き込む
    pub fn insert(&mut self, key: u64, win: bool, color: Color) {
        let (idx, entry) = self.find_slot(key);
        if entry == 0 {
            self.occupied += 1;
        }
        let code = self.layout.code(key);
        let entry = self.layout.with_result(entry, code, color, win);
        self.write_slot(idx, entry);
        self.stores += 1;
    }

    /// `color` 手番の結果。未登録なら `None`
    pub fn get(&self, key: u64, color: Color) -> Option<bool> {
        let (_, entry) = self.find_slot(key);
        if entry == 0 {
            return None;
        }
        self.layout.read(entry, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> TranspositionTable {
        TranspositionTable::new(&TtConfig {
            index_bits: 4,
            code_bits: 11,
            entry_bytes: 2,
        })
        .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut tt = small();
        let key = 0x1234;
        assert_eq!(tt.get(key, Color::Left), None);

        tt.insert(key, true, Color::Left);
        assert_eq!(tt.get(key, Color::Left), Some(true));
        assert_eq!(tt.get(key, Color::Right), None);

        tt.insert(key, false, Color::Right);
        assert_eq!(tt.get(key, Color::Right), Some(false));
        assert_eq!(tt.get(key, Color::Left), Some(true));

        assert_eq!(tt.stores(), 2);
        assert_eq!(tt.occupied(), 1);
    }

    #[test]
    fn test_collision_moves_forward() {
        let mut tt = small();
        // 同じホーム位置、異なるコード
        let a = (3 << 11) | 1;
        let b = (3 << 11) | 2;
        tt.insert(a, true, Color::Left);
        tt.insert(b, false, Color::Left);
        assert_eq!(tt.get(a, Color::Left), Some(true));
        assert_eq!(tt.get(b, Color::Left), Some(false));
        assert_eq!(tt.occupied(), 2);
    }

    #[test]
    fn test_slot_search_wraps_around() {
        let mut tt = small();
        let last = 15 << 11;
        tt.insert(last | 1, true, Color::Right);
        tt.insert(last | 2, true, Color::Right);
        assert_eq!(tt.read_slot(0) & 0x7FF, 2);
        assert_eq!(tt.get(last | 2, Color::Right), Some(true));
    }

    #[test]
    fn test_clear() {
        let mut tt = small();
        tt.insert(7, true, Color::Left);
        tt.clear();
        assert_eq!(tt.get(7, Color::Left), None);
        assert_eq!(tt.stores(), 0);
        assert_eq!(tt.hashfull(), 0);
    }

    #[test]
    #[should_panic(expected = "table is full")]
    fn test_full_table_panics() {
        // 2エントリ、3ビットコード
        let mut tt = TranspositionTable::new(&TtConfig {
            index_bits: 1,
            code_bits: 3,
            entry_bytes: 1,
        })
        .unwrap();
        tt.insert(1, true, Color::Left);
        tt.insert(2, false, Color::Left);
        assert_eq!(tt.hashfull(), 1000);
        let _ = tt.get(3, Color::Left);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = TtConfig {
            index_bits: 24,
            code_bits: 28,
            entry_bytes: 4,
        };
        assert!(TranspositionTable::new(&config).is_err());
    }
}
