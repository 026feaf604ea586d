//! エントリのビット配置
//!
//! ```text
//! bit  0 .. code_bits   照合コード
//! bit  code_bits + 0    有効ビット
//! bit  code_bits + 1    Left 計算済み
//! bit  code_bits + 2    Left 勝ち
//! bit  code_bits + 3    Right 計算済み
//! bit  code_bits + 4    Right 勝ち
//! ```
//!
//! 有効ビットがあるので、使用中のエントリは照合コードが 0 でも非ゼロになる。

use super::TtConfig;
use crate::error::{Error, Result};
use crate::types::Color;

/// ホーム位置のビット数の上限（1TB 以上の表は確保しない）
const MAX_INDEX_BITS: u32 = 40;

/// 照合コードより上に置くフラグのビット数
const FLAG_BITS: u32 = 5;

/// エントリのビット配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedLayout {
    index_bits: u32,
    code_bits: u32,
    entry_bytes: usize,
    index_mask: u64,
    code_mask: u64,
    valid: u64,
    computed: [u64; Color::NUM],
    win: [u64; Color::NUM],
}

impl PackedLayout {
    pub fn new(index_bits: u32, code_bits: u32, entry_bytes: usize) -> Result<Self> {
        if !(1..=MAX_INDEX_BITS).contains(&index_bits) {
            return Err(Error::InvalidLayout(format!(
                "index_bits must be in 1..={MAX_INDEX_BITS}, got {index_bits}"
            )));
        }
        if index_bits + code_bits > u64::BITS {
            return Err(Error::InvalidLayout(format!(
                "index_bits + code_bits must fit in 64 bits, got {}",
                index_bits + code_bits
            )));
        }
        if !(1..=8).contains(&entry_bytes) {
            return Err(Error::InvalidLayout(format!(
                "entry_bytes must be in 1..=8, got {entry_bytes}"
            )));
        }
        if code_bits + FLAG_BITS > 8 * entry_bytes as u32 {
            return Err(Error::InvalidLayout(format!(
                "code_bits {code_bits} + {FLAG_BITS} flag bits do not fit in {entry_bytes} bytes"
            )));
        }

        let index_mask = (u64::MAX >> (u64::BITS - index_bits)) << code_bits;
        let code_mask = if code_bits == 0 {
            0
        } else {
            u64::MAX >> (u64::BITS - code_bits)
        };
        let flag = |i: u32| 1u64 << (code_bits + i);

        Ok(Self {
            index_bits,
            code_bits,
            entry_bytes,
            index_mask,
            code_mask,
            valid: flag(0),
            computed: [flag(1), flag(3)],
            win: [flag(2), flag(4)],
        })
    }

    pub fn from_config(config: &TtConfig) -> Result<Self> {
        Self::new(config.index_bits, config.code_bits, config.entry_bytes)
    }

    #[inline]
    pub fn entry_bytes(&self) -> usize {
        self.entry_bytes
    }

    /// エントリ数
    #[inline]
    pub fn capacity(&self) -> usize {
        1usize << self.index_bits
    }

    /// キーのホーム位置
    #[inline]
    pub fn home(&self, key: u64) -> usize {
        ((key & self.index_mask) >> self.code_bits) as usize
    }

    /// キーの照合コード
    #[inline]
    pub fn code(&self, key: u64) -> u64 {
        key & self.code_mask
    }

    /// エントリがこのコードのものか
    #[inline]
    pub fn matches(&self, entry: u64, code: u64) -> bool {
        entry & self.code_mask == code
    }

    /// エントリに `color` 手番の結果を書き込んだ値
    #[inline]
    pub fn with_result(&self, entry: u64, code: u64, color: Color, win: bool) -> u64 {
        let mut entry = entry | self.valid | code | self.computed[color.index()];
        if win {
            entry |= self.win[color.index()];
        }
        entry
    }

    /// `color` 手番の結果。未計算なら `None`
    #[inline]
    pub fn read(&self, entry: u64, color: Color) -> Option<bool> {
        if entry & self.computed[color.index()] == 0 {
            return None;
        }
        Some(entry & self.win[color.index()] != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = PackedLayout::from_config(&TtConfig::default()).unwrap();
        assert_eq!(layout.capacity(), 1 << 24);
        let key = 0xDEAD_BEEF_CAFE_F00D_u64;
        assert_eq!(layout.code(key), key & ((1 << 27) - 1));
        assert_eq!(layout.home(key) as u64, (key >> 27) & ((1 << 24) - 1));
    }

    #[test]
    fn test_invalid_layouts() {
        assert!(PackedLayout::new(0, 10, 4).is_err());
        assert!(PackedLayout::new(40, 30, 8).is_err());
        assert!(PackedLayout::new(20, 28, 4).is_err());
        assert!(PackedLayout::new(20, 10, 9).is_err());
        assert!(PackedLayout::new(20, 27, 4).is_ok());
        assert!(PackedLayout::new(4, 0, 1).is_ok());
    }

    #[test]
    fn test_result_bits_are_independent() {
        let layout = PackedLayout::new(8, 11, 2).unwrap();
        let code = 0x5A5;
        let entry = layout.with_result(0, code, Color::Left, true);
        assert_ne!(entry, 0);
        assert!(layout.matches(entry, code));
        assert_eq!(layout.read(entry, Color::Left), Some(true));
        assert_eq!(layout.read(entry, Color::Right), None);

        let entry = layout.with_result(entry, code, Color::Right, false);
        assert_eq!(layout.read(entry, Color::Left), Some(true));
        assert_eq!(layout.read(entry, Color::Right), Some(false));
        assert!(entry < 1 << 16);
    }

    #[test]
    fn test_zero_code_entry_is_nonzero() {
        let layout = PackedLayout::new(8, 0, 1).unwrap();
        let entry = layout.with_result(0, 0, Color::Right, false);
        assert_ne!(entry, 0);
        assert!(layout.matches(entry, 0));
    }
}
