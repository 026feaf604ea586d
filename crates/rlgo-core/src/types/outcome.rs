//! 勝敗クラス（Outcome）
//!
//! 左右それぞれが先手で勝てるかの組から決まる。
//! DBファイルには1バイトの符号付きコードとして保存する。

use crate::error::{Error, Result};

/// 勝敗クラス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// 後手必勝（値 0）
    P,
    /// Left 必勝
    L,
    /// Right 必勝
    R,
    /// 先手必勝
    N,
    /// 未計算
    #[default]
    Unknown,
}

impl Outcome {
    /// (left_wins, right_wins) から生成
    #[inline]
    pub const fn from_wins(left_wins: bool, right_wins: bool) -> Outcome {
        match (left_wins, right_wins) {
            (false, false) => Outcome::P,
            (true, false) => Outcome::L,
            (false, true) => Outcome::R,
            (true, true) => Outcome::N,
        }
    }

    /// (left_wins, right_wins) に分解。未計算なら `None`
    #[inline]
    pub const fn wins(self) -> Option<(bool, bool)> {
        match self {
            Outcome::P => Some((false, false)),
            Outcome::L => Some((true, false)),
            Outcome::R => Some((false, true)),
            Outcome::N => Some((true, true)),
            Outcome::Unknown => None,
        }
    }

    #[inline]
    pub const fn is_known(self) -> bool {
        !matches!(self, Outcome::Unknown)
    }

    /// 色を反転した局面（-G）の勝敗クラス
    #[inline]
    pub const fn negate(self) -> Outcome {
        match self {
            Outcome::L => Outcome::R,
            Outcome::R => Outcome::L,
            other => other,
        }
    }

    /// DBファイル上のコード
    #[inline]
    pub const fn code(self) -> i8 {
        match self {
            Outcome::P => 0,
            Outcome::L => 1,
            Outcome::R => -1,
            Outcome::N => 2,
            Outcome::Unknown => 3,
        }
    }

    pub fn from_code(code: i8) -> Result<Outcome> {
        match code {
            0 => Ok(Outcome::P),
            1 => Ok(Outcome::L),
            -1 => Ok(Outcome::R),
            2 => Ok(Outcome::N),
            3 => Ok(Outcome::Unknown),
            _ => Err(Error::InvalidOutcomeCode(code)),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Outcome::P => 'P',
            Outcome::L => 'L',
            Outcome::R => 'R',
            Outcome::N => 'N',
            Outcome::Unknown => 'U',
        };
        write!(f, "{c}")
    }
}
