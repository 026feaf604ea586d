//! 探索統計

/// 探索統計カウンタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// 総ノード数（negamax の呼び出し回数）
    pub nodes: u64,
    /// 置換表ヒット回数
    pub tt_hits: u64,
    /// `static_winner` で決着したノード数
    pub static_cutoffs: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 置換表ヒット率（%）
    pub fn tt_hit_rate(&self) -> f64 {
        if self.nodes == 0 {
            return 0.0;
        }
        self.tt_hits as f64 * 100.0 / self.nodes as f64
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "nodes={} tt_hits={} ({:.1}%) static_cutoffs={}",
            self.nodes,
            self.tt_hits,
            self.tt_hit_rate(),
            self.static_cutoffs
        )
    }
}
