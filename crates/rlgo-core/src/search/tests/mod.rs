//! 探索のテスト
