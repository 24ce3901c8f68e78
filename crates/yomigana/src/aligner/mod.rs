//! aligner モジュール
pub mod reading_aligner;

/// 再エクスポート
pub use reading_aligner::align;
