//! analyzer モジュール
//!
//! 形態素解析・かな変換のケイパビリティ（トレイト）と、
//! それらを外部プロセスで実現するセッション実装を提供します。

pub mod escape;
pub mod process_session;
pub mod protocol;
pub mod subprocess;

use crate::errors::YomiganaResult;
use crate::models::Token;

/// 形態素解析ケイパビリティ
///
/// 1行のテキストを解析し、表層形と読みのトークン列を返す。
/// 本番実装は外部プロセス（[`subprocess::AnalyzerProcess`]）、
/// テストではフェイク実装を注入する。
pub trait MorphAnalyzer {
  /// テキストを解析してトークン列を返す
  fn analyze(&mut self, text: &str) -> YomiganaResult<Vec<Token>>;
}

/// かな変換ケイパビリティ
///
/// カタカナ・漢字をひらがなへ正規化する。
/// 本番実装は外部プロセス（[`subprocess::TransliteratorProcess`]）。
pub trait KanaConverter {
  /// テキストをひらがなへ変換して返す
  fn to_hiragana(&mut self, text: &str) -> YomiganaResult<String>;
}

/// 再エクスポート
pub use process_session::ProcessSession;
pub use subprocess::{AnalyzerProcess, TransliteratorProcess};
