//! yomigana 読み仮名生成ライブラリー
//!
//! 外部の形態素解析プロセスを利用して日本語テキストにふりがな（読み仮名）注釈を付与する

/// 読み整形モジュール - トークン列を括弧付きふりがな文字列へ変換する
pub mod aligner;

/// 解析器モジュール - 形態素解析・かな変換ケイパビリティと外部プロセスセッションを提供
pub mod analyzer;

/// 設定モジュール - YomiganaConfig, LogLevel等の設定構造体を定義
pub mod config;

/// エラーモジュール - YomiganaError, YomiganaResult等のエラー型を定義
pub mod errors;

/// データモデルモジュール - Token, AnnotatedSegment等のデータ構造を定義
pub mod models;

/// サービスモジュール - ReadingService等の上位レベルAPIを提供
pub mod service;

/// 再エクスポート
pub use aligner::align;
pub use analyzer::{KanaConverter, MorphAnalyzer};
pub use config::{LogLevel, YomiganaConfig};
pub use errors::{YomiganaError, YomiganaResult};
pub use models::{AnnotatedSegment, Token};
pub use service::ReadingService;
