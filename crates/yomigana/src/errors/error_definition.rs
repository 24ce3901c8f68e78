//! エラー定義

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// 設定ファイル（YomiganaConfig）関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ConfigError {
  /// analyzer.program / kana.program が空
  #[error("{section}.program に実行コマンドを指定してください")]
  EmptyProgram {
    /// 対象セクション名（"analyzer" または "kana"）
    section: &'static str,
  },

  /// 明示指定されたコマンドパスが実行ファイルとして存在しない
  #[error("{section}.program が実行ファイルではありません: path={path:?}")]
  ProgramNotFound {
    /// 対象セクション名
    section: &'static str,
    /// 不正なパス
    path: PathBuf,
  },

  /// support_dir が「存在するディレクトリ」でない（ファイルである等）
  #[error("{section}.support_dir がディレクトリではありません: path={path:?}")]
  InvalidSupportDir {
    /// 対象セクション名
    section: &'static str,
    /// 不正なパス
    path: PathBuf,
  },
}

/// 外部プロセスセッション関連のエラー
///
/// 形態素解析器・かな変換器はいずれも行単位のテキストで会話する
/// 長寿命の子プロセスであり、これらの起動・入出力・再起動のエラーを定義する
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum SessionError {
  /// 子プロセスの起動失敗
  #[error("外部プロセスの起動に失敗しました: program={program:?}, error={source}")]
  SpawnFailed {
    /// 起動しようとしたコマンド
    program: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// 子プロセスの stdin/stdout ハンドルを取得できない
  #[error("外部プロセスの標準入出力を取得できません: program={program:?}")]
  StdioUnavailable {
    /// 対象コマンド
    program: PathBuf,
  },

  /// 子プロセスとの行入出力に失敗
  #[error("外部プロセスとの入出力に失敗しました: program={program:?}, error={source}")]
  Io {
    /// 対象コマンド
    program: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// 子プロセスが出力を返す前に終了した
  #[error("外部プロセスが終了しました: program={program:?}")]
  ProcessExited {
    /// 対象コマンド
    program: PathBuf,
  },

  /// 再起動回数が上限に達した
  #[error("外部プロセスの再起動回数が上限に達しました: program={program:?}, max_restarts={max_restarts}")]
  RestartLimitExceeded {
    /// 対象コマンド
    program: PathBuf,
    /// 設定された再起動上限
    max_restarts: u32,
  },
}

/// 形態素解析関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum AnalyzerError {
  /// セッション起因のエラー
  #[error("セッションエラー: {0}")]
  Session(#[from] SessionError),

  /// 解析対象の入力テキストが不正
  #[error("解析対象の入力テキストが不正: {reason}")]
  InvalidInput {
    /// 不正の理由
    reason: String,
  },
}

/// 統合エラー
/// 本クレートの外部に公開するエラー用 API はこのエラーを返すこと
/// `YomiganaResult<T>` = `Result<T, YomiganaError>` として使用する
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum YomiganaError {
  /// 設定エラー
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// 外部プロセスセッション関連エラー
  #[error(transparent)]
  Session(#[from] SessionError),

  /// 形態素解析関連エラー
  #[error(transparent)]
  Analyzer(#[from] AnalyzerError),
}

/// yomigana クレートの標準 Result 型エイリアス
pub type YomiganaResult<T> = Result<T, YomiganaError>;
