// crates/yomigana/src/service.rs

//! ReadingService: yomigana クレートの統合ファサード。
//!
//! - 形態素解析プロセス (AnalyzerProcess)
//! - かな変換プロセス (TransliteratorProcess)
//! - 読み整形 (aligner::align)
//!
//! エディター統合などの外部からは、この構造体だけを意識すればよい。
//!
//! # ライフサイクル
//!
//! 外部プロセスはグローバルに共有せず、本構造体が所有する。
//! `init` で構築（この時点では子プロセスは未起動）、`start` で起動、
//! `shutdown` で明示的に停止する。入出力障害時の再起動はセッション層の
//! ポリシー（`max_restarts`）に従う。

use tracing::{debug, info};

use crate::aligner::align;
use crate::analyzer::{AnalyzerProcess, MorphAnalyzer, TransliteratorProcess};
use crate::config::YomiganaConfig;
use crate::errors::YomiganaResult;

/// yomigana クレートの統合ファサード。
///
/// 呼び出し側が所有する明示的な「解析器セッション」。
/// 1回のユーザー操作につき [`reading`](Self::reading) を1回呼ぶ使い方を想定する。
pub struct ReadingService {
  /// 形態素解析プロセス
  analyzer: AnalyzerProcess,

  /// かな変換プロセス
  kana: TransliteratorProcess,
}

impl ReadingService {
  /// 初期化(設定の検証 + 各プロセスラッパーの構築)
  ///
  /// 子プロセスはまだ起動しない。最初の [`reading`](Self::reading) 呼び出し、
  /// または明示的な [`start`](Self::start) で起動される。
  ///
  /// # エラー
  /// - 設定が不正（program が空、support_dir がディレクトリでない等）
  pub fn init(config: &YomiganaConfig) -> YomiganaResult<Self> {
    config.validate()?;

    Ok(Self {
      analyzer: AnalyzerProcess::from_config(&config.analyzer),
      kana: TransliteratorProcess::from_config(&config.kana),
    })
  }

  /// 両方の子プロセスを起動する。
  ///
  /// # エラー
  /// - いずれかの実行ファイルを起動できない
  pub fn start(&mut self) -> YomiganaResult<()> {
    self.analyzer.start()?;
    self.kana.start()?;
    info!("reading service started");
    Ok(())
  }

  /// 両方の子プロセスを停止する。
  pub fn shutdown(&mut self) {
    self.analyzer.stop();
    self.kana.stop();
    info!("reading service stopped");
  }

  /// テキストのふりがな付き読みを生成する。
  ///
  /// # 戻り値
  /// - `Ok(Some(reading))`: 整形済みの読み文字列
  /// - `Ok(None)`: 解析器がトークンを返さなかった（読みを生成できない入力）
  ///
  /// # エラー
  /// - 解析プロセスが利用できない（起動失敗・再起動上限超過）
  pub fn reading(&mut self, text: &str) -> YomiganaResult<Option<String>> {
    if text.trim().is_empty() {
      return Ok(None);
    }

    let tokens = self.analyzer.analyze(text)?;
    if tokens.is_empty() {
      debug!(input = %text, "analyzer produced no tokens");
      return Ok(None);
    }

    let aligned = align(&tokens, &mut self.kana);
    if aligned.is_empty() {
      return Ok(None);
    }
    Ok(Some(aligned))
  }
}
