//! Subprocess-backed implementations of the capability traits.
//!
//! [`AnalyzerProcess`] drives a mecab-style analyzer (node lines parsed via
//! [`crate::analyzer::protocol`]); [`TransliteratorProcess`] drives a
//! kakasi-style converter answering one hiragana line per input line.

use tracing::debug;

use crate::analyzer::{KanaConverter, MorphAnalyzer, ProcessSession, escape, protocol};
use crate::config::ProcessConfig;
use crate::errors::{AnalyzerError, YomiganaResult};
use crate::models::Token;

/// Morphological analyzer running as an external process.
pub struct AnalyzerProcess {
  session: ProcessSession,
}

impl AnalyzerProcess {
  /// Builds the wrapper from the `[analyzer]` config section (child not yet spawned).
  pub fn from_config(config: &ProcessConfig) -> Self {
    Self {
      session: ProcessSession::from_config(config),
    }
  }

  /// Spawns the child process.
  pub fn start(&mut self) -> YomiganaResult<()> {
    self.session.start().map_err(AnalyzerError::from)?;
    Ok(())
  }

  /// Stops the child process.
  pub fn stop(&mut self) {
    self.session.stop();
  }
}

impl MorphAnalyzer for AnalyzerProcess {
  fn analyze(&mut self, text: &str) -> YomiganaResult<Vec<Token>> {
    let escaped = escape::escape_text(text);
    let line = self.session.query(&escaped).map_err(AnalyzerError::from)?;

    let tokens = protocol::parse_line(&line);
    debug!(input = %escaped, token_count = tokens.len(), "analyzed input line");
    Ok(tokens)
  }
}

/// Kana transliterator running as an external process.
pub struct TransliteratorProcess {
  session: ProcessSession,
}

impl TransliteratorProcess {
  /// Builds the wrapper from the `[kana]` config section (child not yet spawned).
  pub fn from_config(config: &ProcessConfig) -> Self {
    Self {
      session: ProcessSession::from_config(config),
    }
  }

  /// Spawns the child process.
  pub fn start(&mut self) -> YomiganaResult<()> {
    self.session.start().map_err(AnalyzerError::from)?;
    Ok(())
  }

  /// Stops the child process.
  pub fn stop(&mut self) {
    self.session.stop();
  }
}

impl KanaConverter for TransliteratorProcess {
  fn to_hiragana(&mut self, text: &str) -> YomiganaResult<String> {
    let escaped = escape::escape_text(text);
    let line = self.session.query(&escaped).map_err(AnalyzerError::from)?;
    Ok(line)
  }
}
