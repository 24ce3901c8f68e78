// crates/yomigana/src/config.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::ConfigError;

/// Default directory holding the analyzer binaries and their dictionaries.
///
/// Mirrors the layout the upstream flashcard addon ships: a `support/`
/// directory containing the `mecab` / `kakasi` executables, `mecabrc`,
/// the user dictionary and the kana conversion dictionaries.
pub fn default_support_dir() -> PathBuf {
  dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("yomigana").join("support")
}

/// Maximum restart attempts applied when a section omits `max_restarts`.
fn default_max_restarts() -> u32 {
  2
}

/// Top-level configuration for yomigana.
#[derive(Debug, Clone, Deserialize)]
pub struct YomiganaConfig {
  /// [analyzer] section - morphological analyzer process
  #[serde(default = "default_analyzer_config")]
  pub analyzer: ProcessConfig,

  /// [kana] section - kana transliteration process
  #[serde(default = "default_kana_config")]
  pub kana: ProcessConfig,

  /// [logging] section
  #[serde(default = "default_logging_config")]
  pub logging: LoggingConfig,
}

/// Configuration of one long-lived external text-line process.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessConfig {
  /// Executable to spawn (absolute path, or a name resolved via PATH)
  pub program: PathBuf,

  /// Command-line arguments
  #[serde(default)]
  pub args: Vec<String>,

  /// Extra environment variables exported to the child
  /// (e.g., library and dictionary paths under the support directory)
  #[serde(default)]
  pub envs: Vec<(String, String)>,

  /// Directory holding the executable's dictionaries, if any.
  ///
  /// Only checked for existence when explicitly configured.
  #[serde(default)]
  pub support_dir: Option<PathBuf>,

  /// How many times the session may respawn the child after an I/O failure
  /// before giving up
  #[serde(default = "default_max_restarts")]
  pub max_restarts: u32,
}

/// Default [analyzer] section: mecab with furigana-friendly node formats.
///
/// `--node-format=%m[%f[7]] ` makes each node print as `surface[reading] `,
/// `--unk-format=%m[] ` prints unknown words with an empty reading, and
/// `--eos-format=\n` terminates each analyzed line with a bare newline.
fn default_analyzer_config() -> ProcessConfig {
  let support = default_support_dir();
  ProcessConfig {
    program: support.join("mecab"),
    args: vec![
      "--node-format=%m[%f[7]] ".to_string(),
      "--eos-format=\n".to_string(),
      "--unk-format=%m[] ".to_string(),
      "-d".to_string(),
      support.display().to_string(),
      "-r".to_string(),
      support.join("mecabrc").display().to_string(),
      "-u".to_string(),
      support.join("user_dic.dic").display().to_string(),
    ],
    envs: vec![
      ("LD_LIBRARY_PATH".to_string(), support.display().to_string()),
      ("DYLD_LIBRARY_PATH".to_string(), support.display().to_string()),
    ],
    support_dir: Some(support),
    max_restarts: default_max_restarts(),
  }
}

/// Default [kana] section: kakasi converting kanji and katakana to hiragana.
fn default_kana_config() -> ProcessConfig {
  let support = default_support_dir();
  ProcessConfig {
    program: support.join("kakasi"),
    args: vec![
      "-iutf8".to_string(),
      "-outf8".to_string(),
      "-u".to_string(),
      "-JH".to_string(),
      "-KH".to_string(),
    ],
    envs: vec![
      (
        "ITAIJIDICT".to_string(),
        support.join("itaijidict").display().to_string(),
      ),
      (
        "KANWADICT".to_string(),
        support.join("kanwadict").display().to_string(),
      ),
    ],
    support_dir: Some(support),
    max_restarts: default_max_restarts(),
  }
}

/// Default [logging] section.
fn default_logging_config() -> LoggingConfig {
  LoggingConfig {
    level: LogLevel::Info,
  }
}

/// [logging] section configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
  /// Log level: "trace" | "debug" | "info" | "warn" | "error"
  pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  /// trace
  Trace,

  /// debug
  Debug,

  /// info
  Info,

  /// warn
  Warn,

  /// error
  Error,
}

impl LogLevel {
  /// Returns the level as the string accepted by `tracing_subscriber::EnvFilter`.
  pub fn as_str(&self) -> &'static str {
    match self {
      LogLevel::Trace => "trace",
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Warn => "warn",
      LogLevel::Error => "error",
    }
  }
}

impl Default for YomiganaConfig {
  fn default() -> Self {
    Self {
      analyzer: default_analyzer_config(),
      kana: default_kana_config(),
      logging: default_logging_config(),
    }
  }
}

// ===== Accessor / validation methods =====

impl YomiganaConfig {
  /// Validates the configuration.
  ///
  /// # Errors
  /// - A section's `program` is empty
  /// - An absolute `program` path exists but is not a file
  /// - A configured `support_dir` exists but is not a directory
  pub fn validate(&self) -> Result<(), ConfigError> {
    self.analyzer.validate("analyzer")?;
    self.kana.validate("kana")?;
    Ok(())
  }

  /// Returns the configured log level.
  pub fn log_level(&self) -> LogLevel {
    self.logging.level
  }
}

impl ProcessConfig {
  /// Validates one process section. `section` names it in error messages.
  fn validate(&self, section: &'static str) -> Result<(), ConfigError> {
    if self.program.as_os_str().is_empty() {
      return Err(ConfigError::EmptyProgram { section });
    }

    // Only verifiable when the path is absolute; bare names resolve via PATH
    if self.program.is_absolute() && self.program.exists() && !self.program.is_file() {
      return Err(ConfigError::ProgramNotFound {
        section,
        path: self.program.clone(),
      });
    }

    if let Some(dir) = &self.support_dir
      && dir.exists()
      && !dir.is_dir()
    {
      return Err(ConfigError::InvalidSupportDir {
        section,
        path: dir.clone(),
      });
    }

    Ok(())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────
